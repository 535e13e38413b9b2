mod cli;

use anyhow::Context;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*};
use uploadpipe::pipeline::{load_pipeline, run_with, validate_registry};
use uploadpipe::text::TextUploader;
use uploadpipe::Uploader;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .init();

    let opts = cli::get_opts();
    execute(&opts)
}

fn execute(opts: &cli::Opts) -> anyhow::Result<()> {
    match opts.subcommand.as_str() {
        "run" => {
            let file = opts.file.as_deref().unwrap_or_default();
            run_file(Path::new(&opts.path), Path::new(file)).context("pipeline run failed")
        }
        "validate" => validate_file(Path::new(&opts.path)),
        other => anyhow::bail!("Unknown subcommand: {} (supported: run, validate)", other),
    }
}

fn run_file(pipeline_path: &Path, file: &Path) -> anyhow::Result<()> {
    let pipeline = load_pipeline(pipeline_path)?;
    let registry = pipeline.to_registry()?;
    info!("Loaded pipeline: {:?} ({} steps)", pipeline.name, registry.len());

    let content = std::fs::read_to_string(file).with_context(|| format!("failed to read {:?}", file))?;
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut upload = TextUploader::new(filename, content);

    run_with(&registry, TextUploader::operations(), &mut upload)?;

    println!("File: {}", upload.filename);
    println!("{}", upload.content);
    Ok(())
}

fn validate_file(path: &Path) -> anyhow::Result<()> {
    let pipeline = load_pipeline(path)?;
    let registry = pipeline.to_registry()?;
    if let Err(problems) = validate_registry(&registry, TextUploader::operations()) {
        for problem in &problems {
            eprintln!("  {}", problem);
        }
        anyhow::bail!("{} invalid step(s) in {:?}", problems.len(), path);
    }
    println!(
        "Pipeline '{}' validated ({} steps)",
        pipeline.name.clone().unwrap_or_else(|| "<unnamed>".to_string()),
        registry.len()
    );
    Ok(())
}
