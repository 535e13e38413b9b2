use crate::error::DispatchError;
use crate::pipeline::registry::{Declaration, ProcessorRegistry};
use crate::uploader::{OperationTable, Uploader};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Pipeline file: an optional name and the list of processor declarations.
///
/// Each `process` item is either a processor name (`strip`) or a mapping of
/// names to arguments (`{ truncate: [80] }`).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineFile {
    pub name: Option<String>,
    #[serde(default)]
    pub process: Vec<serde_yaml::Value>,
}

fn yaml_declaration(index: usize, item: serde_yaml::Value) -> anyhow::Result<Declaration> {
    match item {
        serde_yaml::Value::String(op) => Ok(Declaration::Named(op)),
        serde_yaml::Value::Mapping(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (key, value) in map {
                let op = match key {
                    serde_yaml::Value::String(s) => s,
                    other => anyhow::bail!(
                        "process entry {}: processor name must be a string, got {:?}",
                        index,
                        other
                    ),
                };
                let args = yaml_arguments(value)
                    .with_context(|| format!("process entry {}: invalid arguments for '{}'", index, op))?;
                pairs.push((op, args));
            }
            Ok(Declaration::Mapping(pairs))
        }
        other => anyhow::bail!(
            "process entry {} must be a processor name or a mapping of names to arguments, got {:?}",
            index,
            other
        ),
    }
}

/// A sequence is the argument list, `null` means none, anything else is one argument.
fn yaml_arguments(value: serde_yaml::Value) -> anyhow::Result<Vec<Value>> {
    match value {
        serde_yaml::Value::Null => Ok(Vec::new()),
        serde_yaml::Value::Sequence(items) => items.into_iter().map(yaml_argument).collect(),
        other => Ok(vec![yaml_argument(other)?]),
    }
}

fn yaml_argument(value: serde_yaml::Value) -> anyhow::Result<Value> {
    ensure_finite(&value)?;
    Ok(serde_json::to_value(value)?)
}

/// JSON has no NaN or infinity; converting them would silently yield `null`.
fn ensure_finite(value: &serde_yaml::Value) -> anyhow::Result<()> {
    match value {
        serde_yaml::Value::Number(n) => match n.as_f64() {
            Some(f) if !f.is_finite() => anyhow::bail!("non-finite number {} is not a valid argument", n),
            _ => Ok(()),
        },
        serde_yaml::Value::Sequence(items) => items.iter().try_for_each(ensure_finite),
        serde_yaml::Value::Mapping(map) => map.values().try_for_each(ensure_finite),
        serde_yaml::Value::Tagged(tagged) => ensure_finite(&tagged.value),
        _ => Ok(()),
    }
}

impl PipelineFile {
    /// Declare every entry, in file order, on a fresh registry.
    pub fn to_registry(&self) -> anyhow::Result<ProcessorRegistry> {
        let declarations = self
            .process
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, item)| yaml_declaration(index, item))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let mut registry = ProcessorRegistry::new();
        registry.declare(declarations);
        Ok(registry)
    }
}

pub fn parse_pipeline(content: &str) -> anyhow::Result<PipelineFile> {
    let p: PipelineFile = serde_yaml::from_str(content).context("failed to parse pipeline YAML")?;
    Ok(p)
}

/// Load YAML file into PipelineFile
pub fn load_pipeline(path: &Path) -> anyhow::Result<PipelineFile> {
    let content = std::fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
    parse_pipeline(&content).with_context(|| format!("in {:?}", path))
}

/// Check every entry against `table` without running anything.
///
/// Returns all problems found, in registry order.
pub fn validate_registry<U: Uploader>(
    registry: &ProcessorRegistry,
    table: &OperationTable<U>,
) -> Result<(), Vec<DispatchError>> {
    let problems: Vec<DispatchError> = registry
        .iter()
        .filter_map(|entry| {
            table
                .resolve(&entry.operation, entry.arguments.len())
                .err()
        })
        .collect();
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}
