use std::env;

pub struct Opts {
    pub subcommand: String,
    pub path: String,
    pub file: Option<String>,
}

const USAGE: &str = "Usage: uploadpipe run <pipeline.yaml> <file>\n       uploadpipe validate <pipeline.yaml>";

pub fn get_opts() -> Opts {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }
    let opts = Opts {
        subcommand: args[1].clone(),
        path: args[2].clone(),
        file: args.get(3).cloned(),
    };
    if opts.subcommand == "run" && opts.file.is_none() {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }
    opts
}
