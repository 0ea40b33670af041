//! macrogen CLI
//!
//! Usage:
//!   macrogen [OPTIONS] [FILE]
//!
//! Options:
//!   -t, --target <TARGET>  Target language, repeatable (rust, java)
//!   -o, --out-dir <DIR>    Output directory (prints to stdout if omitted)
//!   -c, --config <FILE>    Generator configuration (TOML format)
//!   --package <NAME>       Java package of the generated classes
//!   --check                Validate definitions without generating code
//!   --names                Print the identifiers assigned to each definition
//!   -v, --verbose          Debug logging
//!   -h, --help             Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use macrogen::codegen;
use macrogen::{compile, write_files, GeneratorConfig, Target};

#[derive(Parser)]
#[command(name = "macrogen")]
#[command(about = "Compile template definitions into typed builder code")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Target language; overrides the configuration file
    #[arg(short, long, value_enum)]
    target: Vec<Target>,

    /// Output directory (prints generated files to stdout if omitted)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Generator configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Java package of the generated classes
    #[arg(long)]
    package: Option<String>,

    /// Validate definitions without generating code
    #[arg(long)]
    check: bool,

    /// Print the identifiers assigned to each definition
    #[arg(long)]
    names: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => match GeneratorConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };
    if !cli.target.is_empty() {
        config = config.with_targets(cli.target.clone());
    }
    if let Some(package) = &cli.package {
        config = config.with_java_package(package.clone());
    }
    debug!(?config, "configuration loaded");

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    let unit = match compile(&source) {
        Ok(unit) => unit,
        Err(e) => {
            eprint!("{}", e.report(&source, &filename));
            eprintln!("Error: {} problem(s) in '{}'", e.len(), filename);
            process::exit(1);
        }
    };

    if cli.names {
        for id in unit.graph.emission_order() {
            let name = unit.names.definition(*id);
            println!(
                "{}\t{}\t{}\t{}",
                name.declared,
                name.type_name(&config.type_prefix),
                name.factory(),
                name.snake_factory()
            );
        }
    }
    if cli.check {
        println!("{}: {} definition(s) ok", filename, unit.graph.graph().len());
        return;
    }
    if cli.names {
        return;
    }

    let files = codegen::generate(&unit, &config);
    match &cli.out_dir {
        Some(dir) => {
            if let Err(e) = write_files(&files, dir) {
                eprintln!("Error writing to '{}': {}", dir.display(), e);
                process::exit(1);
            }
        }
        None => {
            for file in &files {
                println!("// ==> {}", file.path.display());
                print!("{}", file.contents);
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "macrogen=debug" } else { "macrogen=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .try_init();
}
