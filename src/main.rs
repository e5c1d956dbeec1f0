//! Bendpoint Router CLI
//!
//! Usage:
//!   bendpoint-router [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>      Router configuration file (TOML format)
//!   --connection <ID>        Route only this connection (repeatable)
//!   -f, --force              Reroute user-shaped self loops too
//!   -i, --interchange        Print the synchronized interchange edges
//!   -v, --verbose            Log routing decisions to stderr
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bendpoint_router::{route_document_with_config, Error, PipelineConfig, RouterConfig};

#[derive(Parser)]
#[command(name = "bendpoint-router")]
#[command(about = "Orthogonal connection routing for diagram documents")]
struct Cli {
    /// Input document (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Router configuration file; overrides the document's [router] table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route only the named connection (repeatable)
    #[arg(long = "connection", value_name = "ID")]
    connections: Vec<String>,

    /// Reroute connections even where their manual shape would be kept
    #[arg(short, long)]
    force: bool,

    /// Print the interchange edges instead of the routed document
    #[arg(short, long)]
    interchange: bool,

    /// Log routing decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// `RUST_LOG` wins when set and valid; otherwise `--verbose` picks the level
fn env_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "warn" };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

fn main() {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(rust_log.as_deref(), cli.verbose))
        .with_writer(io::stderr)
        .init();

    let mut config = PipelineConfig::new().with_force(cli.force);
    config.connections = cli.connections;
    if let Some(path) = &cli.config {
        match RouterConfig::from_file(path) {
            Ok(router) => config = config.with_router(router),
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let routed = match route_document_with_config(&source, &config) {
        Ok(routed) => routed,
        Err(Error::Document(e)) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let output = if cli.interchange {
        routed.interchange_toml()
    } else {
        routed.to_toml()
    };
    match output {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_overrides_verbosity() {
        let filter = env_filter(Some("bendpoint_router=trace"), false);
        assert_eq!(filter.to_string(), "bendpoint_router=trace");
    }

    #[test]
    fn test_verbosity_sets_default_level() {
        assert_eq!(env_filter(None, true).to_string(), "debug");
        assert_eq!(env_filter(None, false).to_string(), "warn");
    }
}
