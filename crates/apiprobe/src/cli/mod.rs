/// Command-line interface module for the probe.
pub mod commands;
use clap::Parser;
use std::path::PathBuf;

/// CLI configuration structure.
///
/// Running without arguments performs the probe with `.env` and the process
/// environment as the only inputs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file layered over the built-in defaults
    #[arg(long, value_name = "FILE", env = "APIPROBE_CONFIG")]
    pub config: Option<String>,

    /// Env file to pre-seed the environment from; fails if unreadable.
    /// Without it, `.env` in the working directory is used when present.
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,
}

/// Parses command-line arguments into the Cli structure.
///
/// # Returns
/// * `Cli` - Parsed CLI configuration
pub fn parse_cli() -> Cli {
    Cli::parse()
}
