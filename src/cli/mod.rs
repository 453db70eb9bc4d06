//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod scan;
pub mod status;

pub use args::{GlobalOptions, OutputFormat, ScanArgs};
pub use context::CommandContext;

/// Intrucept CLI - submit SAST and SCA scans to the Intrucept AppSecOps platform
#[derive(Parser, Debug)]
#[command(name = "intrucept")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "INTRUCEPT_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Project root to scan (defaults to the current directory)
    #[arg(long, short = 'C', global = true, env = "INTRUCEPT_PROJECT", hide_env = true)]
    pub project: Option<PathBuf>,

    /// Override the API host
    #[arg(long, global = true, env = "INTRUCEPT_API_HOST", hide = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "INTRUCEPT_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package the project and submit a scan
    #[command(subcommand)]
    Scan(ScanCommands),

    /// Show the project's scan configuration status
    Status,

    /// Display version information
    Version,
}

/// Scan subcommands
#[derive(Subcommand, Debug)]
pub enum ScanCommands {
    /// Static application security testing of the project source
    #[command(after_help = "EXAMPLES:\n  \
        intrucept scan sast                      # Scan the current directory\n  \
        intrucept scan sast -C ~/src/api         # Scan another project\n  \
        intrucept scan sast --format json        # Result document for scripts")]
    Sast(ScanArgs),

    /// Software composition analysis of the project dependencies
    Sca(ScanArgs),
}
