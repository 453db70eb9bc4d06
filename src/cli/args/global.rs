//! Global CLI options shared across all commands

use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// The precedence is: CLI flag > environment variable > default. There is no
/// persisted configuration beyond the project's own config file.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, json)
    pub format: OutputFormat,

    /// Project root (defaults to the current directory)
    pub project: Option<PathBuf>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            project: cli.project.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Project root, falling back to `.`
    pub fn project_root(&self) -> &Path {
        self.project.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Get API host override as `Option<&str>`.
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}
