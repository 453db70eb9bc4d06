//! Command execution context
//!
//! Resolves the project directory and builds the API client once per command.

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::IntruceptClient;
use crate::error::Result;
use crate::scan::Project;

/// Context for command execution containing the project, client, and options.
pub struct CommandContext {
    /// Opened project root
    pub project: Project,
    /// Scan API client (custom host if overridden)
    pub client: IntruceptClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if the project directory cannot be opened or the HTTP
    /// client cannot be built.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let project = Project::open(opts.project_root())?;
        let client = match opts.api_host_ref() {
            Some(host) => IntruceptClient::with_host(Some(host.to_string()))?,
            None => IntruceptClient::new()?,
        };

        Ok(Self {
            project,
            client,
            format: opts.format,
        })
    }
}
