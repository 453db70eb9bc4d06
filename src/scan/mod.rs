//! Scan orchestration
//!
//! Sequences one scan invocation:
//!
//! ```text
//! Idle -> Initiated -> ConfigLoaded -> Packaged -> Submitted -> Completed -> Idle
//!              \______________\______________\___________\---> Failed ----/
//! ```
//!
//! The archive is removed before returning to `Idle`, whatever the outcome.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use log::{debug, warn};

use crate::client::{ScanApi, ScanOutcome, ScanRequest, ScanType};
use crate::client::models::DEFAULT_CALLER;
use crate::config::ScanConfig;
use crate::error::{ConfigError, Error, Result};
use crate::output::{Notice, OutputSink, StatusView};
use crate::packager::{self, ARCHIVE_FILE_NAME};

mod cancel;

pub use cancel::CancelToken;

/// Hint shown next to every reported message in the status view
const SEE_OUTPUT: &str = "See Output for details";

/// Lifecycle of a single scan invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Initiated,
    ConfigLoaded,
    Packaged,
    Submitted,
    Completed,
    Failed,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanState::Idle => "idle",
            ScanState::Initiated => "initiated",
            ScanState::ConfigLoaded => "config loaded",
            ScanState::Packaged => "packaged",
            ScanState::Submitted => "submitted",
            ScanState::Completed => "completed",
            ScanState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// An open project directory
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub name: String,
}

impl Project {
    /// Open a project rooted at `root`
    pub fn open(root: &Path) -> Result<Self> {
        let root = std::fs::canonicalize(root)?;
        if !root.is_dir() {
            return Err(Error::Other(format!(
                "Project path is not a directory: {}",
                root.display()
            )));
        }
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        Ok(Self { root, name })
    }

    /// Where this project's archive is written
    pub fn archive_path(&self) -> PathBuf {
        self.root.join(ARCHIVE_FILE_NAME)
    }
}

/// Runs scans against an API client, reporting to injected surfaces
pub struct Orchestrator<A> {
    api: A,
    sink: Arc<dyn OutputSink>,
    status: Arc<StatusView>,
    caller: String,
}

impl<A: ScanApi> Orchestrator<A> {
    pub fn new(api: A, sink: Arc<dyn OutputSink>, status: Arc<StatusView>) -> Self {
        Self {
            api,
            sink,
            status,
            caller: DEFAULT_CALLER.to_string(),
        }
    }

    /// Label used in the generated scan name
    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = caller.into();
        self
    }

    /// Run one scan to completion or failure.
    ///
    /// Errors are reported to the sink and status view before being
    /// returned. The archive never outlives this call.
    pub async fn run(
        &self,
        project: &Project,
        scan_type: ScanType,
        cancel: &CancelToken,
    ) -> Result<ScanOutcome> {
        self.status.publish(
            ScanState::Initiated,
            vec![
                format!("{} Scan initiated on {}", scan_type, project.name),
                Local::now().format("%m/%d/%Y, %H:%M:%S").to_string(),
            ],
        );

        let archive = ArchiveGuard::new(project.archive_path());
        let result = self.execute(project, scan_type, cancel, &archive).await;

        if let Err(err) = &result {
            match err {
                Error::Config(ConfigError::Unavailable(_)) => {
                    self.report(ScanState::Failed, &err.to_string());
                }
                _ => {
                    let message = format!("Error during {} scan: {}", scan_type, err);
                    self.sink.notify(Notice::Error, &message);
                    self.report(ScanState::Failed, &message);
                }
            }
        }

        drop(archive);
        self.status.transition(ScanState::Idle);

        result
    }

    async fn execute(
        &self,
        project: &Project,
        scan_type: ScanType,
        cancel: &CancelToken,
        archive: &ArchiveGuard,
    ) -> Result<ScanOutcome> {
        self.report(
            ScanState::Initiated,
            &format!("Initiating {} scan on {}...", scan_type, project.name),
        );

        cancel.check()?;
        let config = ScanConfig::read(&project.root).ok_or_else(|| {
            ConfigError::Unavailable(crate::config::CONFIG_FILE_NAME.to_string())
        })?;
        config.validate()?;
        self.status.transition(ScanState::ConfigLoaded);

        cancel.check()?;
        let source = project.root.clone();
        let output = archive.path().to_path_buf();
        let summary =
            tokio::task::spawn_blocking(move || packager::package_project(&source, &output))
                .await
                .map_err(|e| Error::Other(format!("Packaging task failed: {}", e)))??;
        debug!(
            "Packaged {} files, {} directories into {} ({} bytes)",
            summary.files,
            summary.directories,
            archive.path().display(),
            summary.bytes
        );
        self.status.transition(ScanState::Packaged);

        cancel.check()?;
        let request = ScanRequest::new(archive.path(), scan_type, &config, &self.caller)?;
        self.report(
            ScanState::Packaged,
            &format!("Sending {} scan request...", scan_type),
        );

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            response = self.api.submit_scan(&request) => response?,
        };
        self.status.transition(ScanState::Submitted);

        self.sink.notify(
            Notice::Info,
            &format!("{} scan completed successfully.", scan_type),
        );

        let outcome = response.outcome();
        self.report(ScanState::Completed, &outcome.message(scan_type));

        Ok(outcome)
    }

    /// Append to the output log and mirror the message in the status view
    fn report(&self, state: ScanState, message: &str) {
        self.sink.append_line(message);
        self.sink.reveal();
        self.status
            .publish(state, vec![message.to_string(), SEE_OUTPUT.to_string()]);
    }
}

/// Removes the archive file on drop
struct ArchiveGuard {
    path: PathBuf,
}

impl ArchiveGuard {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArchiveGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed archive {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove archive {}: {}", self.path.display(), e),
        }
    }
}
