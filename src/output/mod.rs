//! Reporting surfaces for scan progress and results
//!
//! - [`OutputSink`] - append-only text log with a reveal action
//! - [`StatusView`] - observable list of status lines
//! - [`json`] - machine-readable result envelope

use crate::cli::OutputFormat;

pub mod console;
pub mod json;
#[cfg(test)]
pub mod memory;
pub mod status;

pub use console::ConsoleSink;
#[cfg(test)]
pub use memory::MemorySink;
pub use status::StatusView;

/// Severity of a one-line user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Error,
}

/// Append-only output log shared by every scan invocation
pub trait OutputSink: Send + Sync {
    /// Append one entry to the log
    fn append_line(&self, line: &str);

    /// Bring the log to the user's attention
    fn reveal(&self) {}

    /// Show a transient notification
    fn notify(&self, notice: Notice, message: &str);
}

/// Create the console sink appropriate for an output format.
///
/// JSON output keeps stdout for the result document, so progress goes to
/// stderr.
pub fn console_for(format: OutputFormat) -> ConsoleSink {
    match format {
        OutputFormat::Pretty => ConsoleSink::stdout(),
        OutputFormat::Json => ConsoleSink::stderr(),
    }
}
