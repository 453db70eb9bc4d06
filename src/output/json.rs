//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

use crate::client::{ScanOutcome, ScanType};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the run
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Result document for a finished scan
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport<'a> {
    pub scan_type: ScanType,
    pub project: &'a str,
    pub outcome: &'a ScanOutcome,
    /// Same text reported to the output log
    pub message: String,
}

impl<'a> ScanReport<'a> {
    pub fn new(scan_type: ScanType, project: &'a str, outcome: &'a ScanOutcome) -> Self {
        Self {
            scan_type,
            project,
            outcome,
            message: outcome.message(scan_type),
        }
    }
}

/// Format data as pretty-printed JSON inside the metadata envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}
