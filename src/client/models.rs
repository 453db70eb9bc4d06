//! Request and response models for the scan integration API

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::error::{ConfigError, Result};

/// Fixed language label sent with every scan.
///
/// The upstream API requires one; the project language is not detected.
pub const SCAN_LANGUAGE: &str = "python";

/// Caller label used in generated scan names
pub const DEFAULT_CALLER: &str = "Intrucept CLI";

/// Kind of scan to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScanType {
    /// Static application security testing (source code)
    Sast,
    /// Software composition analysis (dependencies)
    Sca,
}

impl ScanType {
    /// Upper-case label used in messages and scan names
    pub fn label(self) -> &'static str {
        match self {
            ScanType::Sast => "SAST",
            ScanType::Sca => "SCA",
        }
    }

    /// Integration endpoint path for this scan type
    pub fn endpoint_path(self) -> &'static str {
        match self {
            ScanType::Sast => "performSASTScan",
            ScanType::Sca => "performSCAScan",
        }
    }

    /// Scan name sent upstream, e.g. `New SAST Scan from Intrucept CLI`
    pub fn scan_name(self, caller: &str) -> String {
        format!("New {} Scan from {}", self.label(), caller)
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single scan submission
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub archive_path: PathBuf,
    pub scan_type: ScanType,
    pub application_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub scan_name: String,
    pub language: String,
}

impl ScanRequest {
    /// Build a request from the project config.
    ///
    /// Fails if any required key is missing.
    pub fn new(
        archive_path: &Path,
        scan_type: ScanType,
        config: &ScanConfig,
        caller: &str,
    ) -> Result<Self> {
        let (Some(application_id), Some(client_id), Some(client_secret)) = (
            config.application_id(),
            config.client_id(),
            config.client_secret(),
        ) else {
            return Err(ConfigError::MissingKeys(config.missing_keys()).into());
        };

        Ok(Self {
            archive_path: archive_path.to_path_buf(),
            scan_type,
            application_id: application_id.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            scan_name: scan_type.scan_name(caller),
            language: SCAN_LANGUAGE.to_string(),
        })
    }
}

/// Response body of a scan submission.
///
/// The service returns the table at the top level (`{"vulnsTable": ...}`).
/// A table nested under `data` is also accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    /// Preformatted vulnerability report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulns_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ScanData>,
}

/// Payload under `data`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulns_table: Option<String>,
}

impl ScanResponse {
    /// Parse a response body. Bodies that don't match the expected shape
    /// (including empty and non-JSON bodies) are treated as carrying no data.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|e| {
            debug!("Response body did not match expected shape: {}", e);
            Self::default()
        })
    }

    fn table(&self) -> Option<&str> {
        self.vulns_table
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.vulns_table.as_deref()))
    }

    pub fn outcome(&self) -> ScanOutcome {
        match self.table() {
            Some(table) if table.trim().is_empty() => ScanOutcome::NoVulnerabilities,
            Some(table) => ScanOutcome::Vulnerabilities(table.to_string()),
            None => ScanOutcome::NoData,
        }
    }
}

/// Result of a completed scan as reported to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "table", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Non-empty vulnerability table, reported verbatim
    Vulnerabilities(String),
    /// Table present but empty
    NoVulnerabilities,
    /// No vulnerability data in the response
    NoData,
}

impl ScanOutcome {
    /// User-facing message for this outcome
    pub fn message(&self, scan_type: ScanType) -> String {
        match self {
            ScanOutcome::Vulnerabilities(table) => table.clone(),
            ScanOutcome::NoVulnerabilities => "No vulnerabilities were found.".to_string(),
            ScanOutcome::NoData => format!(
                "{} scan completed, but no vulnerability data was returned.",
                scan_type
            ),
        }
    }
}
