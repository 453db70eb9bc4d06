//! Project scan configuration (`intrucept-config.txt`)
//!
//! The file lives in the project root and holds one `KEY=value` pair per line:
//!
//! ```text
//! APPLICATION_ID=abc123
//! CLIENT_ID=my-client
//! CLIENT_SECRET=s3cr3t
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{ConfigError, Result};

/// Name of the config file expected in the project root
pub const CONFIG_FILE_NAME: &str = "intrucept-config.txt";

pub const APPLICATION_ID: &str = "APPLICATION_ID";
pub const CLIENT_ID: &str = "CLIENT_ID";
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";

/// Keys that must be present before a scan request is attempted
pub const REQUIRED_KEYS: [&str; 3] = [APPLICATION_ID, CLIENT_ID, CLIENT_SECRET];

/// Credentials and identifiers read from the project config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanConfig {
    values: BTreeMap<String, String>,
}

impl ScanConfig {
    /// Path of the config file for a project root
    pub fn path_in(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE_NAME)
    }

    /// Read the config file from a project root.
    ///
    /// Returns `None` if the file cannot be read for any reason. The cause is
    /// logged but not surfaced.
    pub fn read(project_root: &Path) -> Option<Self> {
        let path = Self::path_in(project_root);
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let config = Self::parse(&contents);
                if config.is_empty() {
                    warn!("{} contains no KEY=value pairs", path.display());
                } else {
                    debug!("Read {} keys from {}", config.len(), path.display());
                }
                Some(config)
            }
            Err(e) => {
                warn!("Error reading config file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Parse `KEY=value` lines.
    ///
    /// Each line is split on the first `=` and both halves are trimmed. Lines
    /// without `=`, or with an empty key or value, are skipped.
    pub fn parse(contents: &str) -> Self {
        let values = contents
            .split('\n')
            .filter_map(|line| {
                let (key, value) = line.split_once('=')?;
                let (key, value) = (key.trim(), value.trim());
                if key.is_empty() || value.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.to_string()))
            })
            .collect();

        Self { values }
    }

    /// Ensure every required key is present
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_keys();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingKeys(missing).into())
        }
    }

    /// Required keys absent from this config, in declaration order
    pub fn missing_keys(&self) -> Vec<String> {
        REQUIRED_KEYS
            .iter()
            .filter(|key| !self.values.contains_key(**key))
            .map(|key| key.to_string())
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn application_id(&self) -> Option<&str> {
        self.get(APPLICATION_ID)
    }

    pub fn client_id(&self) -> Option<&str> {
        self.get(CLIENT_ID)
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.get(CLIENT_SECRET)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
