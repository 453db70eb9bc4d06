//! Scan submission API client

use async_trait::async_trait;

use crate::error::Result;

pub mod intrucept;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use intrucept::IntruceptClient;
#[cfg(test)]
pub use mock::MockScanClient;
pub use models::{ScanOutcome, ScanRequest, ScanResponse, ScanType};

/// Scan submission operations
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// Upload a packaged project and return the service's response.
    ///
    /// A single request is made; failures are not retried.
    async fn submit_scan(&self, request: &ScanRequest) -> Result<ScanResponse>;
}
