//! Mock scan API client for testing
//!
//! Records each submission (including whether the archive existed at the
//! time of the call) and returns a configured response or error.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::ScanApi;
use super::models::{ScanRequest, ScanResponse, ScanType};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockScanClient::new()
///     .with_body(r#"{"vulnsTable":""}"#)
///     .await;
/// ```
#[derive(Default)]
pub struct MockScanClient {
    /// Response returned from submit_scan
    response: Arc<Mutex<ScanResponse>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Never resolve submit_scan
    hang: Arc<Mutex<bool>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A captured submission for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub scan_type: ScanType,
    pub application_id: String,
    pub scan_name: String,
    /// Whether the archive file existed when the request was made
    pub archive_present: bool,
    /// Archive size at request time
    pub archive_bytes: u64,
}

impl MockScanClient {
    /// Create a mock returning an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the response from a raw body, parsed like a real response.
    pub async fn with_body(self, body: &str) -> Self {
        *self.response.lock().await = ScanResponse::from_body(body);
        self
    }

    /// Configure an error to return on the next call.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Make submit_scan wait forever.
    pub async fn hanging(self) -> Self {
        *self.hang.lock().await = true;
        self
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }
}

#[async_trait]
impl ScanApi for MockScanClient {
    async fn submit_scan(&self, request: &ScanRequest) -> Result<ScanResponse> {
        let metadata = std::fs::metadata(&request.archive_path).ok();
        self.captured_requests.lock().await.push(CapturedRequest {
            scan_type: request.scan_type,
            application_id: request.application_id.clone(),
            scan_name: request.scan_name.clone(),
            archive_present: metadata.is_some(),
            archive_bytes: metadata.map(|m| m.len()).unwrap_or(0),
        });

        if *self.hang.lock().await {
            std::future::pending::<()>().await;
        }

        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }

        Ok(self.response.lock().await.clone())
    }
}
