//! Intrucept AppSecOps integration API client

use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, StatusCode};

use super::ScanApi;
use super::models::{ScanRequest, ScanResponse, ScanType};
use crate::error::{ApiError, PackageError, Result};
use crate::packager::ARCHIVE_FILE_NAME;

/// Production API host
pub const API_HOST: &str = "https://appsecops-api.intruceptlabs.com";

/// Integration API path, appended to the host
const API_PATH: &str = "/api/v1/integrations";

/// Client for the scan submission endpoints
pub struct IntruceptClient {
    http: HttpClient,
    base_url: String,
}

impl IntruceptClient {
    /// Create a client for the production API
    pub fn new() -> Result<Self> {
        Self::with_host(None)
    }

    /// Create a client for a custom API host (e.g. `http://localhost:8080`).
    ///
    /// No request timeout is applied.
    pub fn with_host(host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(concat!("intrucept/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let host = host.unwrap_or_else(|| API_HOST.to_string());
        let base_url = format!("{}{}", host.trim_end_matches('/'), API_PATH);

        Ok(Self { http, base_url })
    }

    /// Full endpoint URL for a scan type
    pub fn endpoint(&self, scan_type: ScanType) -> String {
        format!("{}/{}", self.base_url, scan_type.endpoint_path())
    }

    async fn build_form(request: &ScanRequest) -> Result<Form> {
        let archive = tokio::fs::read(&request.archive_path)
            .await
            .map_err(|e| PackageError::io(&request.archive_path, e))?;
        let file_name = request
            .archive_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ARCHIVE_FILE_NAME.to_string());
        debug!("Uploading {} ({} bytes)", file_name, archive.len());

        let file_part = Part::bytes(archive)
            .file_name(file_name)
            .mime_str("application/zip")
            .map_err(ApiError::from)?;

        Ok(Form::new()
            .part("projectZipFile", file_part)
            .text("applicationId", request.application_id.clone())
            .text("scanName", request.scan_name.clone())
            .text("language", request.language.clone()))
    }
}

#[async_trait]
impl ScanApi for IntruceptClient {
    async fn submit_scan(&self, request: &ScanRequest) -> Result<ScanResponse> {
        let form = Self::build_form(request).await?;
        let url = self.endpoint(request.scan_type);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header("Client-ID", request.client_id.as_str())
            .header("Client-Secret", request.client_secret.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        debug!("{} responded with {}", url, status);

        match status {
            status if status.is_success() => {
                let body = response.text().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to read response: {}", e))
                })?;
                Ok(ScanResponse::from_body(&body))
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}
