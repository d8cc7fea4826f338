//! Request/response transport
//!
//! The session layer only needs "send this JSON envelope, give me the JSON
//! answer". [`Transport`] is that seam; [`HttpTransport`] implements it as a
//! POST to the provider's endpoint. Tests substitute an in-memory transport.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use zonesync_core::{Error, Result};

/// Public JSON endpoint of the netcup CCP API
pub const DEFAULT_ENDPOINT: &str = "https://ccp.netcup.net/run/webservice/servers/endpoint.php?JSON";

/// Exchanges one request envelope for one response envelope
///
/// Implementations perform exactly one exchange per call and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the decoded JSON answer
    async fn exchange(&self, request: &Value) -> Result<Value>;
}

/// HTTP implementation of [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport posting to `endpoint`
    ///
    /// `timeout` bounds every request, connect included.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The endpoint requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn exchange(&self, request: &Value) -> Result<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::transport(format!("HTTP request timed out: {}", e))
                } else {
                    Error::transport(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        tracing::debug!("netcup endpoint answered HTTP {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(match status.as_u16() {
                500..=599 => Error::transport(format!(
                    "netcup server error (transient): {} - {}",
                    status, error_text
                )),
                _ => Error::transport(format!("Unexpected HTTP status: {} - {}", status, error_text)),
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::transport(format!("Failed to parse response: {}", e)))
    }
}
