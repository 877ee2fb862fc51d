//! HTTP transport: the only place the gateway touches the network.
//!
//! Thin reqwest wrapper. It returns whatever status came back; deciding what
//! that status means is the pipeline's job.

use serde_json::Value;

use super::config::{GatewayConfig, validate_base_url};
use super::pipeline::OutgoingRequest;
use super::GatewayError;

/// Status and decoded body of a received response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// `None` for an empty body. Non-JSON text is kept as a JSON string.
    pub body: Option<Value>,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }
}

/// The request never produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError>;
}

// =============================================================================
// REQWEST TRANSPORT
// =============================================================================

pub struct HttpTransport {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or the HTTP client
    /// fails to build.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        validate_base_url(config.base_url())?;
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request)
            .connect_timeout(config.timeouts.connect)
            .build()
            .map_err(|e| GatewayError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        let url = self.config.url_for(&request.path);
        let builder = self
            .http
            .request(request.method, url)
            .headers(request.headers);
        let builder = match request.body {
            Some(body) => builder.json(&body),
            None => builder,
        };

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_transport_error)?;

        Ok(RawResponse { status, body: decode_body(&text) })
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}

fn decode_body(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str(trimmed) {
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(trimmed.to_owned())),
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
