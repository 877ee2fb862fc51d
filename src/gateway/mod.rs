//! Gateway: the one door between the site and its backend.
//!
//! DESIGN
//! ======
//! `ApiGateway` reads the session token, runs the request pipeline, hands the
//! request to a [`Transport`], and normalizes whatever comes back. Every call
//! is attempted exactly once; callers decide whether to retry.
//!
//! ERROR HANDLING
//! ==============
//! Calls never return transport errors directly. Every outcome is either the
//! response payload or an [`ApiFailure`] whose kind the caller can branch on.
//! A 401 additionally discards the stored token. Construction problems are
//! reported separately as [`GatewayError`].

pub mod config;
pub mod credential;
pub mod failure;
pub mod pipeline;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

pub use config::{GatewayConfig, GatewayTimeouts};
pub use credential::{CredentialStore, FileCredentialStore, MemoryCredentialStore, Session, StoreError, TOKEN_KEY};
pub use failure::{ApiFailure, ApiResult, FailureKind};
pub use pipeline::{ForbiddenPolicy, OutgoingRequest, Pipeline, RequestStage};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};

// =============================================================================
// ERROR
// =============================================================================

/// Errors building a gateway. Per-call failures are [`ApiFailure`] instead.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The base URL is not an absolute http(s) URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// CALL
// =============================================================================

/// One API call: method, path, optional JSON body, and its 403 policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub forbidden: ForbiddenPolicy,
}

impl ApiCall {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, forbidden: ForbiddenPolicy::Fail }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns an `Unknown` failure if `body` cannot be represented as JSON.
    pub fn with_json<T: Serialize + ?Sized>(self, body: &T) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiFailure::unexpected_payload(None, format!("request body encode failed: {e}")))?;
        Ok(self.with_body(value))
    }

    #[must_use]
    pub fn with_forbidden(mut self, policy: ForbiddenPolicy) -> Self {
        self.forbidden = policy;
        self
    }

    /// Shorthand for [`ForbiddenPolicy::TreatAsEmpty`].
    #[must_use]
    pub fn forbidden_as_empty(self) -> Self {
        self.with_forbidden(ForbiddenPolicy::TreatAsEmpty)
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

/// Shared API client. Cheap to clone; clones share transport and storage.
#[derive(Clone)]
pub struct ApiGateway {
    transport: Arc<dyn Transport>,
    pipeline: Arc<Pipeline>,
    session: Session,
}

impl ApiGateway {
    /// Gateway over HTTP with the standard pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(config: GatewayConfig, store: Arc<dyn CredentialStore>) -> Result<Self, GatewayError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), store))
    }

    /// Gateway over any transport, with the standard pipeline.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, store: Arc<dyn CredentialStore>) -> Self {
        Self { transport, pipeline: Arc::new(Pipeline::standard()), session: Session::new(store) }
    }

    /// Replace the request pipeline.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = Arc::new(pipeline);
        self
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn get(&self, path: &str) -> ApiResult<Value> {
        self.send(ApiCall::get(path)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.send(ApiCall::post(path).with_body(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.send(ApiCall::put(path).with_body(body)).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.send(ApiCall::delete(path)).await
    }

    /// Issue one call and normalize its outcome.
    pub async fn send(&self, call: ApiCall) -> ApiResult<Value> {
        let ApiCall { method, path, body, forbidden } = call;
        let credential = self.session.token();

        tracing::debug!(%method, %path, token_present = credential.is_some(), "api request");
        let request = self
            .pipeline
            .prepare(OutgoingRequest::new(method.clone(), path.clone(), body), credential.as_deref());

        let exchange = self.transport.send(request).await;
        let outcome = pipeline::normalize(exchange, forbidden);

        match &outcome {
            Ok(_) => tracing::debug!(%method, %path, "api response ok"),
            Err(failure) => {
                tracing::warn!(
                    %method,
                    %path,
                    kind = %failure.kind(),
                    status = ?failure.status(),
                    detail = failure.detail().unwrap_or(""),
                    "api call failed"
                );
                if failure.is_auth_error() {
                    self.discard_credential();
                }
            }
        }
        outcome
    }

    fn discard_credential(&self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "failed to clear session token after 401");
        }
    }
}

impl std::fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("pipeline", &self.pipeline)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
