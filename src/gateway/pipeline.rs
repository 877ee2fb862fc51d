//! Request/response pipeline.
//!
//! DESIGN
//! ======
//! Outgoing requests pass through an ordered list of stages, each a plain
//! function of the request and the current session token. The standard
//! pipeline sets JSON headers, then attaches the bearer token. Responses go
//! through [`normalize`], a pure function from the transport outcome to an
//! [`ApiResult`]. Side effects (clearing the token on 401, logging) stay in
//! the gateway so both halves can be tested without I/O.

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};

use super::failure::{ApiFailure, ApiResult};
use super::transport::{RawResponse, TransportError};

/// A request before it reaches the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub method: Method,
    /// Path relative to the configured base URL, e.g. `/api/reviews`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl OutgoingRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self { method, path: path.into(), headers: HeaderMap::new(), body }
    }
}

/// How a call wants HTTP 403 surfaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForbiddenPolicy {
    /// Report `Forbidden`.
    #[default]
    Fail,
    /// Succeed with an empty list envelope, `{"data": []}`.
    TreatAsEmpty,
}

// =============================================================================
// REQUEST STAGES
// =============================================================================

/// One request transform. `credential` is the session token read for this call.
pub trait RequestStage: Send + Sync {
    fn apply(&self, request: OutgoingRequest, credential: Option<&str>) -> OutgoingRequest;
}

impl<F> RequestStage for F
where
    F: Fn(OutgoingRequest, Option<&str>) -> OutgoingRequest + Send + Sync,
{
    fn apply(&self, request: OutgoingRequest, credential: Option<&str>) -> OutgoingRequest {
        self(request, credential)
    }
}

/// `Accept` and `Content-Type` set to JSON.
#[must_use]
pub fn json_headers(mut request: OutgoingRequest, _credential: Option<&str>) -> OutgoingRequest {
    let json = HeaderValue::from_static("application/json");
    request.headers.insert(ACCEPT, json.clone());
    request.headers.insert(CONTENT_TYPE, json);
    request
}

/// `Authorization: Bearer <token>` when a token is present.
///
/// A token that cannot be a header value is skipped and the request goes out
/// unauthenticated.
#[must_use]
pub fn bearer_auth(mut request: OutgoingRequest, credential: Option<&str>) -> OutgoingRequest {
    let Some(token) = credential else {
        request.headers.remove(AUTHORIZATION);
        return request;
    };
    match HeaderValue::from_str(&format!("Bearer {token}")) {
        Ok(mut value) => {
            value.set_sensitive(true);
            request.headers.insert(AUTHORIZATION, value);
        }
        Err(_) => {
            tracing::warn!(path = %request.path, "stored token is not a valid header value; sending unauthenticated");
            request.headers.remove(AUTHORIZATION);
        }
    }
    request
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Ordered request stages, fixed when the gateway is built.
pub struct Pipeline {
    stages: Vec<Box<dyn RequestStage>>,
}

impl Pipeline {
    /// No stages: requests go out exactly as built.
    #[must_use]
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// JSON headers, then bearer auth.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty().with_stage(json_headers).with_stage(bearer_auth)
    }

    /// Append a stage; it runs after every stage already present.
    #[must_use]
    pub fn with_stage(mut self, stage: impl RequestStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[must_use]
    pub fn prepare(&self, request: OutgoingRequest, credential: Option<&str>) -> OutgoingRequest {
        self.stages
            .iter()
            .fold(request, |request, stage| stage.apply(request, credential))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("stages", &self.stages.len()).finish()
    }
}

// =============================================================================
// RESPONSE NORMALIZATION
// =============================================================================

/// Classify a transport outcome.
///
/// 2xx yields the body (`null` when empty). Anything else becomes an
/// [`ApiFailure`], except 403 under [`ForbiddenPolicy::TreatAsEmpty`].
pub fn normalize(exchange: Result<RawResponse, TransportError>, forbidden: ForbiddenPolicy) -> ApiResult<Value> {
    let response = exchange.map_err(|e| ApiFailure::network(e.to_string()))?;
    match response.status {
        200..=299 => Ok(response.body.unwrap_or(Value::Null)),
        403 if forbidden == ForbiddenPolicy::TreatAsEmpty => Ok(empty_list()),
        status => Err(ApiFailure::from_response(status, response.body.as_ref())),
    }
}

/// The list envelope with no items.
#[must_use]
pub fn empty_list() -> Value {
    json!({ "data": [] })
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
