//! Failure taxonomy: every non-success call outcome, classified.
//!
//! DESIGN
//! ======
//! Callers branch on [`FailureKind`] (or the `is_*` predicates) and show
//! [`ApiFailure::message`] to the user. Only validation failures take their
//! message from the response body; every other kind uses its fixed wording so
//! raw server text never reaches the page. The body text is still kept in
//! [`ApiFailure::detail`] for logs.

use serde_json::Value;

/// Outcome of every gateway call: the payload, or a classified failure.
pub type ApiResult<T> = Result<T, ApiFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// HTTP 401. The stored session token has been discarded.
    AuthRequired,
    /// HTTP 403.
    Forbidden,
    /// HTTP 422.
    Validation,
    /// HTTP 5xx.
    ServerError,
    /// No response at all: refused, timed out, DNS failure.
    NetworkUnreachable,
    /// Any other non-success status, or a success body of the wrong shape.
    Unknown,
}

impl FailureKind {
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::AuthRequired,
            403 => Self::Forbidden,
            422 => Self::Validation,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            Self::AuthRequired => "Please log in to continue.",
            Self::Forbidden => "You don't have permission to perform this action.",
            Self::Validation => "Please check your input and try again.",
            Self::ServerError => "Something went wrong on our end. Please try again later.",
            Self::NetworkUnreachable => "Unable to connect to the server. Please check your internet connection.",
            Self::Unknown => "An unexpected error occurred. Please try again.",
        }
    }

    /// Stable snake-case name, used as a log field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthRequired => "auth_required",
            Self::Forbidden => "forbidden",
            Self::Validation => "validation",
            Self::ServerError => "server_error",
            Self::NetworkUnreachable => "network_unreachable",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified call failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiFailure {
    kind: FailureKind,
    message: String,
    status: Option<u16>,
    detail: Option<String>,
}

impl ApiFailure {
    /// Classify a non-success response.
    ///
    /// `body` is the decoded response body; its `error` field (when a string)
    /// becomes the detail, and the message for 422.
    #[must_use]
    pub fn from_response(status: u16, body: Option<&Value>) -> Self {
        let kind = FailureKind::from_status(status);
        let detail = body.and_then(body_error);
        let message = match (kind, &detail) {
            (FailureKind::Validation, Some(text)) => text.clone(),
            _ => kind.default_message().to_owned(),
        };
        Self { kind, message, status: Some(status), detail }
    }

    /// No response was received.
    #[must_use]
    pub fn network(detail: impl Into<String>) -> Self {
        let kind = FailureKind::NetworkUnreachable;
        Self { kind, message: kind.default_message().to_owned(), status: None, detail: Some(detail.into()) }
    }

    /// A response arrived but its payload could not be used.
    #[must_use]
    pub fn unexpected_payload(status: Option<u16>, detail: impl Into<String>) -> Self {
        let kind = FailureKind::Unknown;
        Self { kind, message: kind.default_message().to_owned(), status, detail: Some(detail.into()) }
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// User-facing text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the response, `None` when nothing was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Diagnostic text from the body or transport. Not for display.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        self.kind == FailureKind::AuthRequired
    }

    #[must_use]
    pub fn is_forbidden_error(&self) -> bool {
        self.kind == FailureKind::Forbidden
    }

    #[must_use]
    pub fn is_network_error(&self) -> bool {
        self.kind == FailureKind::NetworkUnreachable
    }
}

fn body_error(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
#[path = "failure_test.rs"]
mod tests;
