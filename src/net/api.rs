//! Typed site endpoints over the gateway.
//!
//! ERROR HANDLING
//! ==============
//! Every method returns [`ApiResult`]. A success payload of the wrong shape is
//! reported as an `Unknown` failure with no status, so pages only ever branch
//! on the gateway's failure kinds.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{AuthSession, Credentials, NewReview, Quote, QuoteRequest, Registration, Review, User};
use crate::gateway::{ApiCall, ApiFailure, ApiGateway, ApiResult, ForbiddenPolicy};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const REVIEWS_PATH: &str = "/api/reviews";
pub const QUOTES_PATH: &str = "/api/quotes";

/// The site's API surface.
#[derive(Debug, Clone)]
pub struct SiteApi {
    gateway: ApiGateway,
}

impl SiteApi {
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    #[must_use]
    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Whether a session token is stored. Pages use this to choose between the
    /// review form and the sign-in prompt.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.gateway.session().is_authenticated()
    }

    /// Sign in and store the returned token.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthSession> {
        let call = ApiCall::post(LOGIN_PATH).with_json(credentials)?;
        self.authenticate(call).await
    }

    /// Create an account and store the returned token.
    pub async fn register(&self, registration: &Registration) -> ApiResult<AuthSession> {
        let call = ApiCall::post(REGISTER_PATH).with_json(registration)?;
        self.authenticate(call).await
    }

    /// Forget the stored token. Safe to call when already signed out.
    ///
    /// # Errors
    ///
    /// Returns an `Unknown` failure if the credential store could not persist
    /// the removal.
    pub fn logout(&self) -> ApiResult<()> {
        self.gateway
            .session()
            .clear()
            .map_err(|e| ApiFailure::unexpected_payload(None, format!("session clear failed: {e}")))
    }

    /// Published reviews, newest first as ordered by the backend.
    pub async fn reviews(&self, forbidden: ForbiddenPolicy) -> ApiResult<Vec<Review>> {
        let body = self
            .gateway
            .send(ApiCall::get(REVIEWS_PATH).with_forbidden(forbidden))
            .await?;
        decode_list(body)
    }

    /// Post a review as the signed-in user.
    pub async fn submit_review(&self, review: &NewReview) -> ApiResult<Review> {
        let call = ApiCall::post(REVIEWS_PATH).with_json(review)?;
        let body = self.gateway.send(call).await?;
        decode_data(body)
    }

    /// Send a quote request. No sign-in needed.
    pub async fn submit_quote(&self, quote: &QuoteRequest) -> ApiResult<Quote> {
        let call = ApiCall::post(QUOTES_PATH).with_json(quote)?;
        let body = self.gateway.send(call).await?;
        decode_data(body)
    }

    async fn authenticate(&self, call: ApiCall) -> ApiResult<AuthSession> {
        let body = self.gateway.send(call).await?;
        let session = extract_auth_session(&body)?;
        self.gateway
            .session()
            .save(&session.access_token)
            .map_err(|e| ApiFailure::unexpected_payload(None, format!("session save failed: {e}")))?;
        Ok(session)
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// `access_token` at the top level, or nested under `data`.
fn extract_auth_session(body: &Value) -> ApiResult<AuthSession> {
    let found = [body, &body["data"]].into_iter().find_map(|scope| {
        scope
            .get("access_token")
            .and_then(Value::as_str)
            .map(|token| (scope, token))
    });
    let Some((scope, token)) = found else {
        return Err(ApiFailure::unexpected_payload(None, "auth response has no access_token"));
    };
    if token.trim().is_empty() {
        return Err(ApiFailure::unexpected_payload(None, "auth response has an empty access_token"));
    }

    let user = scope
        .get("user")
        .and_then(|user| serde_json::from_value::<User>(user.clone()).ok());
    Ok(AuthSession { access_token: token.to_owned(), user })
}

/// Items of a `{data: [...]}` envelope. Missing or null `data` is empty.
fn decode_list<T: DeserializeOwned>(body: Value) -> ApiResult<Vec<T>> {
    match data_of(body) {
        Value::Null => Ok(Vec::new()),
        items => decode(items),
    }
}

/// The `data` member of a success envelope, or the body itself.
fn decode_data<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    decode(data_of(body))
}

fn data_of(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ApiFailure::unexpected_payload(None, format!("response decode failed: {e}")))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
