//! D-Rock Construction site client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page of the site reaches the backend through [`gateway::ApiGateway`].
//! The gateway attaches the stored session token, talks HTTP, and folds every
//! outcome into [`gateway::ApiResult`]. [`net::SiteApi`] layers the typed
//! quote, review, and auth endpoints on top.

pub mod gateway;
pub mod net;

pub use gateway::{
    ApiCall, ApiFailure, ApiGateway, ApiResult, CredentialStore, FailureKind, FileCredentialStore, ForbiddenPolicy,
    GatewayConfig, GatewayError, MemoryCredentialStore, Session,
};
pub use net::SiteApi;
