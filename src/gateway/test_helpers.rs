//! Fake transport for unit tests: canned outcomes, recorded requests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use super::pipeline::OutgoingRequest;
use super::transport::{RawResponse, Transport, TransportError};
use super::{ApiGateway, MemoryCredentialStore};

pub(crate) struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<OutgoingRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(outcomes: Vec<Result<RawResponse, TransportError>>) -> Self {
        Self { outcomes: Mutex::new(outcomes.into()), requests: Mutex::new(Vec::new()) }
    }

    pub(crate) fn respond(status: u16, body: Value) -> Self {
        Self::new(vec![Ok(RawResponse::new(status, Some(body)))])
    }

    pub(crate) fn unreachable() -> Self {
        Self::new(vec![Err(TransportError::Connect("connection refused".into()))])
    }

    pub(crate) fn requests(&self) -> Vec<OutgoingRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response left".into())))
    }
}

/// Gateway over `transport` with an in-memory store holding `token`.
pub(crate) fn gateway_with(
    transport: &Arc<ScriptedTransport>,
    token: Option<&str>,
) -> (ApiGateway, Arc<MemoryCredentialStore>) {
    let store = Arc::new(token.map_or_else(MemoryCredentialStore::new, MemoryCredentialStore::with_token));
    let gateway = ApiGateway::with_transport(transport.clone(), store.clone());
    (gateway, store)
}
