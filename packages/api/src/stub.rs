use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::error::TransportError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Scripted Transport for testing.
///
/// Responses are queued up front and handed out in order; every request that
/// reaches the transport is recorded. An exhausted queue behaves like an
/// unreachable server. Clones share the queue and the log.
#[derive(Clone, Debug, Default)]
pub struct StubTransport {
    responses: Arc<Mutex<VecDeque<Result<ApiResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        lock(&self.responses).push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    /// Queue a JSON response.
    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        self.respond(status, body.to_string())
    }

    /// Queue a network-level failure.
    pub fn fail(&self, reason: impl Into<String>) -> &Self {
        lock(&self.responses).push_back(Err(TransportError(reason.into())));
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        lock(&self.requests).push(request);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no stubbed response".to_string())))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
