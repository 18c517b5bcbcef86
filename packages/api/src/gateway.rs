//! # Remote record gateway
//!
//! [`Gateway`] turns a [`Call`] into either a decoded success value or an
//! [`ApiError`]. It is the only place that knows how the service reports
//! failures, so every screen gets the same behavior:
//!
//! 1. If the call requires auth and the [`CredentialStore`] holds a token, send
//!    `Authorization: Bearer <token>`. Otherwise send without it and let the
//!    server decide.
//! 2. Any non-2xx status is a failure. The banner text is the body's `error`
//!    field when present, else the caller's fallback.
//! 3. No response at all, or a body that does not decode, is reported with the
//!    caller's fallback too. The two cases differ only in `status`.
//!
//! The gateway owns no UI state and performs no retries.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::CredentialStore;

use crate::error::ApiError;
use crate::transport::{ApiRequest, Method, Transport};

/// Description of one request, before credentials are attached.
#[derive(Clone, Debug)]
pub struct Call {
    method: Method,
    path: String,
    body: Result<Option<Value>, String>,
    authenticated: bool,
}

impl Call {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: Ok(None),
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Self {
        self.body = serde_json::to_value(body)
            .map(Some)
            .map_err(|e| e.to_string());
        self
    }

    /// Send without a bearer token even when one is stored.
    pub fn public(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Extract the server's `error` message from a failure body.
fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.error.filter(|message| !message.trim().is_empty())
}

/// Request executor shared by every screen.
#[derive(Clone, Debug)]
pub struct Gateway<T, S> {
    transport: T,
    credentials: S,
}

impl<T: Transport, S: CredentialStore> Gateway<T, S> {
    pub fn new(transport: T, credentials: S) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn credentials(&self) -> &S {
        &self.credentials
    }

    /// Execute `call`, decoding a success body as `R`.
    ///
    /// `fallback` is the operation-specific message used whenever the server
    /// does not supply one.
    pub async fn call<R: DeserializeOwned>(&self, call: Call, fallback: &str) -> Result<R, ApiError> {
        let body = call.body.map_err(|e| {
            tracing::error!(path = %call.path, "request body could not be encoded: {e}");
            ApiError::new(None, fallback)
        })?;

        let bearer = if call.authenticated {
            self.credentials.load().map(|credential| credential.token)
        } else {
            None
        };

        tracing::debug!(
            method = call.method.as_str(),
            path = %call.path,
            authenticated = bearer.is_some(),
            "sending request"
        );

        let request = ApiRequest {
            method: call.method,
            path: call.path,
            bearer,
            body,
        };
        let method = request.method;
        let path = request.path.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(method = method.as_str(), %path, "request failed: {e}");
                return Err(ApiError::new(None, fallback));
            }
        };

        if !response.is_success() {
            let message = server_message(&response.body).unwrap_or_else(|| fallback.to_string());
            tracing::warn!(
                method = method.as_str(),
                %path,
                status = response.status,
                "request rejected: {message}"
            );
            return Err(ApiError::new(Some(response.status), message));
        }

        // Empty 2xx bodies (e.g. 204 on DELETE) decode as `null`.
        let text = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(text).map_err(|e| {
            tracing::warn!(
                method = method.as_str(),
                %path,
                status = response.status,
                "undecodable response: {e}"
            );
            ApiError::new(Some(response.status), fallback)
        })
    }
}
