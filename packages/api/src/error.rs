//! Failure types for the remote record gateway.

/// A failed call to the remote service, already reduced to banner text.
///
/// Non-2xx responses, unreachable servers and undecodable bodies all end up
/// here. `status` is the HTTP code when a response arrived, `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The server rejected the bearer token (or its absence).
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

/// The transport could not produce a response at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_message_only() {
        let err = ApiError::new(Some(409), "la placa ya está registrada");
        assert_eq!(err.to_string(), "la placa ya está registrada");
    }

    #[test]
    fn test_unauthorized_needs_a_401() {
        assert!(ApiError::new(Some(401), "token expirado").is_unauthorized());
        assert!(!ApiError::new(Some(403), "permiso denegado").is_unauthorized());
        assert!(!ApiError::new(None, "error de conexión").is_unauthorized());
    }
}
