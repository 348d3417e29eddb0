//! Client error types.

use domain::services::ServiceError;
use thiserror::Error;

use crate::token::TokenError;

/// Error raised by an HTTP call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Token store error: {0}")]
    Token(#[from] TokenError),
}

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_decode() => ServiceError::Decode(e.to_string()),
            ClientError::Http(e) => ServiceError::Network(e.to_string()),
            ClientError::Status { status, message } => ServiceError::Status { status, message },
            ClientError::Decode(message) => ServiceError::Decode(message),
            ClientError::Unauthenticated => ServiceError::Unauthenticated,
            ClientError::Token(e) => ServiceError::Network(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_keeps_server_message() {
        let err: ServiceError = ClientError::Status {
            status: 409,
            message: Some("Email already taken".to_string()),
        }
        .into();
        assert_eq!(err.server_message(), Some("Email already taken"));
    }

    #[test]
    fn test_unauthenticated_maps_through() {
        let err: ServiceError = ClientError::Unauthenticated.into();
        assert_eq!(err, ServiceError::Unauthenticated);
    }

    #[test]
    fn test_decode_maps_through() {
        let err: ServiceError = ClientError::Decode("missing field `data`".into()).into();
        assert!(matches!(err, ServiceError::Decode(_)));
    }
}
