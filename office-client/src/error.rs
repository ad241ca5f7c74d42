//! Client error types

use shared::ServiceError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status carrying an envelope message
    #[error("Service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            // The server spoke: keep its words for the user
            ClientError::Api { message, .. } => ServiceError::Rejected {
                message: Some(message),
            },
            ClientError::InvalidResponse(msg) => ServiceError::InvalidResponse(msg),
            ClientError::Serialization(e) => ServiceError::InvalidResponse(e.to_string()),
            other => ServiceError::Transport(other.to_string()),
        }
    }
}
