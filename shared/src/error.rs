//! Service error type
//!
//! Explicit `success:false` answers and transport failures are both
//! represented here so call sites handle them identically.

use thiserror::Error;

/// Error returned by staff-zone service calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered `success:false`
    #[error("Rejected by service: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// The request never produced an envelope (network, timeout, HTTP failure)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The envelope could not be decoded or lacked its payload
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: Some(message.into()),
        }
    }

    /// Server-provided message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }

    /// Text to show the user: the server's message verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// Result type for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;
