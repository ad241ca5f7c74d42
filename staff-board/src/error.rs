//! Board error types

use shared::ServiceError;
use thiserror::Error;

/// Staff board error type
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// Zone list could not be loaded
    #[error("Failed to load zones: {0}")]
    FetchZones(#[source] ServiceError),

    /// Staff list of one zone could not be loaded
    #[error("Failed to load staff for zone {zone_id}: {source}")]
    FetchStaff {
        zone_id: String,
        #[source]
        source: ServiceError,
    },

    /// Candidate staff list could not be loaded
    #[error("Failed to load staff: {0}")]
    FetchCandidates(#[source] ServiceError),

    /// `confirm_delete` called with no dialog open
    #[error("No deletion awaiting confirmation")]
    NoPendingDeletion,

    /// Add dialog action while the dialog is closed
    #[error("Add dialog is not open")]
    AddDialogClosed,
}

impl BoardError {
    /// Text for the page-level error state
    pub fn user_message(&self) -> String {
        match self {
            Self::FetchZones(source) => source.user_message("Failed to load zones"),
            Self::FetchStaff { source, .. } => source.user_message("Failed to load zone staff"),
            Self::FetchCandidates(source) => source.user_message("Failed to load staff"),
            other => other.to_string(),
        }
    }
}

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;
