//! Conversation-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SetupSessionId};

/// Conversation turn errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationError {
    /// Session was not found.
    SessionNotFound(SetupSessionId),
    /// Validation failed (empty message content).
    ValidationFailed { field: String, message: String },
    /// The intent extractor failed at the transport level. The user turn is
    /// already persisted; no assistant turn was written.
    ExtractorFailed(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ConversationError {
    pub fn session_not_found(id: SetupSessionId) -> Self {
        ConversationError::SessionNotFound(id)
    }

    pub fn extractor_failed(message: impl Into<String>) -> Self {
        ConversationError::ExtractorFailed(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ConversationError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ConversationError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            ConversationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ConversationError::ExtractorFailed(_) => ErrorCode::ExtractorFailed,
            ConversationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ConversationError::SessionNotFound(id) => format!("Session not found: {}", id),
            ConversationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ConversationError::ExtractorFailed(_) => "Failed to process message".to_string(),
            ConversationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ConversationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConversationError {}

impl From<DomainError> for ConversationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::InvalidFormat => ConversationError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ConversationError::Infrastructure(err.to_string()),
        }
    }
}
