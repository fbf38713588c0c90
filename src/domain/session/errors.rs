//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SetupSessionId, StoreId};

/// Setup-session errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SetupSessionId),
    /// No store connection exists to attach a session to.
    StoreNotConnected(StoreId),
    /// Session is completed or abandoned.
    Closed,
    /// Invalid state for the operation.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SetupSessionId) -> Self {
        SessionError::NotFound(id)
    }

    pub fn store_not_connected(id: StoreId) -> Self {
        SessionError::StoreNotConnected(id)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::StoreNotConnected(_) => ErrorCode::StoreNotFound,
            SessionError::Closed => ErrorCode::SessionClosed,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::StoreNotConnected(id) => {
                format!("No store connection for store: {}", id)
            }
            SessionError::Closed => "Cannot modify a closed session".to_string(),
            SessionError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => SessionError::InvalidState(err.to_string()),
            ErrorCode::SessionClosed => SessionError::Closed,
            ErrorCode::InvalidStateTransition => SessionError::InvalidState(err.to_string()),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}
