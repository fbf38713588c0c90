//! Store connection error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::store::Platform;

/// Store connection errors (OAuth flow and publish guards).
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The OAuth `state` did not match the authenticated user.
    StateMismatch,
    /// No connection exists for the user on the platform.
    NotConnected { user_id: UserId, platform: Platform },
    /// The platform rejected or failed an upstream call.
    Platform(String),
    /// Client credentials are not configured.
    NotConfigured(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl StoreError {
    pub fn not_connected(user_id: UserId, platform: Platform) -> Self {
        StoreError::NotConnected { user_id, platform }
    }

    pub fn platform(message: impl Into<String>) -> Self {
        StoreError::Platform(message.into())
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        StoreError::NotConfigured(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        StoreError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::StateMismatch => ErrorCode::Unauthorized,
            StoreError::NotConnected { .. } => ErrorCode::StoreNotFound,
            StoreError::Platform(_) => ErrorCode::PlatformError,
            StoreError::NotConfigured(_) => ErrorCode::PlatformError,
            StoreError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            StoreError::StateMismatch => "OAuth state does not match the signed-in user".to_string(),
            StoreError::NotConnected { platform, .. } => {
                format!("No {} store connected", platform)
            }
            StoreError::Platform(msg) => msg.clone(),
            StoreError::NotConfigured(msg) => msg.clone(),
            StoreError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for StoreError {}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        StoreError::Infrastructure(err.to_string())
    }
}
