//! Auth provider port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;

/// The verified identity behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
}

/// Errors from bearer token verification.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No credentials were presented.
    #[error("Missing credentials")]
    MissingCredentials,

    /// The token failed verification.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Port for verifying request credentials.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verifies a bearer token and returns the user behind it.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` if the token is expired, malformed, or forged
    async fn verify(&self, bearer_token: &str) -> Result<AuthenticatedUser, AuthError>;
}
