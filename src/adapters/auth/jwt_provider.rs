//! JWT implementation of the auth provider.
//!
//! Verifies HS256 bearer tokens signed with a shared secret. The `sub`
//! claim carries the user id.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::domain::foundation::UserId;
use crate::ports::{AuthError, AuthProvider, AuthenticatedUser};

/// Claims this core cares about.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

/// Shared-secret HS256 auth provider.
pub struct JwtAuthProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthProvider {
    /// Creates a provider verifying against the given secret and issuer.
    pub fn new(secret: &str, issuer: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn verify(&self, bearer_token: &str) -> Result<AuthenticatedUser, AuthError> {
        if bearer_token.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let token_data = decode::<Claims>(bearer_token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "bearer token rejected");
                AuthError::InvalidToken(e.to_string())
            })?;

        let id = UserId::new(token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(AuthenticatedUser { id })
    }
}
