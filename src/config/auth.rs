//! Authentication configuration (JWT verification)

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HS256 bearer token verification
    pub jwt_secret: Option<String>,

    /// Expected token issuer
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl AuthConfig {
    /// Validate auth configuration
    ///
    /// The secret is mandatory in production; development falls back to an
    /// insecure built-in value so the server can boot without setup.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match &self.jwt_secret {
            Some(secret) if secret.len() < 32 => Err(ValidationError::AuthSecretTooShort),
            Some(_) => Ok(()),
            None if *environment == Environment::Production => {
                Err(ValidationError::MissingRequired("auth.jwt_secret"))
            }
            None => Ok(()),
        }
    }

    /// The effective secret, falling back to the development default.
    pub fn secret(&self) -> &str {
        self.jwt_secret
            .as_deref()
            .unwrap_or("launchkit-development-secret-not-for-production")
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            issuer: default_issuer(),
        }
    }
}

fn default_issuer() -> String {
    "launchkit".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_passes_in_development() {
        let config = AuthConfig::default();
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn missing_secret_fails_in_production() {
        let config = AuthConfig::default();
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn short_secret_is_rejected() {
        let config = AuthConfig {
            jwt_secret: Some("short".to_string()),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn long_secret_passes_everywhere() {
        let config = AuthConfig {
            jwt_secret: Some("0123456789abcdef0123456789abcdef".to_string()),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }
}
