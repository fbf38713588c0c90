//! Zid platform configuration (OAuth client + API base)

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Zid platform configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ZidConfig {
    /// OAuth client id
    pub client_id: Option<String>,

    /// OAuth client secret
    pub client_secret: Option<String>,

    /// Redirect URI registered with the platform
    pub redirect_uri: Option<String>,

    /// OAuth authority base URL
    #[serde(default = "default_oauth_base_url")]
    pub oauth_base_url: String,

    /// REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ZidConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OAuth client credentials are configured
    pub fn has_oauth_credentials(&self) -> bool {
        let set = |v: &Option<String>| v.as_ref().is_some_and(|s| !s.is_empty());
        set(&self.client_id) && set(&self.client_secret) && set(&self.redirect_uri)
    }

    /// Validate Zid configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(uri) = &self.redirect_uri {
            if !uri.starts_with("http://") && !uri.starts_with("https://") {
                return Err(ValidationError::InvalidRedirectUri);
            }
        }
        Ok(())
    }
}

impl Default for ZidConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            oauth_base_url: default_oauth_base_url(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_oauth_base_url() -> String {
    "https://oauth.zid.sa".to_string()
}

fn default_api_base_url() -> String {
    "https://api.zid.sa/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}
