//! Database configuration (PostgreSQL)

use serde::Deserialize;

use super::error::ValidationError;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum pool connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }

    #[test]
    fn accepts_postgres_urls() {
        assert!(config("postgres://localhost/launchkit").validate().is_ok());
        assert!(config("postgresql://localhost/launchkit").validate().is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(config("mysql://localhost/launchkit").validate().is_err());
    }

    #[test]
    fn rejects_inverted_pool_sizes() {
        let mut cfg = config("postgres://localhost/launchkit");
        cfg.min_connections = 20;
        cfg.max_connections = 5;
        assert!(cfg.validate().is_err());
    }
}
