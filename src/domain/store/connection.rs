//! Store connection entity.

use secrecy::Secret;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StoreId, Timestamp, UserId, ValidationError};

/// Storefront platform a connection points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Zid,
    Salla,
    Other,
}

impl Platform {
    /// Returns the lowercase platform name as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Zid => "zid",
            Platform::Salla => "salla",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zid" => Ok(Platform::Zid),
            "salla" => Ok(Platform::Salla),
            "other" => Ok(Platform::Other),
            unknown => Err(ValidationError::invalid_format(
                "platform",
                format!("Unknown platform: {}", unknown),
            )),
        }
    }
}

/// OAuth-backed link between a user and their storefront.
///
/// Exactly one connection per (user, platform) pair is the steady state:
/// the OAuth callback updates in place when one exists, else inserts.
#[derive(Debug, Clone)]
pub struct StoreConnection {
    id: StoreId,
    user_id: UserId,
    platform: Platform,
    access_token: Secret<String>,
    refresh_token: Option<Secret<String>>,
    store_name: String,
    store_domain: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl StoreConnection {
    /// Creates a new store connection.
    pub fn new(
        user_id: UserId,
        platform: Platform,
        access_token: Secret<String>,
        refresh_token: Option<Secret<String>>,
        store_name: String,
        store_domain: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: StoreId::new(),
            user_id,
            platform,
            access_token,
            refresh_token,
            store_name,
            store_domain,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes a connection from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: StoreId,
        user_id: UserId,
        platform: Platform,
        access_token: Secret<String>,
        refresh_token: Option<Secret<String>>,
        store_name: String,
        store_domain: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            platform,
            access_token,
            refresh_token,
            store_name,
            store_domain,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &StoreId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn access_token(&self) -> &Secret<String> {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&Secret<String>> {
        self.refresh_token.as_ref()
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn store_domain(&self) -> Option<&str> {
        self.store_domain.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Replaces the credentials and identity after a re-authorization.
    ///
    /// This is the update half of the (user, platform) upsert: the id and
    /// ownership never change, only tokens and store identity.
    pub fn refresh_credentials(
        &mut self,
        access_token: Secret<String>,
        refresh_token: Option<Secret<String>>,
        store_name: String,
        store_domain: Option<String>,
    ) {
        self.access_token = access_token;
        self.refresh_token = refresh_token;
        self.store_name = store_name;
        self.store_domain = store_domain;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn connection() -> StoreConnection {
        StoreConnection::new(
            UserId::new("user-1").unwrap(),
            Platform::Zid,
            Secret::new("token-a".to_string()),
            None,
            "My Store".to_string(),
            Some("mystore.zid.store".to_string()),
        )
    }

    #[test]
    fn platform_roundtrips_through_str() {
        for platform in [Platform::Zid, Platform::Salla, Platform::Other] {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
        assert!("shopify".parse::<Platform>().is_err());
    }

    #[test]
    fn new_connection_keeps_identity() {
        let conn = connection();
        assert_eq!(conn.platform(), Platform::Zid);
        assert_eq!(conn.store_name(), "My Store");
        assert_eq!(conn.access_token().expose_secret(), "token-a");
    }

    #[test]
    fn refresh_credentials_keeps_id_and_owner() {
        let mut conn = connection();
        let id = *conn.id();

        conn.refresh_credentials(
            Secret::new("token-b".to_string()),
            Some(Secret::new("refresh-b".to_string())),
            "Renamed Store".to_string(),
            None,
        );

        assert_eq!(conn.id(), &id);
        assert_eq!(conn.user_id().as_str(), "user-1");
        assert_eq!(conn.access_token().expose_secret(), "token-b");
        assert_eq!(conn.store_name(), "Renamed Store");
        assert!(conn.store_domain().is_none());
    }
}
