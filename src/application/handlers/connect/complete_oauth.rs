//! CompleteOAuthHandler - finishes the platform OAuth dance.
//!
//! The authorize redirect sent the user's id as `state`; the callback must
//! present it back unchanged, or nothing is written. After the ownership
//! check: exchange the code, fetch the store identity, and upsert the
//! connection keyed by (user, platform).

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::store::{Platform, StoreConnection, StoreError};
use crate::ports::{ConnectorError, PlatformConnector, StoreRepository};

/// Command built from the OAuth callback query.
#[derive(Debug, Clone)]
pub struct CompleteOAuthCommand {
    /// The signed-in user completing the flow.
    pub user_id: UserId,
    /// Authorization code from the consent screen.
    pub code: String,
    /// The `state` echoed back by the platform.
    pub state: String,
}

/// Handler completing the OAuth connection.
pub struct CompleteOAuthHandler {
    connector: Arc<dyn PlatformConnector>,
    stores: Arc<dyn StoreRepository>,
}

impl CompleteOAuthHandler {
    pub fn new(connector: Arc<dyn PlatformConnector>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { connector, stores }
    }

    pub async fn handle(&self, cmd: CompleteOAuthCommand) -> Result<StoreConnection, StoreError> {
        // Ownership check before any mutation: `state` carries the user id
        // that initiated the authorize redirect.
        if cmd.state != cmd.user_id.as_str() {
            tracing::warn!(user_id = %cmd.user_id, "OAuth state mismatch, rejecting callback");
            return Err(StoreError::StateMismatch);
        }

        let tokens = self
            .connector
            .exchange_code(&cmd.code)
            .await
            .map_err(map_connector_error)?;

        let identity = self
            .connector
            .fetch_store_identity(&tokens.access_token)
            .await
            .map_err(map_connector_error)?;

        let existing = self
            .stores
            .find_by_user_and_platform(&cmd.user_id, Platform::Zid)
            .await
            .map_err(|e| StoreError::infrastructure(e.to_string()))?;

        let connection = match existing {
            Some(mut connection) => {
                connection.refresh_credentials(
                    tokens.access_token,
                    tokens.refresh_token,
                    identity.name,
                    identity.domain,
                );
                self.stores
                    .update(&connection)
                    .await
                    .map_err(|e| StoreError::infrastructure(e.to_string()))?;
                connection
            }
            None => {
                let connection = StoreConnection::new(
                    cmd.user_id,
                    Platform::Zid,
                    tokens.access_token,
                    tokens.refresh_token,
                    identity.name,
                    identity.domain,
                );
                self.stores
                    .save(&connection)
                    .await
                    .map_err(|e| StoreError::infrastructure(e.to_string()))?;
                connection
            }
        };

        Ok(connection)
    }
}

fn map_connector_error(err: ConnectorError) -> StoreError {
    match err {
        ConnectorError::NotConfigured(msg) => StoreError::not_configured(msg),
        other => StoreError::platform(other.to_string()),
    }
}
