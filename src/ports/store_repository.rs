//! Store connection repository port.

use crate::domain::foundation::{DomainError, StoreId, UserId};
use crate::domain::store::{Platform, StoreConnection};
use async_trait::async_trait;

/// Repository port for store connections.
///
/// `find_by_user_and_platform` is the upsert discriminator for the OAuth
/// callback: update in place when a row exists, else insert.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Save a new store connection.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, connection: &StoreConnection) -> Result<(), DomainError>;

    /// Update an existing connection (token refresh, identity change).
    ///
    /// # Errors
    ///
    /// - `StoreNotFound` if the connection doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, connection: &StoreConnection) -> Result<(), DomainError>;

    /// Find a connection by its ID.
    async fn find_by_id(&self, id: &StoreId) -> Result<Option<StoreConnection>, DomainError>;

    /// Find the connection for a user on a platform, if any.
    async fn find_by_user_and_platform(
        &self,
        user_id: &UserId,
        platform: Platform,
    ) -> Result<Option<StoreConnection>, DomainError>;
}
