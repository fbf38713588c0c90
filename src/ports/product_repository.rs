//! Product repository port.

use crate::domain::catalog::DraftProduct;
use crate::domain::foundation::{DomainError, ProductId, SetupSessionId};
use async_trait::async_trait;

/// Repository port for draft products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Save a new draft product.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, product: &DraftProduct) -> Result<(), DomainError>;

    /// Update an existing product (edits, publish outcomes).
    ///
    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, product: &DraftProduct) -> Result<(), DomainError>;

    /// Find a product by its ID.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<DraftProduct>, DomainError>;

    /// All products of a session, oldest first.
    async fn find_by_session(
        &self,
        session_id: &SetupSessionId,
    ) -> Result<Vec<DraftProduct>, DomainError>;
}
