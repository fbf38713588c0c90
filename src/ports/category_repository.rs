//! Category repository port.

use crate::domain::catalog::DraftCategory;
use crate::domain::foundation::{CategoryId, DomainError, SetupSessionId};
use async_trait::async_trait;

/// Repository port for draft categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Save a new draft category.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, category: &DraftCategory) -> Result<(), DomainError>;

    /// Update an existing category (edits, publish outcomes).
    ///
    /// # Errors
    ///
    /// - `CategoryNotFound` if the category doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, category: &DraftCategory) -> Result<(), DomainError>;

    /// Find a category by its ID.
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<DraftCategory>, DomainError>;

    /// All categories of a session, oldest first.
    async fn find_by_session(
        &self,
        session_id: &SetupSessionId,
    ) -> Result<Vec<DraftCategory>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CategoryRepository) {}
    }
}
