//! Session repository port.

use crate::domain::foundation::{DomainError, SetupSessionId, StoreId};
use crate::domain::session::SetupSession;
use async_trait::async_trait;

/// Repository port for SetupSession persistence.
///
/// The "at most one active session per store" invariant is advisory:
/// callers check `find_active_by_store` before `save`, and a race between
/// two creations can still produce two active sessions. No uniqueness
/// constraint backs it up.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &SetupSession) -> Result<(), DomainError>;

    /// Update an existing session (step/percentage advances).
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &SetupSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SetupSessionId)
        -> Result<Option<SetupSession>, DomainError>;

    /// Find the active session for a store, if any.
    async fn find_active_by_store(
        &self,
        store_id: &StoreId,
    ) -> Result<Option<SetupSession>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SessionRepository) {}
    }
}
