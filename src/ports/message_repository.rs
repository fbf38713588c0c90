//! Message repository port.

use crate::domain::conversation::ChatMessage;
use crate::domain::foundation::{DomainError, SetupSessionId};
use async_trait::async_trait;

/// Repository port for conversation messages.
///
/// Messages are append-only: there is no update or delete. Reads return
/// messages in `created_at` ascending order, the order the exchange
/// happened in.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message to its session's conversation.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, message: &ChatMessage) -> Result<(), DomainError>;

    /// All messages of a session, oldest first.
    async fn find_by_session(
        &self,
        session_id: &SetupSessionId,
    ) -> Result<Vec<ChatMessage>, DomainError>;
}
