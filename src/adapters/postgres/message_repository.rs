//! PostgreSQL implementation of MessageRepository.
//!
//! Message metadata persists as JSONB. Rows whose metadata fails to parse
//! as a known action shape come back as `MessageMetadata::None` rather than
//! erroring - old or foreign payloads never break a conversation load.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::conversation::{ChatMessage, MessageMetadata, Role};
use crate::domain::foundation::{DomainError, ErrorCode, MessageId, SetupSessionId, Timestamp};
use crate::ports::MessageRepository;

/// PostgreSQL implementation of MessageRepository.
#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    /// Creates a new PostgresMessageRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn save(&self, message: &ChatMessage) -> Result<(), DomainError> {
        let metadata = serde_json::to_value(message.metadata()).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize metadata: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO messages (id, session_id, role, content, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(message.session_id().as_uuid())
        .bind(message.role().as_str())
        .bind(message.content())
        .bind(metadata)
        .bind(message.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert message: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SetupSessionId,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, role, content, metadata, created_at
            FROM messages
            WHERE session_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch messages: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_message).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn row_to_message(row: sqlx::postgres::PgRow) -> Result<ChatMessage, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
    let session_id: uuid::Uuid = row
        .try_get("session_id")
        .map_err(|e| db_err("Failed to get session_id", e))?;
    let role_str: String = row
        .try_get("role")
        .map_err(|e| db_err("Failed to get role", e))?;
    let content: String = row
        .try_get("content")
        .map_err(|e| db_err("Failed to get content", e))?;
    let metadata: Option<serde_json::Value> = row
        .try_get("metadata")
        .map_err(|e| db_err("Failed to get metadata", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("Failed to get created_at", e))?;

    let role: Role = role_str.parse().map_err(|e| db_err("Invalid role", e))?;
    let metadata = metadata
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or(MessageMetadata::None);

    Ok(ChatMessage::reconstitute(
        MessageId::from_uuid(id),
        SetupSessionId::from_uuid(session_id),
        role,
        content,
        metadata,
        Timestamp::from_datetime(created_at),
    ))
}
