//! PostgreSQL implementation of SessionRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, Percentage, SetupSessionId, StoreId, Timestamp,
};
use crate::domain::session::{SessionStatus, SetupSession, SetupStep};
use crate::ports::SessionRepository;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &SetupSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO setup_sessions (
                id, store_id, status, current_step, completion_percentage,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.store_id().as_uuid())
        .bind(session.status().as_str())
        .bind(session.current_step().as_str())
        .bind(i16::from(session.completion_percentage().value()))
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert session: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, session: &SetupSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE setup_sessions SET
                status = $2,
                current_step = $3,
                completion_percentage = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.status().as_str())
        .bind(session.current_step().as_str())
        .bind(i16::from(session.completion_percentage().value()))
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SetupSessionId,
    ) -> Result<Option<SetupSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, store_id, status, current_step, completion_percentage,
                   created_at, updated_at
            FROM setup_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session: {}", e),
            )
        })?;

        row.map(row_to_session).transpose()
    }

    async fn find_active_by_store(
        &self,
        store_id: &StoreId,
    ) -> Result<Option<SetupSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, store_id, status, current_step, completion_percentage,
                   created_at, updated_at
            FROM setup_sessions
            WHERE store_id = $1 AND status = 'active'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(store_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch active session: {}", e),
            )
        })?;

        row.map(row_to_session).transpose()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<SetupSession, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
    let store_id: uuid::Uuid = row
        .try_get("store_id")
        .map_err(|e| db_err("Failed to get store_id", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| db_err("Failed to get status", e))?;
    let step_str: String = row
        .try_get("current_step")
        .map_err(|e| db_err("Failed to get current_step", e))?;
    let percentage: i16 = row
        .try_get("completion_percentage")
        .map_err(|e| db_err("Failed to get completion_percentage", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("Failed to get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_err("Failed to get updated_at", e))?;

    let status: SessionStatus = status_str
        .parse()
        .map_err(|e| db_err("Invalid status", e))?;
    let step: SetupStep = step_str
        .parse()
        .map_err(|e| db_err("Invalid current_step", e))?;
    let percentage = Percentage::try_new(percentage.clamp(0, 100) as u8)
        .map_err(|e| db_err("Invalid completion_percentage", e))?;

    Ok(SetupSession::reconstitute(
        SetupSessionId::from_uuid(id),
        StoreId::from_uuid(store_id),
        status,
        step,
        percentage,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
