//! PostgreSQL implementation of ProfileRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Language, Timestamp, UserId};
use crate::domain::store::Profile;
use crate::ports::ProfileRepository;

/// PostgreSQL implementation of ProfileRepository.
#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a new PostgresProfileRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, preferred_language, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch profile: {}", e),
            )
        })?;

        row.map(row_to_profile).transpose()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn row_to_profile(row: sqlx::postgres::PgRow) -> Result<Profile, DomainError> {
    let id: String = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| db_err("Failed to get email", e))?;
    let name: Option<String> = row
        .try_get("name")
        .map_err(|e| db_err("Failed to get name", e))?;
    let language_str: String = row
        .try_get("preferred_language")
        .map_err(|e| db_err("Failed to get preferred_language", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("Failed to get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_err("Failed to get updated_at", e))?;

    let id = UserId::new(id).map_err(|e| db_err("Invalid profile id", e))?;
    let preferred_language: Language = language_str
        .parse()
        .map_err(|e| db_err("Invalid preferred_language", e))?;

    Ok(Profile::reconstitute(
        id,
        email,
        name,
        preferred_language,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
