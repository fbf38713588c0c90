//! PostgreSQL implementation of StoreRepository.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, StoreId, Timestamp, UserId};
use crate::domain::store::{Platform, StoreConnection};
use crate::ports::StoreRepository;

/// PostgreSQL implementation of StoreRepository.
#[derive(Clone)]
pub struct PostgresStoreRepository {
    pool: PgPool,
}

impl PostgresStoreRepository {
    /// Creates a new PostgresStoreRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for PostgresStoreRepository {
    async fn save(&self, connection: &StoreConnection) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO stores (
                id, user_id, platform, access_token, refresh_token,
                store_name, store_domain, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(connection.id().as_uuid())
        .bind(connection.user_id().as_str())
        .bind(connection.platform().as_str())
        .bind(connection.access_token().expose_secret())
        .bind(connection.refresh_token().map(|t| t.expose_secret().as_str()))
        .bind(connection.store_name())
        .bind(connection.store_domain())
        .bind(connection.created_at().as_datetime())
        .bind(connection.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert store: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, connection: &StoreConnection) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE stores SET
                access_token = $2,
                refresh_token = $3,
                store_name = $4,
                store_domain = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(connection.id().as_uuid())
        .bind(connection.access_token().expose_secret())
        .bind(connection.refresh_token().map(|t| t.expose_secret().as_str()))
        .bind(connection.store_name())
        .bind(connection.store_domain())
        .bind(connection.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update store: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::StoreNotFound,
                format!("Store not found: {}", connection.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<StoreConnection>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, platform, access_token, refresh_token,
                   store_name, store_domain, created_at, updated_at
            FROM stores
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch store: {}", e),
            )
        })?;

        row.map(row_to_connection).transpose()
    }

    async fn find_by_user_and_platform(
        &self,
        user_id: &UserId,
        platform: Platform,
    ) -> Result<Option<StoreConnection>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, platform, access_token, refresh_token,
                   store_name, store_domain, created_at, updated_at
            FROM stores
            WHERE user_id = $1 AND platform = $2
            LIMIT 1
            "#,
        )
        .bind(user_id.as_str())
        .bind(platform.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch store by user: {}", e),
            )
        })?;

        row.map(row_to_connection).transpose()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn row_to_connection(row: sqlx::postgres::PgRow) -> Result<StoreConnection, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| db_err("Failed to get user_id", e))?;
    let platform_str: String = row
        .try_get("platform")
        .map_err(|e| db_err("Failed to get platform", e))?;
    let access_token: String = row
        .try_get("access_token")
        .map_err(|e| db_err("Failed to get access_token", e))?;
    let refresh_token: Option<String> = row
        .try_get("refresh_token")
        .map_err(|e| db_err("Failed to get refresh_token", e))?;
    let store_name: String = row
        .try_get("store_name")
        .map_err(|e| db_err("Failed to get store_name", e))?;
    let store_domain: Option<String> = row
        .try_get("store_domain")
        .map_err(|e| db_err("Failed to get store_domain", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("Failed to get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_err("Failed to get updated_at", e))?;

    let user_id = UserId::new(user_id).map_err(|e| db_err("Invalid user_id", e))?;
    let platform: Platform = platform_str
        .parse()
        .map_err(|e| db_err("Invalid platform", e))?;

    Ok(StoreConnection::reconstitute(
        StoreId::from_uuid(id),
        user_id,
        platform,
        Secret::new(access_token),
        refresh_token.map(Secret::new),
        store_name,
        store_domain,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
