//! PostgreSQL implementation of CategoryRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::catalog::{DraftCategory, DraftStatus};
use crate::domain::foundation::{
    BilingualText, CategoryId, DomainError, ErrorCode, SetupSessionId, Timestamp,
};
use crate::ports::CategoryRepository;

/// PostgreSQL implementation of CategoryRepository.
#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new PostgresCategoryRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn save(&self, category: &DraftCategory) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO categories (
                id, session_id, platform_id, name_ar, name_en,
                description_ar, description_en, parent_id, status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(category.id().as_uuid())
        .bind(category.session_id().as_uuid())
        .bind(category.platform_id())
        .bind(&category.name().ar)
        .bind(&category.name().en)
        .bind(category.description().map(|d| d.ar.as_str()))
        .bind(category.description().map(|d| d.en.as_str()))
        .bind(category.parent_id().map(|p| *p.as_uuid()))
        .bind(category.status().as_str())
        .bind(category.created_at().as_datetime())
        .bind(category.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert category: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, category: &DraftCategory) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE categories SET
                platform_id = $2,
                name_ar = $3,
                name_en = $4,
                description_ar = $5,
                description_en = $6,
                status = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(category.id().as_uuid())
        .bind(category.platform_id())
        .bind(&category.name().ar)
        .bind(&category.name().en)
        .bind(category.description().map(|d| d.ar.as_str()))
        .bind(category.description().map(|d| d.en.as_str()))
        .bind(category.status().as_str())
        .bind(category.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update category: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                format!("Category not found: {}", category.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<DraftCategory>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, platform_id, name_ar, name_en,
                   description_ar, description_en, parent_id, status,
                   created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch category: {}", e),
            )
        })?;

        row.map(row_to_category).transpose()
    }

    async fn find_by_session(
        &self,
        session_id: &SetupSessionId,
    ) -> Result<Vec<DraftCategory>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, platform_id, name_ar, name_en,
                   description_ar, description_en, parent_id, status,
                   created_at, updated_at
            FROM categories
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
                format!("Failed to fetch categories: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_category).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn row_to_category(row: sqlx::postgres::PgRow) -> Result<DraftCategory, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
    let session_id: uuid::Uuid = row
        .try_get("session_id")
        .map_err(|e| db_err("Failed to get session_id", e))?;
    let platform_id: Option<String> = row
        .try_get("platform_id")
        .map_err(|e| db_err("Failed to get platform_id", e))?;
    let name_ar: String = row
        .try_get("name_ar")
        .map_err(|e| db_err("Failed to get name_ar", e))?;
    let name_en: String = row
        .try_get("name_en")
        .map_err(|e| db_err("Failed to get name_en", e))?;
    let description_ar: Option<String> = row
        .try_get("description_ar")
        .map_err(|e| db_err("Failed to get description_ar", e))?;
    let description_en: Option<String> = row
        .try_get("description_en")
        .map_err(|e| db_err("Failed to get description_en", e))?;
    let parent_id: Option<uuid::Uuid> = row
        .try_get("parent_id")
        .map_err(|e| db_err("Failed to get parent_id", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| db_err("Failed to get status", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("Failed to get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_err("Failed to get updated_at", e))?;

    let name =
        BilingualText::name(name_ar, name_en).map_err(|e| db_err("Invalid category name", e))?;
    let description = match (description_ar, description_en) {
        (None, None) => None,
        (ar, en) => Some(BilingualText::free(
            ar.unwrap_or_default(),
            en.unwrap_or_default(),
        )),
    };
    let status: DraftStatus = status_str.parse().map_err(|e| db_err("Invalid status", e))?;

    Ok(DraftCategory::reconstitute(
        CategoryId::from_uuid(id),
        SetupSessionId::from_uuid(session_id),
        platform_id,
        name,
        description,
        parent_id.map(CategoryId::from_uuid),
        status,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
