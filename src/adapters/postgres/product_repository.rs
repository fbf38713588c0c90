//! PostgreSQL implementation of ProductRepository.
//!
//! Variants and image lists persist as JSONB; the serde round-trip
//! preserves variant option order exactly.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::catalog::{DraftProduct, DraftStatus, NewDraftProduct, ProductVariant};
use crate::domain::foundation::{
    BilingualText, CategoryId, DomainError, ErrorCode, ProductId, SetupSessionId, Timestamp,
};
use crate::ports::ProductRepository;

/// PostgreSQL implementation of ProductRepository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a new PostgresProductRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn save(&self, product: &DraftProduct) -> Result<(), DomainError> {
        let variants = to_json(product.variants())?;
        let images = to_json(product.images())?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, session_id, platform_id, category_id, name_ar, name_en,
                description_ar, description_en, price, compare_at_price,
                cost_price, sku, barcode, weight, status, images, variants,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                      $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.session_id().as_uuid())
        .bind(product.platform_id())
        .bind(product.category_id().map(|c| *c.as_uuid()))
        .bind(&product.name().ar)
        .bind(&product.name().en)
        .bind(product.description().map(|d| d.ar.as_str()))
        .bind(product.description().map(|d| d.en.as_str()))
        .bind(product.price())
        .bind(product.compare_at_price())
        .bind(product.cost_price())
        .bind(product.sku())
        .bind(product.barcode())
        .bind(product.weight())
        .bind(product.status().as_str())
        .bind(images)
        .bind(variants)
        .bind(product.created_at().as_datetime())
        .bind(product.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert product: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, product: &DraftProduct) -> Result<(), DomainError> {
        let variants = to_json(product.variants())?;
        let images = to_json(product.images())?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                platform_id = $2,
                category_id = $3,
                name_ar = $4,
                name_en = $5,
                description_ar = $6,
                description_en = $7,
                price = $8,
                compare_at_price = $9,
                cost_price = $10,
                sku = $11,
                barcode = $12,
                weight = $13,
                status = $14,
                images = $15,
                variants = $16,
                updated_at = $17
            WHERE id = $1
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.platform_id())
        .bind(product.category_id().map(|c| *c.as_uuid()))
        .bind(&product.name().ar)
        .bind(&product.name().en)
        .bind(product.description().map(|d| d.ar.as_str()))
        .bind(product.description().map(|d| d.en.as_str()))
        .bind(product.price())
        .bind(product.compare_at_price())
        .bind(product.cost_price())
        .bind(product.sku())
        .bind(product.barcode())
        .bind(product.weight())
        .bind(product.status().as_str())
        .bind(images)
        .bind(variants)
        .bind(product.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update product: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                format!("Product not found: {}", product.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<DraftProduct>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, platform_id, category_id, name_ar, name_en,
                   description_ar, description_en, price, compare_at_price,
                   cost_price, sku, barcode, weight, status, images, variants,
                   created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch product: {}", e),
            )
        })?;

        row.map(row_to_product).transpose()
    }

    async fn find_by_session(
        &self,
        session_id: &SetupSessionId,
    ) -> Result<Vec<DraftProduct>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, platform_id, category_id, name_ar, name_en,
                   description_ar, description_en, price, compare_at_price,
                   cost_price, sku, barcode, weight, status, images, variants,
                   created_at, updated_at
            FROM products
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
                format!("Failed to fetch products: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_product).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn to_json<T: serde::Serialize>(value: Option<T>) -> Result<Option<serde_json::Value>, DomainError> {
    value
        .map(|v| serde_json::to_value(v))
        .transpose()
        .map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize JSON column: {}", e),
            )
        })
}

fn row_to_product(row: sqlx::postgres::PgRow) -> Result<DraftProduct, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| db_err("Failed to get id", e))?;
    let session_id: uuid::Uuid = row
        .try_get("session_id")
        .map_err(|e| db_err("Failed to get session_id", e))?;
    let platform_id: Option<String> = row
        .try_get("platform_id")
        .map_err(|e| db_err("Failed to get platform_id", e))?;
    let category_id: Option<uuid::Uuid> = row
        .try_get("category_id")
        .map_err(|e| db_err("Failed to get category_id", e))?;
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
    let price: f64 = row
        .try_get("price")
        .map_err(|e| db_err("Failed to get price", e))?;
    let compare_at_price: Option<f64> = row
        .try_get("compare_at_price")
        .map_err(|e| db_err("Failed to get compare_at_price", e))?;
    let cost_price: Option<f64> = row
        .try_get("cost_price")
        .map_err(|e| db_err("Failed to get cost_price", e))?;
    let sku: Option<String> = row
        .try_get("sku")
        .map_err(|e| db_err("Failed to get sku", e))?;
    let barcode: Option<String> = row
        .try_get("barcode")
        .map_err(|e| db_err("Failed to get barcode", e))?;
    let weight: Option<f64> = row
        .try_get("weight")
        .map_err(|e| db_err("Failed to get weight", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| db_err("Failed to get status", e))?;
    let images: Option<serde_json::Value> = row
        .try_get("images")
        .map_err(|e| db_err("Failed to get images", e))?;
    let variants: Option<serde_json::Value> = row
        .try_get("variants")
        .map_err(|e| db_err("Failed to get variants", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| db_err("Failed to get created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_err("Failed to get updated_at", e))?;

    let name =
        BilingualText::name(name_ar, name_en).map_err(|e| db_err("Invalid product name", e))?;
    let description = match (description_ar, description_en) {
        (None, None) => None,
        (ar, en) => Some(BilingualText::free(
            ar.unwrap_or_default(),
            en.unwrap_or_default(),
        )),
    };
    let status: DraftStatus = status_str.parse().map_err(|e| db_err("Invalid status", e))?;
    let images: Option<Vec<String>> = images
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| db_err("Invalid images column", e))?;
    let variants: Option<Vec<ProductVariant>> = variants
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| db_err("Invalid variants column", e))?;

    let params = NewDraftProduct {
        session_id: SetupSessionId::from_uuid(session_id),
        name,
        description,
        price,
        compare_at_price,
        cost_price,
        sku,
        barcode,
        weight,
        category_id: category_id.map(CategoryId::from_uuid),
        images,
        variants,
    };

    Ok(DraftProduct::reconstitute(
        ProductId::from_uuid(id),
        params,
        platform_id,
        status,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
