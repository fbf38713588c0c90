//! Wire types for the bulk publish endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::ProductVariant;

/// One category in a bulk publish request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItem {
    pub name_ar: String,
    pub name_en: String,
    #[serde(default)]
    pub description_ar: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
}

/// `POST /api/store/categories` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPublishRequest {
    pub categories: Vec<CategoryItem>,
}

/// One product in a bulk publish request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    pub name_ar: String,
    pub name_en: String,
    #[serde(default)]
    pub description_ar: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub compare_at_price: Option<f64>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub variants: Option<Vec<ProductVariant>>,
}

/// `POST /api/store/products` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPublishRequest {
    pub products: Vec<ProductItem>,
}

/// One per-item publish outcome.
///
/// `id_key` in the serialized form is `categoryId` or `productId`
/// depending on the endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResultEntry {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PublishResultEntry {
    pub fn category_success(id: String, name: String) -> Self {
        Self {
            success: true,
            category_id: Some(id),
            product_id: None,
            name,
            error: None,
        }
    }

    pub fn product_success(id: String, name: String) -> Self {
        Self {
            success: true,
            category_id: None,
            product_id: Some(id),
            name,
            error: None,
        }
    }

    pub fn failure(name: String, error: String) -> Self {
        Self {
            success: false,
            category_id: None,
            product_id: None,
            name,
            error: Some(error),
        }
    }
}

/// Bulk publish response body.
#[derive(Debug, Clone, Serialize)]
pub struct PublishResults {
    pub results: Vec<PublishResultEntry>,
}
