//! HTTP handlers for the bulk publish endpoints.
//!
//! These endpoints are the raw network phase: one remote create per item,
//! per-item success/failure capture, no status writes. They require an
//! authenticated caller with a connected Zid store.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::Secret;

use crate::domain::store::Platform;
use crate::ports::{
    PlatformConnector, RemoteCategoryPayload, RemoteProductPayload, StoreRepository,
};

use super::super::middleware::RequireAuth;
use super::super::ErrorResponse;
use super::dto::{
    CategoryPublishRequest, ProductPublishRequest, PublishResultEntry, PublishResults,
};

#[derive(Clone)]
pub struct PublishHandlers {
    connector: Arc<dyn PlatformConnector>,
    stores: Arc<dyn StoreRepository>,
}

impl PublishHandlers {
    pub fn new(connector: Arc<dyn PlatformConnector>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { connector, stores }
    }

    /// Resolves the caller's Zid access token, or the error response.
    async fn zid_token(&self, user: &RequireAuth) -> Result<Secret<String>, Response> {
        match self
            .stores
            .find_by_user_and_platform(&user.0.id, Platform::Zid)
            .await
        {
            Ok(Some(store)) => Ok(store.access_token().clone()),
            Ok(None) => Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No Zid store connected")),
            )
                .into_response()),
            Err(e) => {
                tracing::error!(error = %e, "store lookup failed");
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Failed to load store connection")),
                )
                    .into_response())
            }
        }
    }
}

/// POST /api/store/categories - create categories remotely.
pub async fn publish_categories(
    State(handlers): State<PublishHandlers>,
    user: RequireAuth,
    Json(req): Json<CategoryPublishRequest>,
) -> Response {
    let token = match handlers.zid_token(&user).await {
        Ok(token) => token,
        Err(response) => return response,
    };

    let mut results = Vec::with_capacity(req.categories.len());
    for category in &req.categories {
        let payload = RemoteCategoryPayload {
            name_ar: category.name_ar.clone(),
            name_en: category.name_en.clone(),
            description_ar: category.description_ar.clone().unwrap_or_default(),
            description_en: category.description_en.clone().unwrap_or_default(),
        };
        match handlers.connector.create_category(&token, &payload).await {
            Ok(id) => results.push(PublishResultEntry::category_success(
                id,
                category.name_en.clone(),
            )),
            Err(e) => results.push(PublishResultEntry::failure(
                category.name_en.clone(),
                e.to_string(),
            )),
        }
    }

    (StatusCode::OK, Json(PublishResults { results })).into_response()
}

/// POST /api/store/products - create products remotely.
pub async fn publish_products(
    State(handlers): State<PublishHandlers>,
    user: RequireAuth,
    Json(req): Json<ProductPublishRequest>,
) -> Response {
    let token = match handlers.zid_token(&user).await {
        Ok(token) => token,
        Err(response) => return response,
    };

    let mut results = Vec::with_capacity(req.products.len());
    for product in &req.products {
        let payload = RemoteProductPayload {
            name_ar: product.name_ar.clone(),
            name_en: product.name_en.clone(),
            description_ar: product.description_ar.clone().unwrap_or_default(),
            description_en: product.description_en.clone().unwrap_or_default(),
            price: product.price,
            compare_at_price: product.compare_at_price,
            sku: product.sku.clone(),
            variants: product.variants.clone().unwrap_or_default(),
        };
        match handlers.connector.create_product(&token, &payload).await {
            Ok(id) => results.push(PublishResultEntry::product_success(
                id,
                product.name_en.clone(),
            )),
            Err(e) => results.push(PublishResultEntry::failure(
                product.name_en.clone(),
                e.to_string(),
            )),
        }
    }

    (StatusCode::OK, Json(PublishResults { results })).into_response()
}
