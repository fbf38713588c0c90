//! HTTP handlers for the setup flow.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::catalog::{
    ConfirmCategoriesCommand, ConfirmCategoriesHandler, ConfirmProductCommand,
    ConfirmProductHandler, UpdateProductCommand, UpdateProductHandler,
};
use crate::application::handlers::publish::{PublishAllCommand, PublishAllHandler};
use crate::application::handlers::session::{
    ResumeOrCreateCommand, ResumeOrCreateSessionHandler,
};
use crate::domain::catalog::{CandidateSet, CatalogError};
use crate::domain::foundation::ProductId;
use crate::domain::session::SessionError;
use crate::ports::{CategoryRepository, ProductRepository, SessionRepository, StoreRepository};

use super::super::middleware::RequireAuth;
use super::super::ErrorResponse;
use super::dto::{
    ConfirmCategoriesRequest, ConfirmCategoriesResponse, ConfirmProductRequest,
    ConfirmProductResponse, ProductView, PublishSessionRequest, ResumeSessionRequest,
    SessionPublishEntry, SessionPublishResponse, SessionView, SetupSnapshotResponse,
    UpdateProductRequest,
};

#[derive(Clone)]
pub struct SetupHandlers {
    resume: Arc<ResumeOrCreateSessionHandler>,
    confirm_categories: Arc<ConfirmCategoriesHandler>,
    confirm_product: Arc<ConfirmProductHandler>,
    update_product: Arc<UpdateProductHandler>,
    publish_all: Arc<PublishAllHandler>,
    sessions: Arc<dyn SessionRepository>,
    stores: Arc<dyn StoreRepository>,
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
    /// Default pre-selection for suggestion batches without explicit flags.
    suggestion_preselect: usize,
}

impl SetupHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        resume: Arc<ResumeOrCreateSessionHandler>,
        confirm_categories: Arc<ConfirmCategoriesHandler>,
        confirm_product: Arc<ConfirmProductHandler>,
        update_product: Arc<UpdateProductHandler>,
        publish_all: Arc<PublishAllHandler>,
        sessions: Arc<dyn SessionRepository>,
        stores: Arc<dyn StoreRepository>,
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        suggestion_preselect: usize,
    ) -> Self {
        Self {
            resume,
            confirm_categories,
            confirm_product,
            update_product,
            publish_all,
            sessions,
            stores,
            categories,
            products,
            suggestion_preselect,
        }
    }
}

/// POST /api/setup/session - resume or create the store's active session.
pub async fn resume_session(
    State(handlers): State<SetupHandlers>,
    _user: RequireAuth,
    Json(req): Json<ResumeSessionRequest>,
) -> Response {
    let cmd = ResumeOrCreateCommand {
        store_id: req.store_id,
        language: req.language,
    };

    match handlers.resume.handle(cmd).await {
        Ok(snapshot) => {
            let response = SetupSnapshotResponse::from(&snapshot);
            let status = if snapshot.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/setup/categories/confirm - persist the curated selection.
pub async fn confirm_categories(
    State(handlers): State<SetupHandlers>,
    _user: RequireAuth,
    Json(req): Json<ConfirmCategoriesRequest>,
) -> Response {
    // Explicit flags win; a flag-free batch gets the default
    // pre-selection of the first N candidates.
    let has_flags = req.categories.iter().any(|c| c.selected.is_some());
    let candidates = if has_flags {
        CandidateSet::from_flagged(
            req.categories
                .into_iter()
                .map(|c| {
                    let selected = c.selected.unwrap_or(false);
                    (c.into_suggestion(), selected)
                })
                .collect(),
        )
    } else {
        CandidateSet::stage(
            req.categories
                .into_iter()
                .map(|c| c.into_suggestion())
                .collect(),
            handlers.suggestion_preselect,
        )
    };

    let cmd = ConfirmCategoriesCommand {
        session_id: req.session_id,
        candidates,
    };

    match handlers.confirm_categories.handle(cmd).await {
        Ok(result) => {
            let response = ConfirmCategoriesResponse::from(&result);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

/// POST /api/setup/products/confirm - persist a reviewed product preview.
pub async fn confirm_product(
    State(handlers): State<SetupHandlers>,
    _user: RequireAuth,
    Json(req): Json<ConfirmProductRequest>,
) -> Response {
    let cmd = ConfirmProductCommand {
        session_id: req.session_id,
        product: req.product,
        category_id: req.category_id,
    };

    match handlers.confirm_product.handle(cmd).await {
        Ok(result) => {
            let response = ConfirmProductResponse {
                product: ProductView::from(&result.product),
                session: SessionView::from(&result.session),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

/// PATCH /api/setup/products/:id - scoped post-draft edit.
pub async fn update_product(
    State(handlers): State<SetupHandlers>,
    _user: RequireAuth,
    Path(product_id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Response {
    let product_id = match product_id.parse::<ProductId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid product ID")),
            )
                .into_response()
        }
    };

    let cmd = UpdateProductCommand {
        product_id,
        name_ar: req.name_ar,
        name_en: req.name_en,
        price: req.price,
        sku: req.sku,
    };

    match handlers.update_product.handle(cmd).await {
        Ok(product) => {
            (StatusCode::OK, Json(ProductView::from(&product))).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

/// POST /api/setup/publish - push the session's catalog to the storefront.
///
/// Loads the session's categories and products as-is and hands them to the
/// publication coordinator. No draft-status filter is applied here, so a
/// re-publish sends already published items again - the same duplicate-create
/// exposure the coordinator's contract documents.
pub async fn publish_session(
    State(handlers): State<SetupHandlers>,
    _user: RequireAuth,
    Json(req): Json<PublishSessionRequest>,
) -> Response {
    let session = match handlers.sessions.find_by_id(&req.session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Session not found")),
            )
                .into_response()
        }
        Err(e) => return internal_error(e),
    };

    let store = match handlers.stores.find_by_id(session.store_id()).await {
        Ok(Some(store)) => store,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No Zid store connected")),
            )
                .into_response()
        }
        Err(e) => return internal_error(e),
    };

    let categories = match handlers.categories.find_by_session(session.id()).await {
        Ok(categories) => categories,
        Err(e) => return internal_error(e),
    };
    let products = match handlers.products.find_by_session(session.id()).await {
        Ok(products) => products,
        Err(e) => return internal_error(e),
    };

    let report = handlers
        .publish_all
        .handle(PublishAllCommand {
            access_token: store.access_token().clone(),
            categories,
            products,
        })
        .await;

    let response = SessionPublishResponse {
        categories: report.categories.iter().map(to_entry).collect(),
        products: report.products.iter().map(to_entry).collect(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn to_entry(result: &crate::application::handlers::publish::PublishItemResult) -> SessionPublishEntry {
    SessionPublishEntry {
        success: result.success,
        platform_id: result.platform_id.clone(),
        name: result.name.clone(),
        error: result.error.clone(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn internal_error(e: impl std::fmt::Display) -> Response {
    tracing::error!(error = %e, "setup endpoint infrastructure failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal error")),
    )
        .into_response()
}

fn handle_session_error(error: SessionError) -> Response {
    let status = match &error {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::StoreNotConnected(_) => StatusCode::BAD_REQUEST,
        SessionError::Closed | SessionError::InvalidState(_) => StatusCode::CONFLICT,
        SessionError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        SessionError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(error.message()))).into_response()
}

fn handle_catalog_error(error: CatalogError) -> Response {
    let status = match &error {
        CatalogError::CategoryNotFound(_) | CatalogError::ProductNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        CatalogError::NotEditable(_) => StatusCode::CONFLICT,
        CatalogError::ValidationFailed { .. } | CatalogError::CandidateOutOfRange(_) => {
            StatusCode::BAD_REQUEST
        }
        CatalogError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(error.message()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CategoryId, ProductId, SetupSessionId, StoreId};

    #[test]
    fn session_errors_map_to_expected_statuses() {
        assert_eq!(
            handle_session_error(SessionError::not_found(SetupSessionId::new())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            handle_session_error(SessionError::store_not_connected(StoreId::new())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_session_error(SessionError::Closed).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn catalog_errors_map_to_expected_statuses() {
        assert_eq!(
            handle_catalog_error(CatalogError::product_not_found(ProductId::new())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            handle_catalog_error(CatalogError::category_not_found(CategoryId::new())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            handle_catalog_error(CatalogError::not_editable("published")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            handle_catalog_error(CatalogError::validation("name", "empty")).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
