//! HTTP routes for the bulk publish endpoints.

use axum::{routing::post, Router};

use super::handlers::{publish_categories, publish_products, PublishHandlers};

/// Creates the store publish router.
pub fn publish_routes(handlers: PublishHandlers) -> Router {
    Router::new()
        .route("/categories", post(publish_categories))
        .route("/products", post(publish_products))
        .with_state(handlers)
}
