//! HTTP routes for the setup flow.

use axum::{
    routing::{patch, post},
    Router,
};

use super::handlers::{
    confirm_categories, confirm_product, publish_session, resume_session, update_product,
    SetupHandlers,
};

/// Creates the setup router.
pub fn setup_routes(handlers: SetupHandlers) -> Router {
    Router::new()
        .route("/session", post(resume_session))
        .route("/categories/confirm", post(confirm_categories))
        .route("/products/confirm", post(confirm_product))
        .route("/products/:id", patch(update_product))
        .route("/publish", post(publish_session))
        .with_state(handlers)
}
