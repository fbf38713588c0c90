//! HTTP routes for the platform OAuth flow.

use axum::{routing::get, Router};

use super::handlers::{authorize, callback, OAuthHandlers};

/// Creates the OAuth router.
pub fn oauth_routes(handlers: OAuthHandlers) -> Router {
    Router::new()
        .route("/authorize", get(authorize))
        .route("/callback", get(callback))
        .with_state(handlers)
}
