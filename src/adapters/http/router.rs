//! Top-level API router.

use axum::{middleware, routing::get, Json, Router};
use serde_json::json;

use super::chat::{chat_routes, ChatHandlers};
use super::middleware::{auth_middleware, AuthState};
use super::oauth::{oauth_routes, OAuthHandlers};
use super::publish::{publish_routes, PublishHandlers};
use super::setup::{setup_routes, SetupHandlers};

/// Composes every area router behind the auth middleware.
///
/// The chat endpoint stays reachable without credentials; everything that
/// touches the store or the setup flow enforces `RequireAuth` per handler.
pub fn api_router(
    chat: ChatHandlers,
    setup: SetupHandlers,
    publish: PublishHandlers,
    oauth: OAuthHandlers,
    auth: AuthState,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/chat", chat_routes(chat))
        .nest("/api/setup", setup_routes(setup))
        .nest("/api/store", publish_routes(publish))
        .nest("/api/auth/zid", oauth_routes(oauth))
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
}

/// GET /health - liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
