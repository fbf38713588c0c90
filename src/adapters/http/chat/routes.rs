//! HTTP routes for the conversation endpoint.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_quick_replies, post_chat, ChatHandlers};

/// Creates the chat router.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/", post(post_chat))
        .route("/quick-replies", get(get_quick_replies))
        .with_state(handlers)
}
