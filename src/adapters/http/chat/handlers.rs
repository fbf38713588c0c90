//! HTTP handlers for the conversation endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::conversation::{SubmitTurnCommand, SubmitTurnHandler};
use crate::domain::conversation::{quick_replies, ConversationError};

use super::super::ErrorResponse;
use super::dto::{ChatRequest, ChatResponse, QuickRepliesQuery, QuickRepliesResponse};

#[derive(Clone)]
pub struct ChatHandlers {
    submit_turn: Arc<SubmitTurnHandler>,
}

impl ChatHandlers {
    pub fn new(submit_turn: Arc<SubmitTurnHandler>) -> Self {
        Self { submit_turn }
    }
}

/// POST /api/chat - submit one conversation turn.
pub async fn post_chat(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let cmd = SubmitTurnCommand {
        session_id: req.session_id,
        text: req.message,
        language: req.language,
        image: req.image,
    };

    match handlers.submit_turn.handle(cmd).await {
        Ok(outcome) => {
            let response = ChatResponse {
                response: outcome.assistant_message.content().to_string(),
                action: outcome.assistant_message.metadata().clone(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_conversation_error(e),
    }
}

/// GET /api/chat/quick-replies - pre-canned utterances for the language.
pub async fn get_quick_replies(Query(query): Query<QuickRepliesQuery>) -> Response {
    let response = QuickRepliesResponse {
        replies: quick_replies(query.language).to_vec(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn handle_conversation_error(error: ConversationError) -> Response {
    let status = match &error {
        ConversationError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        ConversationError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        ConversationError::ExtractorFailed(_) | ConversationError::Infrastructure(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(error.message()))).into_response()
}
