//! Wire types for the conversation endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{MessageMetadata, QuickReply};
use crate::domain::foundation::{Language, SetupSessionId};

/// `POST /api/chat` request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: SetupSessionId,
    pub language: Language,
    /// Optional data-URL encoded image attachment.
    #[serde(default)]
    pub image: Option<String>,
}

/// `POST /api/chat` success body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub action: MessageMetadata,
}

/// `GET /api/chat/quick-replies` query.
#[derive(Debug, Clone, Deserialize)]
pub struct QuickRepliesQuery {
    #[serde(default)]
    pub language: Language,
}

/// `GET /api/chat/quick-replies` body.
#[derive(Debug, Clone, Serialize)]
pub struct QuickRepliesResponse {
    pub replies: Vec<QuickReply>,
}
