//! Intent extractor port.
//!
//! The extractor is a black box: given a merchant utterance and the session
//! language it returns a natural-language reply plus an optional structured
//! action. Degradation rules live in the adapter: missing credentials fall
//! back to a deterministic canned reply (an `Ok`, never an error), and a
//! reply that fails to parse as the structured shape comes back as plain
//! text with no action. Only transport and upstream HTTP failures surface
//! here as errors.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::MessageMetadata;
use crate::domain::foundation::{Language, SetupSessionId};

/// The extractor's reply to one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorReply {
    /// Natural-language reply text.
    pub response: String,
    /// Structured action, `MessageMetadata::None` when the extractor
    /// offered none.
    pub action: MessageMetadata,
}

impl ExtractorReply {
    /// A plain-text reply with no action.
    pub fn plain(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            action: MessageMetadata::None,
        }
    }
}

/// Errors from the extractor upstream.
#[derive(Debug, Clone, Error)]
pub enum ExtractorError {
    /// The upstream returned a non-success status.
    #[error("Intent extractor returned HTTP {status}")]
    Upstream { status: u16 },

    /// The upstream could not be reached.
    #[error("Intent extractor unreachable: {0}")]
    Network(String),

    /// The upstream answered with something unreadable.
    #[error("Intent extractor response unreadable: {0}")]
    InvalidResponse(String),
}

/// Port for the conversational intent extractor.
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    /// Produce a reply and optional action for one merchant utterance.
    ///
    /// # Errors
    ///
    /// - `Upstream` / `Network` / `InvalidResponse` on transport-level
    ///   failure; the caller drops the turn without persisting a reply
    async fn extract(
        &self,
        message: &str,
        session_id: &SetupSessionId,
        language: Language,
    ) -> Result<ExtractorReply, ExtractorError>;
}
