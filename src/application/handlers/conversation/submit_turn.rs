//! SubmitTurnHandler - the conversation turn protocol.
//!
//! One exchange at a time per session: persist the user message, ask the
//! intent extractor, persist the assistant reply. The extractor call is the
//! sole suspension point. On extractor transport failure the turn ends with
//! the user message already written and no assistant message - there is no
//! retry here; a retry is the merchant sending again.

use std::sync::Arc;

use crate::domain::conversation::{ChatMessage, ConversationError, MessageMetadata};
use crate::domain::foundation::{Language, SetupSessionId};
use crate::ports::{IntentExtractor, MessageRepository, SessionRepository};

/// Command for one conversation turn.
///
/// Quick replies feed this same command; they are pre-canned utterances,
/// not a separate path.
#[derive(Debug, Clone)]
pub struct SubmitTurnCommand {
    pub session_id: SetupSessionId,
    pub text: String,
    pub language: Language,
    /// Optional data-URL encoded image attachment.
    pub image: Option<String>,
}

/// Both sides of a completed exchange.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

/// Handler for conversation turns.
pub struct SubmitTurnHandler {
    sessions: Arc<dyn SessionRepository>,
    messages: Arc<dyn MessageRepository>,
    extractor: Arc<dyn IntentExtractor>,
}

impl SubmitTurnHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        messages: Arc<dyn MessageRepository>,
        extractor: Arc<dyn IntentExtractor>,
    ) -> Self {
        Self {
            sessions,
            messages,
            extractor,
        }
    }

    pub async fn handle(&self, cmd: SubmitTurnCommand) -> Result<TurnOutcome, ConversationError> {
        // 1. The session must exist; everything below is scoped to it.
        self.sessions
            .find_by_id(&cmd.session_id)
            .await
            .map_err(|e| ConversationError::infrastructure(e.to_string()))?
            .ok_or(ConversationError::SessionNotFound(cmd.session_id))?;

        // 2. Persist the user side of the exchange.
        let user_message = ChatMessage::user(
            cmd.session_id,
            cmd.text.clone(),
            MessageMetadata::UserTurn {
                language: cmd.language,
                image: cmd.image.clone(),
            },
        )?;
        self.messages.save(&user_message).await?;

        // 3. Ask the extractor. A transport failure drops the turn: the
        //    user message stays, no assistant message is written.
        let reply = match self
            .extractor
            .extract(&cmd.text, &cmd.session_id, cmd.language)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(session_id = %cmd.session_id, error = %e, "extractor call failed, dropping turn");
                return Err(ConversationError::extractor_failed(e.to_string()));
            }
        };

        // 4. Persist the assistant side with its action payload.
        let assistant_message =
            ChatMessage::assistant(cmd.session_id, reply.response, reply.action)?;
        self.messages.save(&assistant_message).await?;

        Ok(TurnOutcome {
            user_message,
            assistant_message,
        })
    }
}
