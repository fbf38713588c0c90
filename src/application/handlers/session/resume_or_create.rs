//! ResumeOrCreateSessionHandler - entry point of the setup flow.
//!
//! Looks up the active session for a store and loads its conversation and
//! drafts; when none exists, creates a fresh session and seeds the welcome
//! message. Seeding only happens on the create branch, so re-entering the
//! flow never duplicates the greeting.

use std::sync::Arc;

use crate::domain::catalog::{DraftCategory, DraftProduct};
use crate::domain::conversation::{welcome_text, ChatMessage, MessageMetadata};
use crate::domain::foundation::{Language, SetupSessionId, StoreId};
use crate::domain::session::{SessionError, SetupSession};
use crate::ports::{
    CategoryRepository, MessageRepository, ProductRepository, ProfileRepository,
    SessionRepository, StoreRepository,
};

/// Command to resume or start onboarding for a store.
#[derive(Debug, Clone)]
pub struct ResumeOrCreateCommand {
    pub store_id: StoreId,
    /// Conversation language; falls back to the store owner's preferred
    /// language, then English.
    pub language: Option<Language>,
}

/// The session with everything the setup surface renders.
#[derive(Debug, Clone)]
pub struct SetupSnapshot {
    pub session: SetupSession,
    pub messages: Vec<ChatMessage>,
    pub categories: Vec<DraftCategory>,
    pub products: Vec<DraftProduct>,
    /// True when this call created the session (and seeded the welcome).
    pub created: bool,
}

/// Handler for resuming or creating setup sessions.
pub struct ResumeOrCreateSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    messages: Arc<dyn MessageRepository>,
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
    stores: Arc<dyn StoreRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ResumeOrCreateSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        messages: Arc<dyn MessageRepository>,
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        stores: Arc<dyn StoreRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            sessions,
            messages,
            categories,
            products,
            stores,
            profiles,
        }
    }

    /// Resume the store's active session or create a new one.
    ///
    /// The one-active-session-per-store invariant is advisory: it holds
    /// through this lookup-then-create sequence, but two racing calls can
    /// still both create a session. That race is accepted, not fixed.
    pub async fn handle(&self, cmd: ResumeOrCreateCommand) -> Result<SetupSnapshot, SessionError> {
        let store = self
            .stores
            .find_by_id(&cmd.store_id)
            .await
            .map_err(|e| SessionError::infrastructure(e.to_string()))?
            .ok_or(SessionError::StoreNotConnected(cmd.store_id))?;

        if let Some(session) = self.sessions.find_active_by_store(store.id()).await? {
            let messages = self.messages.find_by_session(session.id()).await?;
            let categories = self.categories.find_by_session(session.id()).await?;
            let products = self.products.find_by_session(session.id()).await?;

            return Ok(SetupSnapshot {
                session,
                messages,
                categories,
                products,
                created: false,
            });
        }

        let language = match cmd.language {
            Some(language) => language,
            None => self
                .profiles
                .find_by_id(store.user_id())
                .await?
                .map(|p| p.preferred_language())
                .unwrap_or_default(),
        };

        let session = SetupSession::new(SetupSessionId::new(), *store.id());
        self.sessions.save(&session).await?;

        let welcome = ChatMessage::assistant(
            *session.id(),
            welcome_text(language),
            MessageMetadata::Welcome,
        )?;
        self.messages.save(&welcome).await?;

        Ok(SetupSnapshot {
            session,
            messages: vec![welcome],
            categories: Vec::new(),
            products: Vec::new(),
            created: true,
        })
    }
}
