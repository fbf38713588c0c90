//! Chat message entity.
//!
//! Messages are immutable records of the exchange within a setup session.
//! They are never updated or deleted once written; ordering is by
//! `created_at` ascending.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MessageId, SetupSessionId, Timestamp};

use super::MessageMetadata;

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Merchant input.
    User,
    /// Assistant response.
    Assistant,
    /// System bookkeeping (not user-visible).
    System,
}

impl Role {
    /// Returns the lowercase role name as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    /// Returns true if this is a user-visible role.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::User | Self::Assistant)
    }
}

impl std::str::FromStr for Role {
    type Err = crate::domain::foundation::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            other => Err(crate::domain::foundation::ValidationError::invalid_format(
                "role",
                format!("Unknown message role: {}", other),
            )),
        }
    }
}

/// An immutable message within a setup session.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `content` is non-empty (validated at construction)
/// - never mutated after construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier for this message.
    id: MessageId,

    /// Session this message belongs to.
    session_id: SetupSessionId,

    /// The role of the sender.
    role: Role,

    /// The message text.
    content: String,

    /// Structured payload attached to the message.
    metadata: MessageMetadata,

    /// When the message was created.
    created_at: Timestamp,
}

impl ChatMessage {
    /// Creates a new message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn new(
        session_id: SetupSessionId,
        role: Role,
        content: impl Into<String>,
        metadata: MessageMetadata,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }

        Ok(Self {
            id: MessageId::new(),
            session_id,
            role,
            content,
            metadata,
            created_at: Timestamp::now(),
        })
    }

    /// Creates a user message.
    pub fn user(
        session_id: SetupSessionId,
        content: impl Into<String>,
        metadata: MessageMetadata,
    ) -> Result<Self, DomainError> {
        Self::new(session_id, Role::User, content, metadata)
    }

    /// Creates an assistant message.
    pub fn assistant(
        session_id: SetupSessionId,
        content: impl Into<String>,
        metadata: MessageMetadata,
    ) -> Result<Self, DomainError> {
        Self::new(session_id, Role::Assistant, content, metadata)
    }

    /// Reconstitutes a message from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        session_id: SetupSessionId,
        role: Role,
        content: String,
        metadata: MessageMetadata,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            role,
            content,
            metadata,
            created_at,
        }
    }

    /// Returns the message ID.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the owning session's ID.
    pub fn session_id(&self) -> &SetupSessionId {
        &self.session_id
    }

    /// Returns the sender role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the message text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the attached structured payload.
    pub fn metadata(&self) -> &MessageMetadata {
        &self.metadata
    }

    /// Returns when the message was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
