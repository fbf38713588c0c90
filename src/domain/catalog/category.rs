//! Draft category entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BilingualText, CategoryId, DomainError, ErrorCode, SetupSessionId, StateMachine, Timestamp,
};

use super::DraftStatus;

/// A store category drafted during onboarding.
///
/// # Invariants
///
/// - `name` carries both Arabic and English, non-empty
/// - `status` only moves forward; `mark_published` never regresses it
/// - edits are only accepted while status is Draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftCategory {
    /// Unique identifier for this category.
    id: CategoryId,

    /// Session this draft belongs to.
    session_id: SetupSessionId,

    /// Identifier assigned by the storefront platform once published.
    platform_id: Option<String>,

    /// Bilingual category name.
    name: BilingualText,

    /// Optional bilingual description.
    description: Option<BilingualText>,

    /// Optional parent category.
    parent_id: Option<CategoryId>,

    /// Lifecycle status.
    status: DraftStatus,

    /// When the draft was created.
    created_at: Timestamp,

    /// When the draft was last updated.
    updated_at: Timestamp,
}

impl DraftCategory {
    /// Creates a new draft category.
    pub fn new(
        session_id: SetupSessionId,
        name: BilingualText,
        description: Option<BilingualText>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: CategoryId::new(),
            session_id,
            platform_id: None,
            name,
            description,
            parent_id: None,
            status: DraftStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes a category from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CategoryId,
        session_id: SetupSessionId,
        platform_id: Option<String>,
        name: BilingualText,
        description: Option<BilingualText>,
        parent_id: Option<CategoryId>,
        status: DraftStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            platform_id,
            name,
            description,
            parent_id,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn session_id(&self) -> &SetupSessionId {
        &self.session_id
    }

    pub fn platform_id(&self) -> Option<&str> {
        self.platform_id.as_deref()
    }

    pub fn name(&self) -> &BilingualText {
        &self.name
    }

    pub fn description(&self) -> Option<&BilingualText> {
        self.description.as_ref()
    }

    pub fn parent_id(&self) -> Option<&CategoryId> {
        self.parent_id.as_ref()
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the category while still a draft.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the category is no longer editable
    pub fn rename(&mut self, name: BilingualText) -> Result<(), DomainError> {
        self.ensure_editable()?;
        self.name = name;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Replace the description while still a draft.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the category is no longer editable
    pub fn update_description(
        &mut self,
        description: Option<BilingualText>,
    ) -> Result<(), DomainError> {
        self.ensure_editable()?;
        self.description = description;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Record the outcome of a publish run.
    ///
    /// Captures the platform-assigned id when the remote create succeeded
    /// and moves a draft forward to Published. The status never regresses;
    /// calling this on an already published or synced entity only absorbs
    /// the platform id.
    pub fn mark_published(&mut self, platform_id: Option<String>) {
        if platform_id.is_some() {
            self.platform_id = platform_id;
        }
        if self.status.can_transition_to(&DraftStatus::Published) {
            self.status = DraftStatus::Published;
        }
        self.updated_at = Timestamp::now();
    }

    fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot edit a {} category", self.status),
            ))
        }
    }
}
