//! Setup session aggregate entity.
//!
//! A setup session is the top-level container for one onboarding run. It
//! belongs to one store connection and owns the conversation messages and
//! draft entities created during the run.
//!
//! # Ownership
//!
//! Sessions reference their store by ID. Messages, draft categories, and
//! draft products are scoped to the session and never shared across
//! sessions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, Percentage, SetupSessionId, StateMachine, StoreId, Timestamp,
};

use super::{SessionStatus, SetupStep};

/// Setup session aggregate - one onboarding run for one store.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `current_step` only moves forward through the fixed step order
/// - `completion_percentage` follows the step checkpoints and never
///   decreases through `advance_to`
/// - at most one Active session per store is expected; this is checked by
///   query discipline at creation time, not enforced here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupSession {
    /// Unique identifier for this session.
    id: SetupSessionId,

    /// Store connection this run belongs to.
    store_id: StoreId,

    /// Current lifecycle status.
    status: SessionStatus,

    /// Current step of the guided walk.
    current_step: SetupStep,

    /// How far along the merchant is.
    completion_percentage: Percentage,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last updated.
    updated_at: Timestamp,
}

impl SetupSession {
    /// Create a new active session at the first step.
    pub fn new(id: SetupSessionId, store_id: StoreId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            store_id,
            status: SessionStatus::Active,
            current_step: SetupStep::initial(),
            completion_percentage: Percentage::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SetupSessionId,
        store_id: StoreId,
        status: SessionStatus,
        current_step: SetupStep,
        completion_percentage: Percentage,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            store_id,
            status,
            current_step,
            completion_percentage,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SetupSessionId {
        &self.id
    }

    /// Returns the owning store's ID.
    pub fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns the current step.
    pub fn current_step(&self) -> SetupStep {
        self.current_step
    }

    /// Returns the completion percentage.
    pub fn completion_percentage(&self) -> Percentage {
        self.completion_percentage
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance to a later step, landing on its checkpoint percentage.
    ///
    /// Triggered by curation decisions: confirming a category batch advances
    /// to Products (50%), confirming a product advances to Marketing (75%).
    ///
    /// # Errors
    ///
    /// - `SessionClosed` if the session is not active
    /// - `InvalidStateTransition` if the target is not a later step
    pub fn advance_to(&mut self, target: SetupStep) -> Result<(), DomainError> {
        self.ensure_mutable()?;

        self.current_step = self
            .current_step
            .transition_to(target)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        self.completion_percentage = target.checkpoint();
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that the session can be modified.
    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::SessionClosed,
                "Cannot modify a completed or abandoned session",
            ))
        }
    }
}
