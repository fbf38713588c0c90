//! Draft entity lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a draft catalog entity.
///
/// Drafts move forward only: draft → published → synced. There is no failed
/// state; a failed publish attempt leaves its report in the publish results,
/// not on the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    /// Locally persisted, not yet pushed to the storefront.
    Draft,
    /// A remote counterpart was created (or a publish run covered it).
    Published,
    /// Confirmed in sync with the storefront.
    Synced,
}

impl DraftStatus {
    /// Returns true while the entity accepts edits.
    pub fn is_editable(&self) -> bool {
        matches!(self, DraftStatus::Draft)
    }

    /// Returns the lowercase status name as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Draft => "draft",
            DraftStatus::Published => "published",
            DraftStatus::Synced => "synced",
        }
    }
}

impl StateMachine for DraftStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (DraftStatus::Draft, DraftStatus::Published)
                | (DraftStatus::Published, DraftStatus::Synced)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            DraftStatus::Draft => vec![DraftStatus::Published],
            DraftStatus::Published => vec![DraftStatus::Synced],
            DraftStatus::Synced => vec![],
        }
    }
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DraftStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DraftStatus::Draft),
            "published" => Ok(DraftStatus::Published),
            "synced" => Ok(DraftStatus::Synced),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("Unknown draft status: {}", other),
            )),
        }
    }
}
