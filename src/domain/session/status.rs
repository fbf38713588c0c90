//! Setup session lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a setup session.
///
/// Only one session per store is expected to be Active at a time. The
/// terminal states are reachable but not driven by the onboarding core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// The session is in progress.
    Active,
    /// The merchant finished onboarding.
    Completed,
    /// The merchant walked away.
    Abandoned,
}

impl SessionStatus {
    /// Returns true if the session can still be modified.
    pub fn is_mutable(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }

    /// Returns the lowercase status name as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
            SessionStatus::Abandoned => "abandoned",
        }
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (SessionStatus::Active, SessionStatus::Completed)
                | (SessionStatus::Active, SessionStatus::Abandoned)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SessionStatus::Active => vec![SessionStatus::Completed, SessionStatus::Abandoned],
            SessionStatus::Completed | SessionStatus::Abandoned => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SessionStatus::Active),
            "completed" => Ok(SessionStatus::Completed),
            "abandoned" => Ok(SessionStatus::Abandoned),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("Unknown session status: {}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_is_mutable_terminal_states_are_not() {
        assert!(SessionStatus::Active.is_mutable());
        assert!(!SessionStatus::Completed.is_mutable());
        assert!(!SessionStatus::Abandoned.is_mutable());
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(SessionStatus::Completed.is_terminal());
        assert!(SessionStatus::Abandoned.is_terminal());
        assert!(!SessionStatus::Active.is_terminal());
    }

    #[test]
    fn status_roundtrips_through_str() {
        for status in [
            SessionStatus::Active,
            SessionStatus::Completed,
            SessionStatus::Abandoned,
        ] {
            assert_eq!(status.as_str().parse::<SessionStatus>().unwrap(), status);
        }
    }
}
