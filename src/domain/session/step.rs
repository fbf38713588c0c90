//! Setup step state machine.
//!
//! Onboarding walks a fixed forward-only path: business → categories →
//! products → marketing. Each step carries the completion percentage the
//! session reaches on entering it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Percentage, StateMachine, ValidationError};

/// One step of the guided store setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupStep {
    /// Learning about the merchant's business.
    Business,
    /// Drafting store categories.
    Categories,
    /// Drafting products.
    Products,
    /// Marketing content (coupons, campaigns).
    Marketing,
}

impl SetupStep {
    /// All steps in walk order.
    pub const ALL: [SetupStep; 4] = [
        SetupStep::Business,
        SetupStep::Categories,
        SetupStep::Products,
        SetupStep::Marketing,
    ];

    /// The step a freshly created session starts at.
    pub fn initial() -> Self {
        SetupStep::Business
    }

    /// The step after this one, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            SetupStep::Business => Some(SetupStep::Categories),
            SetupStep::Categories => Some(SetupStep::Products),
            SetupStep::Products => Some(SetupStep::Marketing),
            SetupStep::Marketing => None,
        }
    }

    /// Completion percentage reached on entering this step.
    ///
    /// Confirming a category batch lands on Products at 50; confirming a
    /// product lands on Marketing at 75.
    pub fn checkpoint(&self) -> Percentage {
        match self {
            SetupStep::Business => Percentage::ZERO,
            SetupStep::Categories => Percentage::new(25),
            SetupStep::Products => Percentage::new(50),
            SetupStep::Marketing => Percentage::new(75),
        }
    }

    /// Zero-based position in the walk order.
    pub fn index(&self) -> usize {
        match self {
            SetupStep::Business => 0,
            SetupStep::Categories => 1,
            SetupStep::Products => 2,
            SetupStep::Marketing => 3,
        }
    }

    /// Returns the lowercase step name as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            SetupStep::Business => "business",
            SetupStep::Categories => "categories",
            SetupStep::Products => "products",
            SetupStep::Marketing => "marketing",
        }
    }
}

impl StateMachine for SetupStep {
    /// Forward-only: any later step is reachable, nothing earlier is.
    fn can_transition_to(&self, target: &Self) -> bool {
        target.index() > self.index()
    }

    fn valid_transitions(&self) -> Vec<Self> {
        SetupStep::ALL
            .iter()
            .copied()
            .filter(|s| s.index() > self.index())
            .collect()
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SetupStep {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "business" => Ok(SetupStep::Business),
            "categories" => Ok(SetupStep::Categories),
            "products" => Ok(SetupStep::Products),
            "marketing" => Ok(SetupStep::Marketing),
            other => Err(ValidationError::invalid_format(
                "current_step",
                format!("Unknown setup step: {}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn initial_step_is_business_at_zero() {
        assert_eq!(SetupStep::initial(), SetupStep::Business);
        assert_eq!(SetupStep::initial().checkpoint(), Percentage::ZERO);
    }

    #[test]
    fn next_walks_the_full_order() {
        assert_eq!(SetupStep::Business.next(), Some(SetupStep::Categories));
        assert_eq!(SetupStep::Categories.next(), Some(SetupStep::Products));
        assert_eq!(SetupStep::Products.next(), Some(SetupStep::Marketing));
        assert_eq!(SetupStep::Marketing.next(), None);
    }

    #[test]
    fn checkpoints_match_confirm_transitions() {
        // Category confirmation lands on Products at 50, product
        // confirmation lands on Marketing at 75.
        assert_eq!(SetupStep::Products.checkpoint().value(), 50);
        assert_eq!(SetupStep::Marketing.checkpoint().value(), 75);
    }

    #[test]
    fn forward_jumps_are_allowed() {
        // Business advances straight to Products when categories are
        // confirmed in one curation pass.
        assert!(SetupStep::Business.can_transition_to(&SetupStep::Products));
    }

    #[test]
    fn backward_transitions_are_rejected() {
        assert!(!SetupStep::Products.can_transition_to(&SetupStep::Business));
        assert!(SetupStep::Marketing
            .transition_to(SetupStep::Categories)
            .is_err());
    }

    #[test]
    fn marketing_is_terminal() {
        assert!(SetupStep::Marketing.is_terminal());
    }

    #[test]
    fn step_parses_persisted_names() {
        for step in SetupStep::ALL {
            assert_eq!(step.as_str().parse::<SetupStep>().unwrap(), step);
        }
        assert!("shipping".parse::<SetupStep>().is_err());
    }

    proptest! {
        /// Every valid transition strictly increases the checkpoint
        /// percentage: progress never regresses along any path.
        #[test]
        fn checkpoints_are_monotone_over_transitions(
            from_idx in 0usize..4,
            to_idx in 0usize..4,
        ) {
            let from = SetupStep::ALL[from_idx];
            let to = SetupStep::ALL[to_idx];
            if from.can_transition_to(&to) {
                prop_assert!(to.checkpoint() > from.checkpoint());
            }
        }
    }
}
