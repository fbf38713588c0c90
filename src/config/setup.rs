//! Setup flow configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Setup flow tuning
#[derive(Debug, Clone, Deserialize)]
pub struct SetupConfig {
    /// How many suggested candidates start out selected
    #[serde(default = "default_suggestion_preselect")]
    pub suggestion_preselect: usize,
}

impl SetupConfig {
    /// Validate setup configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.suggestion_preselect == 0 {
            return Err(ValidationError::InvalidPreselect);
        }
        Ok(())
    }
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            suggestion_preselect: default_suggestion_preselect(),
        }
    }
}

fn default_suggestion_preselect() -> usize {
    3
}
