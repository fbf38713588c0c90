//! Profile repository port.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::store::Profile;
use async_trait::async_trait;

/// Repository port for merchant profiles.
///
/// Profiles are written by the signup flow, which is outside this core;
/// onboarding only reads them.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by user ID.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProfileRepository) {}
    }
}
