//! Merchant profile entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Language, Timestamp, UserId};

/// A merchant's profile.
///
/// Profiles come from the auth provider's signup flow; this core only reads
/// them to default the conversation language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    id: UserId,
    email: String,
    name: Option<String>,
    preferred_language: Language,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Profile {
    /// Creates a new profile.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if email is empty
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: Option<String>,
        preferred_language: Language,
    ) -> Result<Self, DomainError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(DomainError::validation("email", "Email cannot be empty"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            email,
            name,
            preferred_language,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a profile from persistence.
    pub fn reconstitute(
        id: UserId,
        email: String,
        name: Option<String>,
        preferred_language: Language,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            name,
            preferred_language,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn preferred_language(&self) -> Language {
        self.preferred_language
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_rejects_empty_email() {
        let result = Profile::new(
            UserId::new("user-1").unwrap(),
            "",
            None,
            Language::En,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_profile_keeps_preferred_language() {
        let profile = Profile::new(
            UserId::new("user-1").unwrap(),
            "merchant@example.com",
            Some("Amal".to_string()),
            Language::Ar,
        )
        .unwrap();
        assert_eq!(profile.preferred_language(), Language::Ar);
        assert_eq!(profile.name(), Some("Amal"));
    }
}
