//! Bilingual text value object.
//!
//! Store content is generated in both Arabic and English; names require both
//! sides to be present, descriptions may carry either side empty.

use serde::{Deserialize, Serialize};

use super::{Language, ValidationError};

/// A pair of Arabic and English strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    pub ar: String,
    pub en: String,
}

impl BilingualText {
    /// Creates bilingual text requiring both sides non-empty (for names).
    ///
    /// # Errors
    ///
    /// - `EmptyField` if either side is empty or whitespace
    pub fn name(ar: impl Into<String>, en: impl Into<String>) -> Result<Self, ValidationError> {
        let ar = ar.into();
        let en = en.into();
        if ar.trim().is_empty() {
            return Err(ValidationError::empty_field("name_ar"));
        }
        if en.trim().is_empty() {
            return Err(ValidationError::empty_field("name_en"));
        }
        Ok(Self { ar, en })
    }

    /// Creates bilingual text without the non-empty requirement (for
    /// descriptions).
    pub fn free(ar: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            en: en.into(),
        }
    }

    /// Returns the side matching the language, falling back to the other
    /// when that side is empty.
    pub fn pick(&self, language: Language) -> &str {
        let (primary, fallback) = match language {
            Language::Ar => (&self.ar, &self.en),
            Language::En => (&self.en, &self.ar),
        };
        if primary.is_empty() {
            fallback
        } else {
            primary
        }
    }
}
