//! Conversation language value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Supported conversation languages.
///
/// The assistant converses and generates store content in both Arabic and
/// English; this selects which side leads the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// Returns the lowercase language code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Returns true for right-to-left scripts.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(ValidationError::invalid_format(
                "language",
                format!("Unsupported language: {}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_known_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ar".parse::<Language>().unwrap(), Language::Ar);
    }

    #[test]
    fn language_rejects_unknown_code() {
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn language_default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn arabic_is_rtl() {
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
    }

    #[test]
    fn language_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Ar).unwrap(), "\"ar\"");
    }
}
