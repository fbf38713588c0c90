//! Canned conversation texts.
//!
//! Quick replies are pre-canned utterances offered early in the chat; they
//! feed the normal turn path and are not a distinct code path. The welcome
//! text seeds the first assistant message of a fresh session.

use serde::Serialize;

use crate::domain::foundation::Language;

/// A pre-canned utterance with its button label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickReply {
    pub label: &'static str,
    pub utterance: &'static str,
}

const QUICK_REPLIES_EN: [QuickReply; 3] = [
    QuickReply {
        label: "I sell fashion",
        utterance: "I sell fashion and clothing items",
    },
    QuickReply {
        label: "I sell electronics",
        utterance: "I sell electronics and gadgets",
    },
    QuickReply {
        label: "I sell home goods",
        utterance: "I sell home and kitchen products",
    },
];

const QUICK_REPLIES_AR: [QuickReply; 3] = [
    QuickReply {
        label: "أبيع منتجات غذائية",
        utterance: "أبيع منتجات غذائية",
    },
    QuickReply {
        label: "أبيع ملابس",
        utterance: "أبيع ملابس وأزياء",
    },
    QuickReply {
        label: "أبيع إلكترونيات",
        utterance: "أبيع إلكترونيات وأجهزة",
    },
];

/// Quick replies for the given language.
pub fn quick_replies(language: Language) -> &'static [QuickReply] {
    match language {
        Language::En => &QUICK_REPLIES_EN,
        Language::Ar => &QUICK_REPLIES_AR,
    }
}

/// The fixed greeting seeded into a freshly created session.
pub fn welcome_text(language: Language) -> &'static str {
    match language {
        Language::En => {
            "Hi! I'm here to help you set up your store. Tell me about your business - what kind of products do you sell?"
        }
        Language::Ar => {
            "مرحباً! أنا هنا لمساعدتك في إعداد متجرك. دعني أعرف المزيد عن عملك - ما هو نوع المنتجات التي تبيعها؟"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_language_offers_three_quick_replies() {
        assert_eq!(quick_replies(Language::En).len(), 3);
        assert_eq!(quick_replies(Language::Ar).len(), 3);
    }

    #[test]
    fn welcome_text_is_language_dependent() {
        assert!(welcome_text(Language::En).starts_with("Hi!"));
        assert!(welcome_text(Language::Ar).starts_with("مرحباً"));
    }
}
