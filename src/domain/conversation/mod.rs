//! Conversation module.
//!
//! One setup session owns an ordered list of immutable chat messages. An
//! assistant message may carry a structured action directing the UI to a
//! curation surface (category suggestions, a product preview, a coupon).

mod action;
mod errors;
mod message;
mod quick_replies;

pub use action::{
    CategorySuggestion, CategorySuggestions, CouponOffer, CurationSurface, DiscountType,
    MessageMetadata, ProductPreview,
};
pub use errors::ConversationError;
pub use message::{ChatMessage, Role};
pub use quick_replies::{quick_replies, welcome_text, QuickReply};
