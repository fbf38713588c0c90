//! Structured message payloads.
//!
//! Message payloads are a tagged union over the known action kinds.
//! Anything unrecognized collapses to `None` rather than erroring, so
//! foreign or stale payloads never break a conversation load.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::ProductVariant;
use crate::domain::foundation::Language;

/// A drafted category as proposed by the intent extractor.
///
/// Field names follow the extractor's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySuggestion {
    pub name_ar: String,
    pub name_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
}

/// The batch of category candidates attached to one assistant message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySuggestions {
    pub categories: Vec<CategorySuggestion>,
}

/// A drafted product as proposed by the intent extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPreview {
    pub name_ar: String,
    pub name_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<ProductVariant>>,
}

/// Coupon discount kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// A coupon proposed during the marketing step.
///
/// Coupons are display-only: they live in message metadata and are never
/// persisted as catalog entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponOffer {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<f64>,
}

/// Structured payload attached to a chat message.
///
/// Assistant messages carry one of the action kinds (or `None`); user
/// messages carry `UserTurn` with the language and an optional data-URL
/// image attachment; the seeded greeting carries `Welcome`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageMetadata {
    /// The fixed greeting seeded into a fresh session.
    Welcome,
    /// Context attached to a user turn.
    UserTurn {
        language: Language,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<String>,
    },
    /// The extractor proposed a batch of categories to curate.
    SuggestCategories { data: CategorySuggestions },
    /// The extractor proposed a single product to review.
    PreviewProduct { data: ProductPreview },
    /// The extractor proposed a coupon.
    Coupon { data: CouponOffer },
    /// No action; plain conversational text.
    #[default]
    #[serde(other)]
    None,
}

/// Curation surface an assistant message routes the UI to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurationSurface {
    Categories,
    Product,
    Coupon,
}

impl MessageMetadata {
    /// The wire name of the action kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            MessageMetadata::None => "none",
            MessageMetadata::Welcome => "welcome",
            MessageMetadata::UserTurn { .. } => "user_turn",
            MessageMetadata::SuggestCategories { .. } => "suggest_categories",
            MessageMetadata::PreviewProduct { .. } => "preview_product",
            MessageMetadata::Coupon { .. } => "coupon",
        }
    }

    /// Routes metadata to its curation surface.
    ///
    /// Pure function of the payload shape: exactly the three action kinds
    /// route somewhere, everything else routes nowhere.
    pub fn curation_surface(&self) -> Option<CurationSurface> {
        match self {
            MessageMetadata::SuggestCategories { .. } => Some(CurationSurface::Categories),
            MessageMetadata::PreviewProduct { .. } => Some(CurationSurface::Product),
            MessageMetadata::Coupon { .. } => Some(CurationSurface::Coupon),
            MessageMetadata::None
            | MessageMetadata::Welcome
            | MessageMetadata::UserTurn { .. } => None,
        }
    }
}
