//! Wire types for the setup flow endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::catalog::{ConfirmCategoriesResult, FailedInsert};
use crate::application::handlers::session::SetupSnapshot;
use crate::domain::catalog::{DraftCategory, DraftProduct, ProductVariant};
use crate::domain::conversation::{CategorySuggestion, ChatMessage, MessageMetadata, ProductPreview};
use crate::domain::foundation::{CategoryId, Language, SetupSessionId, StoreId};
use crate::domain::session::SetupSession;

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// `POST /api/setup/session` request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSessionRequest {
    pub store_id: StoreId,
    /// Falls back to the merchant's preferred language when absent.
    #[serde(default)]
    pub language: Option<Language>,
}

/// One category candidate under curation.
///
/// When no item in the batch carries an explicit `selected` flag, the
/// configured default pre-selection applies (first N candidates).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateItem {
    pub name_ar: String,
    pub name_en: String,
    #[serde(default)]
    pub description_ar: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub selected: Option<bool>,
}

impl CandidateItem {
    /// The suggestion carried by this candidate.
    pub fn into_suggestion(self) -> CategorySuggestion {
        CategorySuggestion {
            name_ar: self.name_ar,
            name_en: self.name_en,
            description_ar: self.description_ar,
            description_en: self.description_en,
        }
    }
}

/// `POST /api/setup/categories/confirm` request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCategoriesRequest {
    pub session_id: SetupSessionId,
    pub categories: Vec<CandidateItem>,
}

/// `POST /api/setup/products/confirm` request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmProductRequest {
    pub session_id: SetupSessionId,
    pub product: ProductPreview,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// `PATCH /api/setup/products/:id` request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name_ar: String,
    pub name_en: String,
    pub price: f64,
    #[serde(default)]
    pub sku: Option<String>,
}

/// `POST /api/setup/publish` request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishSessionRequest {
    pub session_id: SetupSessionId,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// A session as rendered to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub store_id: String,
    pub status: String,
    pub current_step: String,
    pub completion_percentage: u8,
}

impl From<&SetupSession> for SessionView {
    fn from(session: &SetupSession) -> Self {
        Self {
            id: session.id().to_string(),
            store_id: session.store_id().to_string(),
            status: session.status().as_str().to_string(),
            current_step: session.current_step().as_str().to_string(),
            completion_percentage: session.completion_percentage().value(),
        }
    }
}

/// A message as rendered to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub role: String,
    pub content: String,
    pub metadata: MessageMetadata,
    pub created_at: String,
}

impl From<&ChatMessage> for MessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id().to_string(),
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
            metadata: message.metadata().clone(),
            created_at: message.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// A draft category as rendered to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<String>,
    pub name_ar: String,
    pub name_en: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    pub status: String,
}

impl From<&DraftCategory> for CategoryView {
    fn from(category: &DraftCategory) -> Self {
        Self {
            id: category.id().to_string(),
            platform_id: category.platform_id().map(|s| s.to_string()),
            name_ar: category.name().ar.clone(),
            name_en: category.name().en.clone(),
            description_ar: category.description().map(|d| d.ar.clone()),
            description_en: category.description().map(|d| d.en.clone()),
            status: category.status().as_str().to_string(),
        }
    }
}

/// A draft product as rendered to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<String>,
    pub name_ar: String,
    pub name_en: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<ProductVariant>>,
}

impl From<&DraftProduct> for ProductView {
    fn from(product: &DraftProduct) -> Self {
        Self {
            id: product.id().to_string(),
            platform_id: product.platform_id().map(|s| s.to_string()),
            name_ar: product.name().ar.clone(),
            name_en: product.name().en.clone(),
            price: product.price(),
            sku: product.sku().map(|s| s.to_string()),
            status: product.status().as_str().to_string(),
            variants: product.variants().map(|v| v.to_vec()),
        }
    }
}

/// `POST /api/setup/session` success body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupSnapshotResponse {
    pub session: SessionView,
    pub messages: Vec<MessageView>,
    pub categories: Vec<CategoryView>,
    pub products: Vec<ProductView>,
    pub created: bool,
}

impl From<&SetupSnapshot> for SetupSnapshotResponse {
    fn from(snapshot: &SetupSnapshot) -> Self {
        Self {
            session: SessionView::from(&snapshot.session),
            messages: snapshot.messages.iter().map(MessageView::from).collect(),
            categories: snapshot.categories.iter().map(CategoryView::from).collect(),
            products: snapshot.products.iter().map(ProductView::from).collect(),
            created: snapshot.created,
        }
    }
}

/// One failed insert in a confirmation batch.
#[derive(Debug, Clone, Serialize)]
pub struct FailedInsertView {
    pub name: String,
    pub error: String,
}

impl From<&FailedInsert> for FailedInsertView {
    fn from(failed: &FailedInsert) -> Self {
        Self {
            name: failed.name_en.clone(),
            error: failed.error.clone(),
        }
    }
}

/// `POST /api/setup/categories/confirm` success body.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmCategoriesResponse {
    pub created: Vec<CategoryView>,
    pub failed: Vec<FailedInsertView>,
    pub session: SessionView,
}

impl From<&ConfirmCategoriesResult> for ConfirmCategoriesResponse {
    fn from(result: &ConfirmCategoriesResult) -> Self {
        Self {
            created: result.inserted.iter().map(CategoryView::from).collect(),
            failed: result.failed.iter().map(FailedInsertView::from).collect(),
            session: SessionView::from(&result.session),
        }
    }
}

/// `POST /api/setup/products/confirm` success body.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmProductResponse {
    pub product: ProductView,
    pub session: SessionView,
}

/// One publish outcome in the session publish response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPublishEntry {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `POST /api/setup/publish` success body.
#[derive(Debug, Clone, Serialize)]
pub struct SessionPublishResponse {
    pub categories: Vec<SessionPublishEntry>,
    pub products: Vec<SessionPublishEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::BilingualText;

    #[test]
    fn resume_request_accepts_missing_language() {
        let json = format!(r#"{{"storeId": "{}"}}"#, StoreId::new());
        let request: ResumeSessionRequest = serde_json::from_str(&json).unwrap();
        assert!(request.language.is_none());
    }

    #[test]
    fn session_view_flattens_the_aggregate() {
        let session = SetupSession::new(SetupSessionId::new(), StoreId::new());
        let view = SessionView::from(&session);
        assert_eq!(view.status, "active");
        assert_eq!(view.current_step, "business");
        assert_eq!(view.completion_percentage, 0);
    }

    #[test]
    fn category_view_skips_absent_optionals() {
        let category = DraftCategory::new(
            SetupSessionId::new(),
            BilingualText::name("أزياء", "Fashion").unwrap(),
            None,
        );
        let json = serde_json::to_value(CategoryView::from(&category)).unwrap();
        assert!(json.get("platformId").is_none());
        assert!(json.get("descriptionEn").is_none());
        assert_eq!(json["status"], "draft");
    }

    #[test]
    fn candidate_item_converts_to_suggestion() {
        let item = CandidateItem {
            name_ar: "أزياء".to_string(),
            name_en: "Fashion".to_string(),
            description_ar: None,
            description_en: Some("Clothes".to_string()),
            selected: Some(true),
        };
        let suggestion = item.into_suggestion();
        assert_eq!(suggestion.name_en, "Fashion");
        assert_eq!(suggestion.description_en.as_deref(), Some("Clothes"));
    }
}
