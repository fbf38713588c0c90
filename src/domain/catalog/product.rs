//! Draft product entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BilingualText, CategoryId, DomainError, ErrorCode, ProductId, SetupSessionId, StateMachine,
    Timestamp,
};

use super::DraftStatus;

/// One named option axis of a product, e.g. `Size` with `["S", "M", "L"]`.
///
/// Variants round-trip through persistence byte-for-byte; the option order
/// is meaningful and preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub name: String,
    pub options: Vec<String>,
}

/// Everything needed to create a draft product.
///
/// Only `session_id`, `name`, and `price` are required; the rest mirrors
/// what the extractor or the merchant may have filled in.
#[derive(Debug, Clone)]
pub struct NewDraftProduct {
    pub session_id: SetupSessionId,
    pub name: BilingualText,
    pub description: Option<BilingualText>,
    pub price: f64,
    pub compare_at_price: Option<f64>,
    pub cost_price: Option<f64>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub weight: Option<f64>,
    pub category_id: Option<CategoryId>,
    pub images: Option<Vec<String>>,
    pub variants: Option<Vec<ProductVariant>>,
}

impl NewDraftProduct {
    /// Minimal draft with just the required fields.
    pub fn minimal(session_id: SetupSessionId, name: BilingualText, price: f64) -> Self {
        Self {
            session_id,
            name,
            description: None,
            price,
            compare_at_price: None,
            cost_price: None,
            sku: None,
            barcode: None,
            weight: None,
            category_id: None,
            images: None,
            variants: None,
        }
    }
}

/// A product drafted during onboarding.
///
/// # Invariants
///
/// - `name` carries both Arabic and English, non-empty
/// - `price` is non-negative
/// - `status` only moves forward
/// - post-draft edits touch name, price, and SKU only; `id` and `status`
///   never change through the edit path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftProduct {
    id: ProductId,
    session_id: SetupSessionId,
    platform_id: Option<String>,
    category_id: Option<CategoryId>,
    name: BilingualText,
    description: Option<BilingualText>,
    price: f64,
    compare_at_price: Option<f64>,
    cost_price: Option<f64>,
    sku: Option<String>,
    barcode: Option<String>,
    weight: Option<f64>,
    status: DraftStatus,
    images: Option<Vec<String>>,
    variants: Option<Vec<ProductVariant>>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl DraftProduct {
    /// Creates a new draft product.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if price is negative
    pub fn new(params: NewDraftProduct) -> Result<Self, DomainError> {
        Self::validate_price(params.price)?;

        let now = Timestamp::now();
        Ok(Self {
            id: ProductId::new(),
            session_id: params.session_id,
            platform_id: None,
            category_id: params.category_id,
            name: params.name,
            description: params.description,
            price: params.price,
            compare_at_price: params.compare_at_price,
            cost_price: params.cost_price,
            sku: params.sku,
            barcode: params.barcode,
            weight: params.weight,
            status: DraftStatus::Draft,
            images: params.images,
            variants: params.variants,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a product from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProductId,
        params: NewDraftProduct,
        platform_id: Option<String>,
        status: DraftStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id: params.session_id,
            platform_id,
            category_id: params.category_id,
            name: params.name,
            description: params.description,
            price: params.price,
            compare_at_price: params.compare_at_price,
            cost_price: params.cost_price,
            sku: params.sku,
            barcode: params.barcode,
            weight: params.weight,
            status,
            images: params.images,
            variants: params.variants,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn session_id(&self) -> &SetupSessionId {
        &self.session_id
    }

    pub fn platform_id(&self) -> Option<&str> {
        self.platform_id.as_deref()
    }

    pub fn category_id(&self) -> Option<&CategoryId> {
        self.category_id.as_ref()
    }

    pub fn name(&self) -> &BilingualText {
        &self.name
    }

    pub fn description(&self) -> Option<&BilingualText> {
        self.description.as_ref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn compare_at_price(&self) -> Option<f64> {
        self.compare_at_price
    }

    pub fn cost_price(&self) -> Option<f64> {
        self.cost_price
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn images(&self) -> Option<&[String]> {
        self.images.as_deref()
    }

    pub fn variants(&self) -> Option<&[ProductVariant]> {
        self.variants.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Post-draft edit scoped to the mutable fields: name, price, SKU.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the product is no longer editable
    /// - `OutOfRange` if the new price is negative
    pub fn apply_edit(
        &mut self,
        name: BilingualText,
        price: f64,
        sku: Option<String>,
    ) -> Result<(), DomainError> {
        self.ensure_editable()?;
        Self::validate_price(price)?;

        self.name = name;
        self.price = price;
        self.sku = sku;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Record the outcome of a publish run.
    ///
    /// Same forward-only rule as categories: the platform id is absorbed
    /// when present and a draft moves to Published; nothing ever regresses.
    pub fn mark_published(&mut self, platform_id: Option<String>) {
        if platform_id.is_some() {
            self.platform_id = platform_id;
        }
        if self.status.can_transition_to(&DraftStatus::Published) {
            self.status = DraftStatus::Published;
        }
        self.updated_at = Timestamp::now();
    }

    fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot edit a {} product", self.status),
            ))
        }
    }

    fn validate_price(price: f64) -> Result<(), DomainError> {
        if price < 0.0 || !price.is_finite() {
            return Err(DomainError::new(
                ErrorCode::OutOfRange,
                format!("Price must be non-negative, got {}", price),
            ));
        }
        Ok(())
    }
}
