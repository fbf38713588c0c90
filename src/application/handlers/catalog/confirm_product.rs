//! ConfirmProductHandler - persists a reviewed product preview as a draft.
//!
//! Confirming a product advances the session to the Marketing step at its
//! 75% checkpoint.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, DraftProduct, NewDraftProduct};
use crate::domain::conversation::ProductPreview;
use crate::domain::foundation::{BilingualText, CategoryId, SetupSessionId};
use crate::domain::session::{SetupSession, SetupStep};
use crate::ports::{ProductRepository, SessionRepository};

/// Command carrying the reviewed (possibly edited) product preview.
#[derive(Debug, Clone)]
pub struct ConfirmProductCommand {
    pub session_id: SetupSessionId,
    pub product: ProductPreview,
    /// Draft category to attach the product to, when the merchant picked
    /// one.
    pub category_id: Option<CategoryId>,
}

/// Outcome of a product confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmProductResult {
    pub product: DraftProduct,
    pub session: SetupSession,
}

/// Handler for confirming products.
pub struct ConfirmProductHandler {
    sessions: Arc<dyn SessionRepository>,
    products: Arc<dyn ProductRepository>,
}

impl ConfirmProductHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { sessions, products }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmProductCommand,
    ) -> Result<ConfirmProductResult, CatalogError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?
            .ok_or_else(|| {
                CatalogError::infrastructure(format!("Session not found: {}", cmd.session_id))
            })?;

        let preview = cmd.product;
        let name = BilingualText::name(&preview.name_ar, &preview.name_en)
            .map_err(|e| CatalogError::validation("name", e.to_string()))?;
        let description = match (&preview.description_ar, &preview.description_en) {
            (None, None) => None,
            (ar, en) => Some(BilingualText::free(
                ar.clone().unwrap_or_default(),
                en.clone().unwrap_or_default(),
            )),
        };

        let mut params = NewDraftProduct::minimal(cmd.session_id, name, preview.price);
        params.description = description;
        params.sku = preview.sku;
        params.variants = preview.variants;
        params.category_id = cmd.category_id;

        let product = DraftProduct::new(params)?;
        self.products
            .save(&product)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        if session.current_step().index() < SetupStep::Marketing.index() {
            session.advance_to(SetupStep::Marketing)?;
            self.sessions
                .update(&session)
                .await
                .map_err(|e| CatalogError::infrastructure(e.to_string()))?;
        }

        Ok(ConfirmProductResult { product, session })
    }
}
