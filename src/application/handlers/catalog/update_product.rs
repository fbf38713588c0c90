//! UpdateProductHandler - post-draft edit of a persisted product.
//!
//! The edit targets the record by id and touches the mutable fields only:
//! bilingual name, price, SKU. Identity and status never change through
//! this path.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, DraftProduct};
use crate::domain::foundation::{BilingualText, ProductId};
use crate::ports::ProductRepository;

/// Command for a scoped product edit.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub product_id: ProductId,
    pub name_ar: String,
    pub name_en: String,
    pub price: f64,
    pub sku: Option<String>,
}

/// Handler for post-draft product edits.
pub struct UpdateProductHandler {
    products: Arc<dyn ProductRepository>,
}

impl UpdateProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(&self, cmd: UpdateProductCommand) -> Result<DraftProduct, CatalogError> {
        let mut product = self
            .products
            .find_by_id(&cmd.product_id)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?
            .ok_or(CatalogError::ProductNotFound(cmd.product_id))?;

        let name = BilingualText::name(&cmd.name_ar, &cmd.name_en)
            .map_err(|e| CatalogError::validation("name", e.to_string()))?;
        product.apply_edit(name, cmd.price, cmd.sku)?;

        self.products
            .update(&product)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?;

        Ok(product)
    }
}
