//! Draft ledger handlers: confirmation of curated candidates and post-draft
//! edits.

mod confirm_categories;
mod confirm_product;
mod update_product;

pub use confirm_categories::{
    ConfirmCategoriesCommand, ConfirmCategoriesHandler, ConfirmCategoriesResult, FailedInsert,
};
pub use confirm_product::{ConfirmProductCommand, ConfirmProductHandler, ConfirmProductResult};
pub use update_product::{UpdateProductCommand, UpdateProductHandler};
