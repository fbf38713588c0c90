//! Bulk publish endpoints against the connected storefront.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CategoryItem, CategoryPublishRequest, ProductItem, ProductPublishRequest, PublishResultEntry,
    PublishResults,
};
pub use handlers::PublishHandlers;
pub use routes::publish_routes;
