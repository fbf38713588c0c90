//! HTTP adapters - the REST surface.
//!
//! Each area follows the same layout: `dto.rs` (wire types), `handlers.rs`
//! (axum handlers over the application layer), `routes.rs` (the router).

pub mod chat;
mod error;
pub mod middleware;
pub mod oauth;
pub mod publish;
pub mod router;
pub mod setup;

pub use error::ErrorResponse;
pub use router::api_router;
