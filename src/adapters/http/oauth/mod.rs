//! Platform OAuth endpoints.

mod handlers;
mod routes;

pub use handlers::OAuthHandlers;
pub use routes::oauth_routes;
