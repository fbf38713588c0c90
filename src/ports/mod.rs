//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Record store ports
//!
//! - `SessionRepository`, `MessageRepository`, `CategoryRepository`,
//!   `ProductRepository`, `StoreRepository`, `ProfileRepository`
//!
//! ## Upstream ports
//!
//! - `IntentExtractor` - black-box language model turning an utterance into
//!   a reply plus an optional structured action
//! - `PlatformConnector` - the storefront platform's REST surface (OAuth
//!   exchange, store identity, category/product creation)
//! - `AuthProvider` - bearer token verification

mod auth_provider;
mod category_repository;
mod intent_extractor;
mod message_repository;
mod platform_connector;
mod product_repository;
mod profile_repository;
mod session_repository;
mod store_repository;

pub use auth_provider::{AuthError, AuthProvider, AuthenticatedUser};
pub use category_repository::CategoryRepository;
pub use intent_extractor::{ExtractorError, ExtractorReply, IntentExtractor};
pub use message_repository::MessageRepository;
pub use platform_connector::{
    ConnectorError, OAuthTokens, PlatformConnector, RemoteCategoryPayload, RemoteProductPayload,
    StoreIdentity,
};
pub use product_repository::ProductRepository;
pub use profile_repository::ProfileRepository;
pub use session_repository::SessionRepository;
pub use store_repository::StoreRepository;
