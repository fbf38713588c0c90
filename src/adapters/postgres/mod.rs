//! PostgreSQL adapters for the record store ports.
//!
//! Six collections: profiles, stores, setup_sessions, messages, categories,
//! products. Each repository is a thin mapping layer over `sqlx` queries;
//! entities reconstitute through their domain constructors.

mod category_repository;
mod message_repository;
mod product_repository;
mod profile_repository;
mod session_repository;
mod store_repository;

pub use category_repository::PostgresCategoryRepository;
pub use message_repository::PostgresMessageRepository;
pub use product_repository::PostgresProductRepository;
pub use profile_repository::PostgresProfileRepository;
pub use session_repository::PostgresSessionRepository;
pub use store_repository::PostgresStoreRepository;
