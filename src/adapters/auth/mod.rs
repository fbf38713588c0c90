//! Authentication adapters.

mod jwt_provider;

pub use jwt_provider::JwtAuthProvider;
