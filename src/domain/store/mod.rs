//! Store module.
//!
//! A store connection links a user to their storefront on an external
//! platform, holding the OAuth credentials the publication coordinator
//! authenticates with.

mod connection;
mod errors;
mod profile;

pub use connection::{Platform, StoreConnection};
pub use errors::StoreError;
pub use profile::Profile;
