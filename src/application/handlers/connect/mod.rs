//! Store connection handlers (OAuth completion).

mod complete_oauth;

pub use complete_oauth::{CompleteOAuthCommand, CompleteOAuthHandler};
