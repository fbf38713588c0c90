//! Command handlers, one module per component.
//!
//! - `session` - setup session lifecycle (resume-or-create)
//! - `conversation` - the turn protocol
//! - `catalog` - draft ledger confirmation and edits
//! - `publish` - the publication coordinator
//! - `connect` - OAuth store connection

pub mod catalog;
pub mod connect;
pub mod conversation;
pub mod publish;
pub mod session;
