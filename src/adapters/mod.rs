//! Adapters - implementations of the ports against real infrastructure.

pub mod ai;
pub mod auth;
pub mod http;
pub mod postgres;
pub mod zid;
