//! LaunchKit - Conversational Merchant Onboarding Assistant
//!
//! This crate drafts e-commerce catalog entities (categories, products,
//! coupons) from natural-language chat and publishes them to a connected
//! storefront platform through its REST API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
