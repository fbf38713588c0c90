//! Platform connector port.
//!
//! The connector wraps the storefront platform's REST surface: the OAuth
//! code exchange, the store identity lookup, and the authenticated
//! create-category / create-product calls the publication coordinator
//! drives.

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::catalog::ProductVariant;
use crate::domain::foundation::UserId;

/// Bilingual category payload for a remote create.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCategoryPayload {
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: String,
    pub description_en: String,
}

/// Bilingual product payload for a remote create.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteProductPayload {
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: String,
    pub description_en: String,
    pub price: f64,
    pub compare_at_price: Option<f64>,
    pub sku: Option<String>,
    pub variants: Vec<ProductVariant>,
}

/// Tokens returned by the OAuth code exchange.
#[derive(Debug, Clone)]
pub struct OAuthTokens {
    pub access_token: Secret<String>,
    pub refresh_token: Option<Secret<String>>,
}

/// Store identity as reported by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreIdentity {
    pub name: String,
    pub domain: Option<String>,
}

/// Errors from the platform upstream.
#[derive(Debug, Clone, Error)]
pub enum ConnectorError {
    /// The platform returned a non-success status.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// The platform could not be reached.
    #[error("{0}")]
    Network(String),

    /// The platform answered with something unreadable.
    #[error("Unreadable platform response: {0}")]
    InvalidResponse(String),

    /// OAuth client credentials are not configured.
    #[error("Platform connector not configured: {0}")]
    NotConfigured(String),
}

/// Port for the storefront platform's REST API.
#[async_trait]
pub trait PlatformConnector: Send + Sync {
    /// Builds the consent-screen URL for the OAuth authorize redirect.
    ///
    /// `state` carries the calling user's id and is echoed back on the
    /// callback as an ownership check.
    ///
    /// # Errors
    ///
    /// - `NotConfigured` when client credentials are missing
    fn authorize_url(&self, state: &UserId) -> Result<String, ConnectorError>;

    /// Exchanges an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, ConnectorError>;

    /// Fetches the connected store's identity.
    async fn fetch_store_identity(
        &self,
        access_token: &Secret<String>,
    ) -> Result<StoreIdentity, ConnectorError>;

    /// Creates a category remotely, returning the platform-assigned id.
    async fn create_category(
        &self,
        access_token: &Secret<String>,
        payload: &RemoteCategoryPayload,
    ) -> Result<String, ConnectorError>;

    /// Creates a product remotely, returning the platform-assigned id.
    async fn create_product(
        &self,
        access_token: &Secret<String>,
        payload: &RemoteProductPayload,
    ) -> Result<String, ConnectorError>;
}
