//! Recording platform connector for tests and offline development.

use async_trait::async_trait;
use secrecy::Secret;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::foundation::UserId;
use crate::ports::{
    ConnectorError, OAuthTokens, PlatformConnector, RemoteCategoryPayload, RemoteProductPayload,
    StoreIdentity,
};

/// A connector that fabricates platform ids and records every payload.
///
/// Optionally fails creates whose English name appears in `fail_names`,
/// with `HTTP 422`.
pub struct MockPlatformConnector {
    fail_names: Vec<String>,
    counter: AtomicUsize,
    category_payloads: Mutex<Vec<RemoteCategoryPayload>>,
    product_payloads: Mutex<Vec<RemoteProductPayload>>,
}

impl MockPlatformConnector {
    /// A connector where every call succeeds.
    pub fn succeeding() -> Self {
        Self {
            fail_names: Vec::new(),
            counter: AtomicUsize::new(0),
            category_payloads: Mutex::new(Vec::new()),
            product_payloads: Mutex::new(Vec::new()),
        }
    }

    /// A connector failing creates for the given English names.
    pub fn failing_on(names: &[&str]) -> Self {
        Self {
            fail_names: names.iter().map(|s| s.to_string()).collect(),
            ..Self::succeeding()
        }
    }

    /// Payloads seen by create_category, in call order.
    pub fn category_payloads(&self) -> Vec<RemoteCategoryPayload> {
        self.category_payloads.lock().unwrap().clone()
    }

    /// Payloads seen by create_product, in call order.
    pub fn product_payloads(&self) -> Vec<RemoteProductPayload> {
        self.product_payloads.lock().unwrap().clone()
    }

    /// Total create calls across both kinds.
    pub fn create_calls(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }

    fn next_id(&self, name_en: &str) -> Result<String, ConnectorError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        if self.fail_names.iter().any(|f| f == name_en) {
            Err(ConnectorError::Http { status: 422 })
        } else {
            Ok(format!("zid-{}", n + 1))
        }
    }
}

#[async_trait]
impl PlatformConnector for MockPlatformConnector {
    fn authorize_url(&self, state: &UserId) -> Result<String, ConnectorError> {
        Ok(format!(
            "https://oauth.zid.sa/oauth/authorize?client_id=mock&state={}",
            state
        ))
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, ConnectorError> {
        Ok(OAuthTokens {
            access_token: Secret::new(format!("access-for-{}", code)),
            refresh_token: Some(Secret::new(format!("refresh-for-{}", code))),
        })
    }

    async fn fetch_store_identity(
        &self,
        _access_token: &Secret<String>,
    ) -> Result<StoreIdentity, ConnectorError> {
        Ok(StoreIdentity {
            name: "Mock Store".to_string(),
            domain: Some("mock.zid.store".to_string()),
        })
    }

    async fn create_category(
        &self,
        _access_token: &Secret<String>,
        payload: &RemoteCategoryPayload,
    ) -> Result<String, ConnectorError> {
        self.category_payloads.lock().unwrap().push(payload.clone());
        self.next_id(&payload.name_en)
    }

    async fn create_product(
        &self,
        _access_token: &Secret<String>,
        payload: &RemoteProductPayload,
    ) -> Result<String, ConnectorError> {
        self.product_payloads.lock().unwrap().push(payload.clone());
        self.next_id(&payload.name_en)
    }
}
