//! PublishAllHandler - pushes draft entities to the storefront platform.
//!
//! Three phases, each awaited to completion before the next begins:
//! categories are created remotely, then products, then every input item is
//! marked published locally. The inputs are taken as given - callers are
//! expected to pre-filter to status=draft; items passed in a later state
//! produce a duplicate remote create.
//!
//! The status phase is unconditional: an item whose remote create failed is
//! still flipped to published. The per-item results are the one place a
//! failure is visible; nothing is retried and no item blocks another.

use std::sync::Arc;

use futures::future::join_all;
use secrecy::Secret;

use crate::domain::catalog::{DraftCategory, DraftProduct};
use crate::ports::{
    CategoryRepository, ConnectorError, PlatformConnector, ProductRepository,
    RemoteCategoryPayload, RemoteProductPayload,
};

/// Command carrying the draft sets and the store's credentials.
pub struct PublishAllCommand {
    pub access_token: Secret<String>,
    pub categories: Vec<DraftCategory>,
    pub products: Vec<DraftProduct>,
}

/// Outcome of one item's publish attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishItemResult {
    pub success: bool,
    /// Platform-assigned id, present on success.
    pub platform_id: Option<String>,
    /// English name, the display key clients report results under.
    pub name: String,
    /// Upstream error text, present on failure.
    pub error: Option<String>,
}

impl PublishItemResult {
    fn success(platform_id: String, name: String) -> Self {
        Self {
            success: true,
            platform_id: Some(platform_id),
            name,
            error: None,
        }
    }

    fn failure(name: String, error: &ConnectorError) -> Self {
        Self {
            success: false,
            platform_id: None,
            name,
            error: Some(error.to_string()),
        }
    }
}

/// Results of a publish run: one entry per input item, categories first,
/// in input order.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub categories: Vec<PublishItemResult>,
    pub products: Vec<PublishItemResult>,
}

impl PublishReport {
    /// Every result, categories before products.
    pub fn all(&self) -> impl Iterator<Item = &PublishItemResult> {
        self.categories.iter().chain(self.products.iter())
    }

    /// Count of failed items across both sets.
    pub fn failure_count(&self) -> usize {
        self.all().filter(|r| !r.success).count()
    }
}

/// Handler driving bulk publication.
pub struct PublishAllHandler {
    connector: Arc<dyn PlatformConnector>,
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl PublishAllHandler {
    pub fn new(
        connector: Arc<dyn PlatformConnector>,
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            connector,
            categories,
            products,
        }
    }

    /// Publish every input item, then flip them all to published.
    ///
    /// Exactly M+K create calls are issued for M categories and K products.
    /// Per-item failures never abort the batch and there are no retries.
    pub async fn handle(&self, cmd: PublishAllCommand) -> PublishReport {
        let PublishAllCommand {
            access_token,
            mut categories,
            mut products,
        } = cmd;

        // Phase 1: category creates, concurrently, awaited as a group.
        let category_outcomes = join_all(categories.iter().map(|category| {
            let payload = category_payload(category);
            let token = &access_token;
            async move { self.connector.create_category(token, &payload).await }
        }))
        .await;

        // Phase 2: product creates, same shape.
        let product_outcomes = join_all(products.iter().map(|product| {
            let payload = product_payload(product);
            let token = &access_token;
            async move { self.connector.create_product(token, &payload).await }
        }))
        .await;

        let category_results: Vec<PublishItemResult> = categories
            .iter()
            .zip(&category_outcomes)
            .map(|(category, outcome)| to_result(category.name().en.clone(), outcome))
            .collect();
        let product_results: Vec<PublishItemResult> = products
            .iter()
            .zip(&product_outcomes)
            .map(|(product, outcome)| to_result(product.name().en.clone(), outcome))
            .collect();

        // Phase 3: unconditional status flip. Successes also record their
        // platform id. A repository failure here is logged and skipped -
        // the report is already fixed by the phases above.
        for (category, outcome) in categories.iter_mut().zip(&category_outcomes) {
            category.mark_published(outcome.as_ref().ok().cloned());
            if let Err(e) = self.categories.update(category).await {
                tracing::warn!(category_id = %category.id(), error = %e, "status update failed after publish");
            }
        }
        for (product, outcome) in products.iter_mut().zip(&product_outcomes) {
            product.mark_published(outcome.as_ref().ok().cloned());
            if let Err(e) = self.products.update(product).await {
                tracing::warn!(product_id = %product.id(), error = %e, "status update failed after publish");
            }
        }

        PublishReport {
            categories: category_results,
            products: product_results,
        }
    }
}

fn to_result(name: String, outcome: &Result<String, ConnectorError>) -> PublishItemResult {
    match outcome {
        Ok(platform_id) => PublishItemResult::success(platform_id.clone(), name),
        Err(e) => PublishItemResult::failure(name, e),
    }
}

/// Builds the bilingual wire payload for a category.
pub fn category_payload(category: &DraftCategory) -> RemoteCategoryPayload {
    RemoteCategoryPayload {
        name_ar: category.name().ar.clone(),
        name_en: category.name().en.clone(),
        description_ar: category
            .description()
            .map(|d| d.ar.clone())
            .unwrap_or_default(),
        description_en: category
            .description()
            .map(|d| d.en.clone())
            .unwrap_or_default(),
    }
}

/// Builds the bilingual wire payload for a product.
pub fn product_payload(product: &DraftProduct) -> RemoteProductPayload {
    RemoteProductPayload {
        name_ar: product.name().ar.clone(),
        name_en: product.name().en.clone(),
        description_ar: product
            .description()
            .map(|d| d.ar.clone())
            .unwrap_or_default(),
        description_en: product
            .description()
            .map(|d| d.en.clone())
            .unwrap_or_default(),
        price: product.price(),
        compare_at_price: product.compare_at_price(),
        sku: product.sku().map(|s| s.to_string()),
        variants: product.variants().map(|v| v.to_vec()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{DraftStatus, NewDraftProduct};
    use crate::domain::foundation::{
        BilingualText, CategoryId, DomainError, ProductId, SetupSessionId, UserId,
    };
    use crate::ports::{OAuthTokens, StoreIdentity};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockConnector {
        /// English names whose remote create should fail.
        fail_names: Vec<String>,
        create_calls: AtomicUsize,
    }

    impl MockConnector {
        fn new() -> Self {
            Self {
                fail_names: Vec::new(),
                create_calls: AtomicUsize::new(0),
            }
        }

        fn failing_on(names: &[&str]) -> Self {
            Self {
                fail_names: names.iter().map(|s| s.to_string()).collect(),
                create_calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        fn outcome(&self, name_en: &str) -> Result<String, ConnectorError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_names.iter().any(|n| n == name_en) {
                Err(ConnectorError::Http { status: 422 })
            } else {
                Ok(format!("zid-{}", name_en.to_lowercase()))
            }
        }
    }

    #[async_trait]
    impl PlatformConnector for MockConnector {
        fn authorize_url(&self, _state: &UserId) -> Result<String, ConnectorError> {
            Ok("https://oauth.example/authorize".to_string())
        }

        async fn exchange_code(&self, _code: &str) -> Result<OAuthTokens, ConnectorError> {
            Err(ConnectorError::NotConfigured("not under test".to_string()))
        }

        async fn fetch_store_identity(
            &self,
            _access_token: &Secret<String>,
        ) -> Result<StoreIdentity, ConnectorError> {
            Err(ConnectorError::NotConfigured("not under test".to_string()))
        }

        async fn create_category(
            &self,
            _access_token: &Secret<String>,
            payload: &RemoteCategoryPayload,
        ) -> Result<String, ConnectorError> {
            self.outcome(&payload.name_en)
        }

        async fn create_product(
            &self,
            _access_token: &Secret<String>,
            payload: &RemoteProductPayload,
        ) -> Result<String, ConnectorError> {
            self.outcome(&payload.name_en)
        }
    }

    struct MockCategoryRepository {
        updated: Mutex<Vec<DraftCategory>>,
    }

    impl MockCategoryRepository {
        fn new() -> Self {
            Self {
                updated: Mutex::new(Vec::new()),
            }
        }

        fn updated(&self) -> Vec<DraftCategory> {
            self.updated.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CategoryRepository for MockCategoryRepository {
        async fn save(&self, _category: &DraftCategory) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update(&self, category: &DraftCategory) -> Result<(), DomainError> {
            self.updated.lock().unwrap().push(category.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            _id: &CategoryId,
        ) -> Result<Option<DraftCategory>, DomainError> {
            Ok(None)
        }

        async fn find_by_session(
            &self,
            _session_id: &SetupSessionId,
        ) -> Result<Vec<DraftCategory>, DomainError> {
            Ok(vec![])
        }
    }

    struct MockProductRepository {
        updated: Mutex<Vec<DraftProduct>>,
    }

    impl MockProductRepository {
        fn new() -> Self {
            Self {
                updated: Mutex::new(Vec::new()),
            }
        }

        fn updated(&self) -> Vec<DraftProduct> {
            self.updated.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn save(&self, _product: &DraftProduct) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update(&self, product: &DraftProduct) -> Result<(), DomainError> {
            self.updated.lock().unwrap().push(product.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            _id: &ProductId,
        ) -> Result<Option<DraftProduct>, DomainError> {
            Ok(None)
        }

        async fn find_by_session(
            &self,
            _session_id: &SetupSessionId,
        ) -> Result<Vec<DraftProduct>, DomainError> {
            Ok(vec![])
        }
    }

    fn category(name_en: &str) -> DraftCategory {
        DraftCategory::new(
            SetupSessionId::new(),
            BilingualText::name(format!("{} (ar)", name_en), name_en).unwrap(),
            None,
        )
    }

    fn product(name_en: &str, price: f64) -> DraftProduct {
        DraftProduct::new(NewDraftProduct::minimal(
            SetupSessionId::new(),
            BilingualText::name(format!("{} (ar)", name_en), name_en).unwrap(),
            price,
        ))
        .unwrap()
    }

    fn command(categories: Vec<DraftCategory>, products: Vec<DraftProduct>) -> PublishAllCommand {
        PublishAllCommand {
            access_token: Secret::new("store-token".to_string()),
            categories,
            products,
        }
    }

    #[tokio::test]
    async fn issues_one_create_per_item_and_one_result_per_item() {
        let connector = Arc::new(MockConnector::new());
        let handler = PublishAllHandler::new(
            connector.clone(),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockProductRepository::new()),
        );

        let report = handler
            .handle(command(
                vec![category("Fashion"), category("Shoes")],
                vec![product("Shirt", 49.0), product("Sneakers", 199.0), product("Cap", 25.0)],
            ))
            .await;

        assert_eq!(connector.calls(), 5);
        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.products.len(), 3);
        assert!(report.all().all(|r| r.success));
        assert_eq!(report.categories[0].platform_id.as_deref(), Some("zid-fashion"));
    }

    #[tokio::test]
    async fn per_item_failures_do_not_abort_the_batch() {
        let connector = Arc::new(MockConnector::failing_on(&["Shoes", "Shirt"]));
        let handler = PublishAllHandler::new(
            connector.clone(),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockProductRepository::new()),
        );

        let report = handler
            .handle(command(
                vec![category("Fashion"), category("Shoes")],
                vec![product("Shirt", 49.0), product("Cap", 25.0)],
            ))
            .await;

        // Every item was attempted despite two failures.
        assert_eq!(connector.calls(), 4);
        assert_eq!(report.failure_count(), 2);
        assert_eq!(report.categories[1].error.as_deref(), Some("HTTP 422"));
        assert!(report.categories[0].success);
        assert!(report.products[1].success);
    }

    #[tokio::test]
    async fn every_item_is_flipped_to_published_even_on_failure() {
        // The coordinator flips status regardless of each item's network
        // outcome. The local record says published while the storefront
        // never saw the item; the failure lives only in the report.
        let connector = Arc::new(MockConnector::failing_on(&["Shoes"]));
        let categories_repo = Arc::new(MockCategoryRepository::new());
        let products_repo = Arc::new(MockProductRepository::new());
        let handler =
            PublishAllHandler::new(connector, categories_repo.clone(), products_repo.clone());

        handler
            .handle(command(
                vec![category("Fashion"), category("Shoes")],
                vec![product("Shirt", 49.0)],
            ))
            .await;

        let updated = categories_repo.updated();
        assert_eq!(updated.len(), 2);
        assert!(updated.iter().all(|c| c.status() == DraftStatus::Published));
        // The failed item has no platform id; the succeeded one does.
        assert_eq!(updated[0].platform_id(), Some("zid-fashion"));
        assert!(updated[1].platform_id().is_none());

        let products_updated = products_repo.updated();
        assert_eq!(products_updated.len(), 1);
        assert_eq!(products_updated[0].status(), DraftStatus::Published);
    }

    #[tokio::test]
    async fn results_keep_categories_first_in_input_order() {
        let handler = PublishAllHandler::new(
            Arc::new(MockConnector::new()),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockProductRepository::new()),
        );

        let report = handler
            .handle(command(
                vec![category("Fashion"), category("Shoes"), category("Bags")],
                vec![product("Shirt", 49.0)],
            ))
            .await;

        let names: Vec<_> = report.all().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Fashion", "Shoes", "Bags", "Shirt"]);
    }

    #[tokio::test]
    async fn empty_input_publishes_nothing() {
        let connector = Arc::new(MockConnector::new());
        let handler = PublishAllHandler::new(
            connector.clone(),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockProductRepository::new()),
        );

        let report = handler.handle(command(vec![], vec![])).await;

        assert_eq!(connector.calls(), 0);
        assert_eq!(report.all().count(), 0);
    }

    #[test]
    fn payload_fills_missing_descriptions_with_empty_strings() {
        let payload = category_payload(&category("Fashion"));
        assert_eq!(payload.description_ar, "");
        assert_eq!(payload.description_en, "");
        assert_eq!(payload.name_en, "Fashion");
    }

    #[test]
    fn product_payload_maps_variants() {
        let mut params = NewDraftProduct::minimal(
            SetupSessionId::new(),
            BilingualText::name("قميص", "Shirt").unwrap(),
            49.0,
        );
        params.variants = Some(vec![crate::domain::catalog::ProductVariant {
            name: "Size".to_string(),
            options: vec!["S".to_string(), "M".to_string()],
        }]);
        let payload = product_payload(&DraftProduct::new(params).unwrap());

        assert_eq!(payload.variants.len(), 1);
        assert_eq!(payload.variants[0].options, vec!["S", "M"]);
    }
}
