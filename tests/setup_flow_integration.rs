//! Integration tests for the onboarding flow.
//!
//! These tests wire the application handlers against in-memory record
//! stores and the crate's mock upstream adapters, and walk the observable
//! scenarios end to end: session resume, the credential-less conversation
//! fallback, candidate confirmation, whole-batch publication, and the OAuth
//! ownership check.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use secrecy::Secret;

use launchkit::adapters::ai::{ClaudeExtractorConfig, ClaudeIntentExtractor, MockIntentExtractor};
use launchkit::adapters::zid::MockPlatformConnector;
use launchkit::application::handlers::catalog::{
    ConfirmCategoriesCommand, ConfirmCategoriesHandler,
};
use launchkit::application::handlers::connect::{CompleteOAuthCommand, CompleteOAuthHandler};
use launchkit::application::handlers::conversation::{SubmitTurnCommand, SubmitTurnHandler};
use launchkit::application::handlers::publish::{PublishAllCommand, PublishAllHandler};
use launchkit::application::handlers::session::{
    ResumeOrCreateCommand, ResumeOrCreateSessionHandler,
};
use launchkit::domain::catalog::{
    CandidateSet, DraftCategory, DraftProduct, DraftStatus, NewDraftProduct, ProductVariant,
};
use launchkit::domain::conversation::{
    welcome_text, CategorySuggestion, ChatMessage, ConversationError, MessageMetadata, Role,
};
use launchkit::domain::foundation::{
    BilingualText, CategoryId, DomainError, ErrorCode, Language, MessageId, Percentage, ProductId,
    SetupSessionId, StoreId, Timestamp, UserId,
};
use launchkit::domain::session::{SessionStatus, SetupSession, SetupStep};
use launchkit::domain::store::{Platform, Profile, StoreConnection, StoreError};
use launchkit::ports::{
    CategoryRepository, MessageRepository, ProductRepository, ProfileRepository,
    SessionRepository, StoreRepository,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

#[derive(Default)]
struct InMemorySessionRepository {
    sessions: Mutex<Vec<SetupSession>>,
}

impl InMemorySessionRepository {
    fn with(session: SetupSession) -> Self {
        Self {
            sessions: Mutex::new(vec![session]),
        }
    }

    fn all(&self) -> Vec<SetupSession> {
        self.sessions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &SetupSession) -> Result<(), DomainError> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn update(&self, session: &SetupSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(pos) = sessions.iter().position(|s| s.id() == session.id()) {
            sessions[pos] = session.clone();
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::SessionNotFound,
                "Session not found",
            ))
        }
    }

    async fn find_by_id(
        &self,
        id: &SetupSessionId,
    ) -> Result<Option<SetupSession>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn find_active_by_store(
        &self,
        store_id: &StoreId,
    ) -> Result<Option<SetupSession>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.store_id() == store_id && s.status() == SessionStatus::Active)
            .cloned())
    }
}

#[derive(Default)]
struct InMemoryMessageRepository {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryMessageRepository {
    fn with(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages: Mutex::new(messages),
        }
    }

    fn all(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, message: &ChatMessage) -> Result<(), DomainError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SetupSessionId,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.session_id() == session_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(messages)
    }
}

#[derive(Default)]
struct InMemoryCategoryRepository {
    categories: Mutex<Vec<DraftCategory>>,
}

impl InMemoryCategoryRepository {
    fn all(&self) -> Vec<DraftCategory> {
        self.categories.lock().unwrap().clone()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn save(&self, category: &DraftCategory) -> Result<(), DomainError> {
        self.categories.lock().unwrap().push(category.clone());
        Ok(())
    }

    async fn update(&self, category: &DraftCategory) -> Result<(), DomainError> {
        let mut categories = self.categories.lock().unwrap();
        if let Some(pos) = categories.iter().position(|c| c.id() == category.id()) {
            categories[pos] = category.clone();
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                "Category not found",
            ))
        }
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<DraftCategory>, DomainError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn find_by_session(
        &self,
        session_id: &SetupSessionId,
    ) -> Result<Vec<DraftCategory>, DomainError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.session_id() == session_id)
            .cloned()
            .collect())
    }
}

/// Product store that round-trips every row through its JSON form, the way
/// the JSONB columns do, so serialization fidelity is actually exercised.
#[derive(Default)]
struct InMemoryProductRepository {
    rows: Mutex<Vec<serde_json::Value>>,
}

impl InMemoryProductRepository {
    fn decode(row: &serde_json::Value) -> DraftProduct {
        serde_json::from_value(row.clone()).expect("stored product row must decode")
    }

    fn all(&self) -> Vec<DraftProduct> {
        self.rows.lock().unwrap().iter().map(Self::decode).collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &DraftProduct) -> Result<(), DomainError> {
        let row = serde_json::to_value(product).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("encode failed: {}", e))
        })?;
        self.rows.lock().unwrap().push(row);
        Ok(())
    }

    async fn update(&self, product: &DraftProduct) -> Result<(), DomainError> {
        let row = serde_json::to_value(product).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("encode failed: {}", e))
        })?;
        let mut rows = self.rows.lock().unwrap();
        if let Some(pos) = rows
            .iter()
            .position(|r| Self::decode(r).id() == product.id())
        {
            rows[pos] = row;
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::ProductNotFound,
                "Product not found",
            ))
        }
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<DraftProduct>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(Self::decode)
            .find(|p| p.id() == id))
    }

    async fn find_by_session(
        &self,
        session_id: &SetupSessionId,
    ) -> Result<Vec<DraftProduct>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(Self::decode)
            .filter(|p| p.session_id() == session_id)
            .collect())
    }
}

#[derive(Default)]
struct InMemoryStoreRepository {
    stores: Mutex<Vec<StoreConnection>>,
}

impl InMemoryStoreRepository {
    fn with(connection: StoreConnection) -> Self {
        Self {
            stores: Mutex::new(vec![connection]),
        }
    }

    fn all(&self) -> Vec<StoreConnection> {
        self.stores.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoreRepository for InMemoryStoreRepository {
    async fn save(&self, connection: &StoreConnection) -> Result<(), DomainError> {
        self.stores.lock().unwrap().push(connection.clone());
        Ok(())
    }

    async fn update(&self, connection: &StoreConnection) -> Result<(), DomainError> {
        let mut stores = self.stores.lock().unwrap();
        if let Some(pos) = stores.iter().position(|s| s.id() == connection.id()) {
            stores[pos] = connection.clone();
            Ok(())
        } else {
            Err(DomainError::new(ErrorCode::StoreNotFound, "Store not found"))
        }
    }

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<StoreConnection>, DomainError> {
        Ok(self
            .stores
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn find_by_user_and_platform(
        &self,
        user_id: &UserId,
        platform: Platform,
    ) -> Result<Option<StoreConnection>, DomainError> {
        Ok(self
            .stores
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.user_id() == user_id && s.platform() == platform)
            .cloned())
    }
}

struct NoProfileRepository;

#[async_trait]
impl ProfileRepository for NoProfileRepository {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(None)
    }
}

fn merchant() -> UserId {
    UserId::new("merchant-1").unwrap()
}

fn connected_store() -> StoreConnection {
    StoreConnection::new(
        merchant(),
        Platform::Zid,
        Secret::new("store-token".to_string()),
        None,
        "My Store".to_string(),
        Some("mystore.zid.store".to_string()),
    )
}

fn suggestion(name_en: &str) -> CategorySuggestion {
    CategorySuggestion {
        name_ar: format!("{} (ar)", name_en),
        name_en: name_en.to_string(),
        description_ar: None,
        description_en: None,
    }
}

// =============================================================================
// Session resume
// =============================================================================

#[tokio::test]
async fn resume_loads_the_existing_session_instead_of_creating() {
    let store = connected_store();
    let session = SetupSession::reconstitute(
        SetupSessionId::new(),
        *store.id(),
        SessionStatus::Active,
        SetupStep::Categories,
        Percentage::new(50),
        Timestamp::now(),
        Timestamp::now(),
    );

    let welcome = ChatMessage::reconstitute(
        MessageId::new(),
        *session.id(),
        Role::Assistant,
        welcome_text(Language::En).to_string(),
        MessageMetadata::Welcome,
        Timestamp::now(),
    );
    let follow_up = ChatMessage::user(*session.id(), "I sell fashion", MessageMetadata::None)
        .unwrap();

    let sessions = Arc::new(InMemorySessionRepository::with(session.clone()));
    let messages = Arc::new(InMemoryMessageRepository::with(vec![
        welcome.clone(),
        follow_up.clone(),
    ]));
    let categories = Arc::new(InMemoryCategoryRepository::default());
    categories
        .save(&DraftCategory::new(
            *session.id(),
            BilingualText::name("أزياء", "Fashion").unwrap(),
            None,
        ))
        .await
        .unwrap();

    let handler = ResumeOrCreateSessionHandler::new(
        sessions.clone(),
        messages.clone(),
        categories,
        Arc::new(InMemoryProductRepository::default()),
        Arc::new(InMemoryStoreRepository::with(store.clone())),
        Arc::new(NoProfileRepository),
    );

    let snapshot = handler
        .handle(ResumeOrCreateCommand {
            store_id: *store.id(),
            language: Some(Language::En),
        })
        .await
        .unwrap();

    // The persisted session comes back as stored, not re-created.
    assert!(!snapshot.created);
    assert_eq!(snapshot.session.id(), session.id());
    assert_eq!(snapshot.session.current_step(), SetupStep::Categories);
    assert_eq!(snapshot.session.completion_percentage().value(), 50);

    // Prior messages in insertion order, and no second welcome seeded.
    assert_eq!(snapshot.messages.len(), 2);
    assert_eq!(snapshot.messages[0].id(), welcome.id());
    assert_eq!(snapshot.messages[1].id(), follow_up.id());
    assert_eq!(messages.all().len(), 2);
    assert_eq!(snapshot.categories.len(), 1);
    assert_eq!(sessions.all().len(), 1);
}

// =============================================================================
// Conversation fallback
// =============================================================================

#[tokio::test]
async fn credential_less_turn_gets_the_deterministic_echo() {
    let store = connected_store();
    let session = SetupSession::new(SetupSessionId::new(), *store.id());
    let sessions = Arc::new(InMemorySessionRepository::with(session.clone()));
    let messages = Arc::new(InMemoryMessageRepository::default());

    let extractor = Arc::new(
        ClaudeIntentExtractor::new(ClaudeExtractorConfig::without_credentials()).unwrap(),
    );
    let handler = SubmitTurnHandler::new(sessions, messages.clone(), extractor);

    let outcome = handler
        .handle(SubmitTurnCommand {
            session_id: *session.id(),
            text: "I sell fashion and clothing items".to_string(),
            language: Language::En,
            image: None,
        })
        .await
        .unwrap();

    assert!(outcome
        .assistant_message
        .content()
        .contains("Thanks for your message: \"I sell fashion and clothing items\""));
    assert_eq!(
        outcome.assistant_message.metadata(),
        &MessageMetadata::None
    );

    let saved = messages.all();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].role(), Role::User);
    assert_eq!(saved[1].role(), Role::Assistant);
}

#[tokio::test]
async fn extractor_outage_keeps_the_user_message_only() {
    let store = connected_store();
    let session = SetupSession::new(SetupSessionId::new(), *store.id());
    let sessions = Arc::new(InMemorySessionRepository::with(session.clone()));
    let messages = Arc::new(InMemoryMessageRepository::default());

    let handler = SubmitTurnHandler::new(
        sessions,
        messages.clone(),
        Arc::new(MockIntentExtractor::failing()),
    );

    let result = handler
        .handle(SubmitTurnCommand {
            session_id: *session.id(),
            text: "hello".to_string(),
            language: Language::En,
            image: None,
        })
        .await;

    assert!(matches!(result, Err(ConversationError::ExtractorFailed(_))));
    let saved = messages.all();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].role(), Role::User);
}

// =============================================================================
// Confirmation and progression
// =============================================================================

#[tokio::test]
async fn confirming_two_of_five_candidates_persists_two_and_reaches_fifty_percent() {
    let store = connected_store();
    let session = SetupSession::new(SetupSessionId::new(), *store.id());
    let sessions = Arc::new(InMemorySessionRepository::with(session.clone()));
    let categories = Arc::new(InMemoryCategoryRepository::default());
    let handler = ConfirmCategoriesHandler::new(sessions.clone(), categories.clone());

    let mut candidates = CandidateSet::stage(
        vec![
            suggestion("Fashion"),
            suggestion("Shoes"),
            suggestion("Bags"),
            suggestion("Watches"),
            suggestion("Perfume"),
        ],
        3,
    );
    candidates.toggle(2).unwrap(); // deselect "Bags"
    candidates.remove(4).unwrap(); // drop "Perfume" from the pool

    let result = handler
        .handle(ConfirmCategoriesCommand {
            session_id: *session.id(),
            candidates,
        })
        .await
        .unwrap();

    let stored = categories.all();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|c| c.status() == DraftStatus::Draft));
    let names: Vec<_> = stored.iter().map(|c| c.name().en.as_str()).collect();
    assert_eq!(names, vec!["Fashion", "Shoes"]);

    assert_eq!(result.session.current_step(), SetupStep::Products);
    assert_eq!(result.session.completion_percentage().value(), 50);
    assert_eq!(
        sessions.all()[0].completion_percentage(),
        Percentage::new(50)
    );
}

// =============================================================================
// Publication
// =============================================================================

#[tokio::test]
async fn publish_all_reports_per_item_and_flips_every_status() {
    let store = connected_store();
    let session = SetupSession::new(SetupSessionId::new(), *store.id());

    let categories_repo = Arc::new(InMemoryCategoryRepository::default());
    let products_repo = Arc::new(InMemoryProductRepository::default());

    let fashion = DraftCategory::new(
        *session.id(),
        BilingualText::name("أزياء", "Fashion").unwrap(),
        None,
    );
    let shoes = DraftCategory::new(
        *session.id(),
        BilingualText::name("أحذية", "Shoes").unwrap(),
        None,
    );
    categories_repo.save(&fashion).await.unwrap();
    categories_repo.save(&shoes).await.unwrap();

    let shirt = DraftProduct::new(NewDraftProduct::minimal(
        *session.id(),
        BilingualText::name("قميص", "Shirt").unwrap(),
        49.0,
    ))
    .unwrap();
    products_repo.save(&shirt).await.unwrap();

    let connector = Arc::new(MockPlatformConnector::failing_on(&["Shoes"]));
    let handler = PublishAllHandler::new(
        connector.clone(),
        categories_repo.clone(),
        products_repo.clone(),
    );

    let report = handler
        .handle(PublishAllCommand {
            access_token: store.access_token().clone(),
            categories: vec![fashion.clone(), shoes.clone()],
            products: vec![shirt.clone()],
        })
        .await;

    // Two categories and one product: exactly three creates, three results.
    assert_eq!(connector.create_calls(), 3);
    assert_eq!(report.categories.len(), 2);
    assert_eq!(report.products.len(), 1);
    assert!(report.categories[0].success);
    assert!(!report.categories[1].success);
    assert_eq!(report.categories[1].error.as_deref(), Some("HTTP 422"));
    assert!(report.products[0].success);

    // Every input row is published locally, the failed "Shoes" included.
    // Its failure exists only in the report, never on the entity.
    let stored_categories = categories_repo.all();
    assert!(stored_categories
        .iter()
        .all(|c| c.status() == DraftStatus::Published));
    let stored_shoes = stored_categories
        .iter()
        .find(|c| c.name().en == "Shoes")
        .unwrap();
    assert!(stored_shoes.platform_id().is_none());
    let stored_fashion = stored_categories
        .iter()
        .find(|c| c.name().en == "Fashion")
        .unwrap();
    assert!(stored_fashion.platform_id().is_some());

    assert!(products_repo
        .all()
        .iter()
        .all(|p| p.status() == DraftStatus::Published));
}

// =============================================================================
// Serialization fidelity
// =============================================================================

#[tokio::test]
async fn product_variants_round_trip_through_the_json_store() {
    let products = InMemoryProductRepository::default();

    let mut params = NewDraftProduct::minimal(
        SetupSessionId::new(),
        BilingualText::name("قميص", "Shirt").unwrap(),
        49.0,
    );
    params.variants = Some(vec![ProductVariant {
        name: "Size".to_string(),
        options: vec!["S".to_string(), "M".to_string(), "L".to_string()],
    }]);
    let product = DraftProduct::new(params).unwrap();

    products.save(&product).await.unwrap();
    let restored = products.find_by_id(product.id()).await.unwrap().unwrap();

    assert_eq!(restored, product);
    let variants = restored.variants().unwrap();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].name, "Size");
    assert_eq!(variants[0].options, vec!["S", "M", "L"]);
}

// =============================================================================
// OAuth ownership check
// =============================================================================

#[tokio::test]
async fn oauth_callback_with_foreign_state_writes_no_connection() {
    let stores = Arc::new(InMemoryStoreRepository::default());
    let handler = CompleteOAuthHandler::new(
        Arc::new(MockPlatformConnector::succeeding()),
        stores.clone(),
    );

    let result = handler
        .handle(CompleteOAuthCommand {
            user_id: merchant(),
            code: "auth-code".to_string(),
            state: "intruder-7".to_string(),
        })
        .await;

    assert!(matches!(result, Err(StoreError::StateMismatch)));
    assert!(stores.all().is_empty());
}

#[tokio::test]
async fn oauth_callback_upserts_by_user_and_platform() {
    let stores = Arc::new(InMemoryStoreRepository::with(connected_store()));
    let handler = CompleteOAuthHandler::new(
        Arc::new(MockPlatformConnector::succeeding()),
        stores.clone(),
    );

    let connection = handler
        .handle(CompleteOAuthCommand {
            user_id: merchant(),
            code: "auth-code".to_string(),
            state: "merchant-1".to_string(),
        })
        .await
        .unwrap();

    // Updated in place, not duplicated.
    let all = stores.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), connection.id());
    assert_eq!(connection.store_name(), "Mock Store");
}
