//! LaunchKit server entry point.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use launchkit::adapters::ai::{ClaudeExtractorConfig, ClaudeIntentExtractor};
use launchkit::adapters::auth::JwtAuthProvider;
use launchkit::adapters::http::chat::ChatHandlers;
use launchkit::adapters::http::oauth::OAuthHandlers;
use launchkit::adapters::http::publish::PublishHandlers;
use launchkit::adapters::http::setup::SetupHandlers;
use launchkit::adapters::http::{api_router, middleware::AuthState};
use launchkit::adapters::postgres::{
    PostgresCategoryRepository, PostgresMessageRepository, PostgresProductRepository,
    PostgresProfileRepository, PostgresSessionRepository, PostgresStoreRepository,
};
use launchkit::adapters::zid::ZidConnector;
use launchkit::application::handlers::catalog::{
    ConfirmCategoriesHandler, ConfirmProductHandler, UpdateProductHandler,
};
use launchkit::application::handlers::connect::CompleteOAuthHandler;
use launchkit::application::handlers::conversation::SubmitTurnHandler;
use launchkit::application::handlers::publish::PublishAllHandler;
use launchkit::application::handlers::session::ResumeOrCreateSessionHandler;
use launchkit::config::AppConfig;
use launchkit::ports::{
    AuthProvider, CategoryRepository, IntentExtractor, MessageRepository, PlatformConnector,
    ProductRepository, ProfileRepository, SessionRepository, StoreRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "starting launchkit"
    );

    // Database
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    // Record store adapters
    let sessions: Arc<dyn SessionRepository> =
        Arc::new(PostgresSessionRepository::new(pool.clone()));
    let messages: Arc<dyn MessageRepository> =
        Arc::new(PostgresMessageRepository::new(pool.clone()));
    let categories: Arc<dyn CategoryRepository> =
        Arc::new(PostgresCategoryRepository::new(pool.clone()));
    let products: Arc<dyn ProductRepository> =
        Arc::new(PostgresProductRepository::new(pool.clone()));
    let stores: Arc<dyn StoreRepository> = Arc::new(PostgresStoreRepository::new(pool.clone()));
    let profiles: Arc<dyn ProfileRepository> = Arc::new(PostgresProfileRepository::new(pool));

    // Upstream adapters
    if !config.extractor.has_credentials() {
        tracing::warn!("no extractor credentials configured, conversation runs in echo mode");
    }
    let extractor: Arc<dyn IntentExtractor> = Arc::new(ClaudeIntentExtractor::new(
        ClaudeExtractorConfig::from(&config.extractor),
    )?);
    let connector: Arc<dyn PlatformConnector> = Arc::new(ZidConnector::new(config.zid.clone())?);
    let auth: Arc<dyn AuthProvider> = Arc::new(JwtAuthProvider::new(
        config.auth.secret(),
        &config.auth.issuer,
    ));

    // Application handlers
    let resume = Arc::new(ResumeOrCreateSessionHandler::new(
        sessions.clone(),
        messages.clone(),
        categories.clone(),
        products.clone(),
        stores.clone(),
        profiles,
    ));
    let submit_turn = Arc::new(SubmitTurnHandler::new(
        sessions.clone(),
        messages,
        extractor,
    ));
    let confirm_categories = Arc::new(ConfirmCategoriesHandler::new(
        sessions.clone(),
        categories.clone(),
    ));
    let confirm_product = Arc::new(ConfirmProductHandler::new(
        sessions.clone(),
        products.clone(),
    ));
    let update_product = Arc::new(UpdateProductHandler::new(products.clone()));
    let publish_all = Arc::new(PublishAllHandler::new(
        connector.clone(),
        categories.clone(),
        products.clone(),
    ));
    let complete_oauth = Arc::new(CompleteOAuthHandler::new(
        connector.clone(),
        stores.clone(),
    ));

    // HTTP surface
    let chat_handlers = ChatHandlers::new(submit_turn);
    let setup_handlers = SetupHandlers::new(
        resume,
        confirm_categories,
        confirm_product,
        update_product,
        publish_all,
        sessions,
        stores.clone(),
        categories,
        products,
        config.setup.suggestion_preselect,
    );
    let publish_handlers = PublishHandlers::new(connector.clone(), stores);
    let oauth_handlers = OAuthHandlers::new(
        connector,
        complete_oauth,
        config.server.app_base_url.clone(),
    );

    let auth_state: AuthState = auth;
    let app = api_router(
        chat_handlers,
        setup_handlers,
        publish_handlers,
        oauth_handlers,
        auth_state,
    )
    .layer(TraceLayer::new_for_http())
    .layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )))
    .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
