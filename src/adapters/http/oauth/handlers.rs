//! HTTP handlers for the platform OAuth flow.
//!
//! `authorize` redirects to the consent screen with `state` set to the
//! signed-in user's id; `callback` validates that same value before
//! exchanging the code and upserting the store connection. Every callback
//! failure redirects to the settings surface with an error query parameter
//! and leaves the store collection untouched.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;

use crate::application::handlers::connect::{CompleteOAuthCommand, CompleteOAuthHandler};
use crate::domain::store::StoreError;
use crate::ports::PlatformConnector;

use super::super::middleware::OptionalAuth;
use super::super::ErrorResponse;

#[derive(Clone)]
pub struct OAuthHandlers {
    connector: Arc<dyn PlatformConnector>,
    complete: Arc<CompleteOAuthHandler>,
    /// Frontend base URL for post-flow redirects.
    app_base_url: String,
}

impl OAuthHandlers {
    pub fn new(
        connector: Arc<dyn PlatformConnector>,
        complete: Arc<CompleteOAuthHandler>,
        app_base_url: impl Into<String>,
    ) -> Self {
        Self {
            connector,
            complete,
            app_base_url: app_base_url.into(),
        }
    }

    fn settings_error(&self, kind: &str) -> Response {
        Redirect::to(&format!("{}/settings?error={}", self.app_base_url, kind)).into_response()
    }
}

/// `GET /api/auth/zid/callback` query parameters.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// GET /api/auth/zid/authorize - redirect to the consent screen.
pub async fn authorize(
    State(handlers): State<OAuthHandlers>,
    OptionalAuth(user): OptionalAuth,
) -> Response {
    let Some(user) = user else {
        return Redirect::to(&format!("{}/login", handlers.app_base_url)).into_response();
    };

    match handlers.connector.authorize_url(&user.id) {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "cannot build authorize URL");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Zid OAuth not configured")),
            )
                .into_response()
        }
    }
}

/// GET /api/auth/zid/callback - finish the flow and upsert the connection.
pub async fn callback(
    State(handlers): State<OAuthHandlers>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let (Some(code), Some(state)) = (query.code, query.state) else {
        return handlers.settings_error("missing_params");
    };

    let Some(user) = user else {
        return handlers.settings_error("unauthorized");
    };

    let cmd = CompleteOAuthCommand {
        user_id: user.id,
        code,
        state,
    };

    match handlers.complete.handle(cmd).await {
        Ok(_) => {
            Redirect::to(&format!("{}/setup?success=connected", handlers.app_base_url))
                .into_response()
        }
        Err(StoreError::StateMismatch) => handlers.settings_error("unauthorized"),
        Err(StoreError::NotConfigured(_)) => handlers.settings_error("not_configured"),
        Err(StoreError::Platform(e)) => {
            tracing::warn!(error = %e, "OAuth completion failed upstream");
            handlers.settings_error("connection_failed")
        }
        Err(e) => {
            tracing::error!(error = %e, "OAuth completion failed");
            handlers.settings_error("save_failed")
        }
    }
}
