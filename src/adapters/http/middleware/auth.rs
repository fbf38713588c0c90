//! Authentication middleware and extractors.
//!
//! The middleware validates Bearer tokens through the `AuthProvider` port
//! and injects the authenticated user into request extensions; handlers opt
//! in with the `RequireAuth` or `OptionalAuth` extractor. Requests without
//! a token pass through un-authenticated so public routes keep working.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::ports::{AuthProvider, AuthenticatedUser};

use super::super::ErrorResponse;

/// Auth middleware state - the provider verifying tokens.
pub type AuthState = Arc<dyn AuthProvider>;

/// Validates Bearer tokens and injects `AuthenticatedUser` on success.
///
/// - no Authorization header: the request continues without a user
/// - invalid token: 401, the request never reaches a handler
pub async fn auth_middleware(
    State(provider): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match provider.verify(token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(e) => {
                tracing::debug!(error = %e, "rejecting request with invalid bearer token");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new("Unauthorized")),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor that requires an authenticated user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait::async_trait]
impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new("Unauthorized")),
                )
                    .into_response()
            })
    }
}

/// Extractor for optional authentication.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait::async_trait]
impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(
            parts.extensions.get::<AuthenticatedUser>().cloned(),
        ))
    }
}
