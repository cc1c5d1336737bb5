//! Request extractors for bearer authentication.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::error::ApiError;
use super::state::AppState;
use crate::domain::profile::Profile;
use crate::error::AuthError;

/// The raw token from `Authorization: Bearer <token>`.
pub struct BearerToken(pub String);

/// The profile behind a valid bearer session.
pub struct CurrentUser(pub Profile);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| Self(token.to_string()))
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let profile = state.auth.authenticate(&token).await?;
        Ok(Self(profile))
    }
}
