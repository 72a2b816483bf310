//! Authentication extractors for handlers.

use super::types::Principal;
use crate::{error::ApiError, state::AppState};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

/// Read the session cookie, treating an empty value as absent.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Extractor for a verified principal (required).
///
/// Rejects with `Unauthorized` when the cookie is missing or the token does
/// not verify. Runs before any body extraction, so storage is never touched
/// on an unauthenticated request.
pub struct Session(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = session_token(&parts.headers, &state.config.auth.session_cookie)
            .ok_or_else(|| {
                debug!(path = %parts.uri.path(), "No session cookie on API request");
                ApiError::Unauthorized
            })?;

        let principal = state.verifier.verify(&token).await.map_err(|err| {
            warn!(error = %err, path = %parts.uri.path(), "Session token verification failed");
            ApiError::Unauthorized
        })?;

        Ok(Session(principal))
    }
}
