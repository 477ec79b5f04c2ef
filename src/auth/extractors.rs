use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::extract::CookieJar;
use tracing::warn;
use uuid::Uuid;

use crate::auth::services::TokenKeys;
use crate::auth::SESSION_COOKIE;
use crate::error::ApiError;

/// Extracts and validates the session token, returning the user ID.
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = TokenKeys::from_ref(state);

        // Session cookie first, Authorization header as a fallback for
        // non-browser clients.
        let cookie_token = parts
            .extract::<CookieJar>()
            .await
            .ok()
            .and_then(|jar| jar.get(SESSION_COOKIE).map(|c| c.value().to_string()));

        let token = match cookie_token {
            Some(t) => t,
            None => parts
                .headers
                .get(axum::http::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| t.to_string())
                .ok_or(ApiError::Unauthenticated("Missing session token"))?,
        };

        let claims = keys.verify(&token).map_err(|_| {
            warn!("invalid or expired session token");
            ApiError::Unauthenticated("Invalid or expired session token")
        })?;

        Ok(CurrentUser(claims.sub))
    }
}
