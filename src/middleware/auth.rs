//! Session authentication extractor for Axum handlers.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::errors::AppError;
use crate::services::session::{self, SessionClaims};
use crate::AppState;

/// Authenticated dashboard user extracted from the session token.
///
/// The raw token is kept so it can be forwarded to the GraphQL API:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub token: String,
}

impl CurrentUser {
    fn from_claims(claims: SessionClaims, token: String) -> Self {
        Self {
            subject: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
            token,
        }
    }
}

/// Find the session token: `Authorization: Bearer` first, then the session cookie.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Decode the request's session, treating any lookup or decode failure as
/// "no session".
pub fn optional_session(headers: &HeaderMap, state: &AppState) -> Option<CurrentUser> {
    let token = session_token(headers, &state.config.session_cookie)?;
    let claims = session::decode_session(&token, &state.config.session_secret).ok()?;
    Some(CurrentUser::from_claims(claims, token))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, &state.config.session_cookie)
            .ok_or(AppError::Unauthorized)?;
        let claims = session::decode_session(&token, &state.config.session_secret)?;
        Ok(CurrentUser::from_claims(claims, token))
    }
}
