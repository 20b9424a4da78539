//! Session extractor: access-token cookie or `Authorization: Bearer`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use gatehouse_auth_types::cookie::ACCESS_TOKEN_COOKIE;
use gatehouse_auth_types::token::validate_access_token;

use crate::error::AccountsServiceError;
use crate::state::AppState;

/// Validated session identity for the current request.
///
/// Rejects with 401 `InvalidSession` when no token is presented or the token
/// fails signature/expiry validation.
#[derive(Debug, Clone)]
pub struct Session {
    pub account_id: Uuid,
    pub role: String,
    pub access_token_exp: u64,
}

fn token_from_parts(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE) {
        return Some(cookie.value().to_owned());
    }
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.to_owned())
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AccountsServiceError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = token_from_parts(parts);
        let secret = state.access_secret.clone();

        async move {
            let token = token.ok_or(AccountsServiceError::InvalidSession)?;
            let info = validate_access_token(&token, &secret)
                .map_err(|_| AccountsServiceError::InvalidSession)?;
            Ok(Self {
                account_id: info.account_id,
                role: info.role,
                access_token_exp: info.access_token_exp,
            })
        }
    }
}
