use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_auth_types::cookie::{
    REFRESH_TOKEN_COOKIE, clear_session_cookies, set_access_token_cookie,
    set_refresh_token_cookie,
};

use crate::error::AccountsServiceError;
use crate::response::ok;
use crate::state::AppState;
use crate::usecase::session::{LoginInput, LoginUseCase, RefreshSessionUseCase};

// ── POST /api/v1/users/login ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Username or email. The legacy body key `userEmailOrUsername` is
    /// accepted as an alias.
    #[serde(alias = "userEmailOrUsername")]
    pub identifier: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub role: String,
    #[serde(rename = "accessTokenExp")]
    pub access_token_exp: u64,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = LoginUseCase {
        repo: state.account_repo(),
        access_secret: state.access_secret.clone(),
        refresh_secret: state.refresh_secret.clone(),
    };

    let out = usecase
        .execute(LoginInput {
            identifier: body.identifier,
            password: body.password,
        })
        .await?;

    let jar = set_access_token_cookie(jar, out.access_token, state.cookie_domain.clone());
    let jar = set_refresh_token_cookie(jar, out.refresh_token, state.cookie_domain.clone());

    Ok((
        jar,
        ok(
            StatusCode::OK,
            "login successful",
            SessionResponse {
                id: out.account_id,
                role: out.role.as_str().to_owned(),
                access_token_exp: out.access_token_exp,
            },
        ),
    ))
}

// ── POST /api/v1/users/refresh-token ─────────────────────────────────────────

pub async fn refresh_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let refresh_value = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or(AccountsServiceError::InvalidRefreshToken)?;

    let usecase = RefreshSessionUseCase {
        repo: state.account_repo(),
        access_secret: state.access_secret.clone(),
        refresh_secret: state.refresh_secret.clone(),
    };

    let out = usecase.execute(&refresh_value).await?;

    let jar = set_access_token_cookie(jar, out.access_token, state.cookie_domain.clone());
    let jar = set_refresh_token_cookie(jar, out.refresh_token, state.cookie_domain.clone());

    Ok((
        jar,
        ok(
            StatusCode::OK,
            "session refreshed",
            SessionResponse {
                id: out.account_id,
                role: out.role.as_str().to_owned(),
                access_token_exp: out.access_token_exp,
            },
        ),
    ))
}

// ── POST /api/v1/users/logout ────────────────────────────────────────────────

/// Clears both session cookies unconditionally; succeeds with or without a
/// valid session.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let jar = clear_session_cookies(jar, state.cookie_domain.clone());
    Ok((jar, ok(StatusCode::OK, "logged out", serde_json::json!({}))))
}
