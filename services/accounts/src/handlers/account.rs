use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Account;
use crate::error::AccountsServiceError;
use crate::extract::Session;
use crate::response::ok;
use crate::state::AppState;
use crate::usecase::account::{
    GetCurrentAccountUseCase, RegisterInput, RegisterUseCase, VerifyEmailUseCase,
};

// ── POST /api/v1/users/register ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub username: String,
    pub email: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = RegisterUseCase {
        repo: state.account_repo(),
        mail: state.mail.clone(),
    };

    let out = usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(ok(
        StatusCode::CREATED,
        "account registered successfully",
        RegisterResponse {
            username: out.username,
            email: out.email,
        },
    ))
}

// ── GET /api/v1/users/verify/{token} ─────────────────────────────────────────

#[derive(Serialize)]
pub struct VerifyResponse {
    pub id: Uuid,
}

pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = VerifyEmailUseCase {
        repo: state.account_repo(),
    };
    let account_id = usecase.execute(&token).await?;

    Ok(ok(
        StatusCode::OK,
        "email verified successfully",
        VerifyResponse { id: account_id },
    ))
}

// ── GET /api/v1/users/me ─────────────────────────────────────────────────────

/// Public view of an account. Deliberately has no password field, so the hash
/// cannot leak through any serialization path.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role.as_str().to_owned(),
            is_verified: account.is_verified,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

pub async fn current_account(
    session: Session,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = GetCurrentAccountUseCase {
        repo: state.account_repo(),
    };
    let account = usecase.execute(session.account_id).await?;

    Ok(ok(
        StatusCode::OK,
        "current account",
        AccountResponse::from(account),
    ))
}
