use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::error::AccountsServiceError;
use crate::response::ok;
use crate::state::AppState;
use crate::usecase::reset::{ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase};

// ── POST /api/v1/users/forgot-password ───────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = ForgotPasswordUseCase {
        repo: state.account_repo(),
        mail: state.mail.clone(),
    };
    usecase.execute(&body.email).await?;

    Ok(ok(
        StatusCode::OK,
        "password reset email sent",
        serde_json::json!({}),
    ))
}

// ── POST /api/v1/users/reset-password/{token} ────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AccountsServiceError> {
    let usecase = ResetPasswordUseCase {
        repo: state.account_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            token,
            new_password: body.new_password,
            confirm_password: body.confirm_password,
        })
        .await?;

    Ok(ok(
        StatusCode::OK,
        "password reset successful",
        serde_json::json!({}),
    ))
}
