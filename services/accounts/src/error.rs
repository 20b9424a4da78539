use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Accounts service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("all fields are required")]
    MissingFields,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("username or email already taken")]
    DuplicateIdentity,
    #[error("account not found")]
    AccountNotFound,
    #[error("verification token invalid or expired")]
    VerificationTokenNotFound,
    #[error("reset token invalid or expired")]
    ResetTokenNotFound,
    #[error("email must be verified before login")]
    EmailNotVerified,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired session")]
    InvalidSession,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::PasswordMismatch => StatusCode::BAD_REQUEST,
            Self::DuplicateIdentity => StatusCode::CONFLICT,
            Self::AccountNotFound
            | Self::VerificationTokenNotFound
            | Self::ResetTokenNotFound => StatusCode::NOT_FOUND,
            Self::EmailNotVerified
            | Self::InvalidCredentials
            | Self::InvalidSession
            | Self::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, "internal error");
        }
        let body = serde_json::json!({
            "success": false,
            "statusCode": status.as_u16(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
