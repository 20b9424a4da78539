use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use gatehouse_auth_types::cookie::{ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};
use gatehouse_auth_types::token::{JwtClaims, validate_token};

use crate::domain::repository::AccountRepository;
use crate::domain::types::AccountRole;
use crate::error::AccountsServiceError;
use crate::usecase::password::verify_password;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn sign(claims: &JwtClaims, secret: &str) -> Result<String, AccountsServiceError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AccountsServiceError::Internal(e.into()))
}

/// Issue a short-lived access token (now + 1 day). Returns the token and its
/// expiry timestamp.
pub fn issue_access_token(
    account_id: Uuid,
    role: AccountRole,
    secret: &str,
) -> Result<(String, u64), AccountsServiceError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = JwtClaims {
        sub: account_id.to_string(),
        role: role.as_str().to_owned(),
        exp,
    };
    Ok((sign(&claims, secret)?, exp))
}

/// Issue a long-lived refresh token (now + 30 days).
pub fn issue_refresh_token(
    account_id: Uuid,
    role: AccountRole,
    secret: &str,
) -> Result<String, AccountsServiceError> {
    let claims = JwtClaims {
        sub: account_id.to_string(),
        role: role.as_str().to_owned(),
        exp: now_secs() + REFRESH_TOKEN_EXP,
    };
    sign(&claims, secret)
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    /// Username or email; both are matched.
    pub identifier: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub account_id: Uuid,
    pub role: AccountRole,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub struct LoginUseCase<R: AccountRepository> {
    pub repo: R,
    pub access_secret: String,
    pub refresh_secret: String,
}

impl<R: AccountRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AccountsServiceError> {
        if input.identifier.trim().is_empty() || input.password.is_empty() {
            return Err(AccountsServiceError::MissingFields);
        }

        let account = self
            .repo
            .find_by_identity(&input.identifier)
            .await?
            .ok_or(AccountsServiceError::AccountNotFound)?;

        // Verification gates login even with correct credentials.
        if !account.is_verified {
            return Err(AccountsServiceError::EmailNotVerified);
        }

        if !verify_password(&input.password, &account.password_hash)? {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        let (access_token, access_token_exp) =
            issue_access_token(account.id, account.role, &self.access_secret)?;
        let refresh_token = issue_refresh_token(account.id, account.role, &self.refresh_secret)?;

        Ok(LoginOutput {
            account_id: account.id,
            role: account.role,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── RefreshSession ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshSessionOutput {
    pub account_id: Uuid,
    pub role: AccountRole,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub struct RefreshSessionUseCase<R: AccountRepository> {
    pub repo: R,
    pub access_secret: String,
    pub refresh_secret: String,
}

impl<R: AccountRepository> RefreshSessionUseCase<R> {
    pub async fn execute(
        &self,
        refresh_token_value: &str,
    ) -> Result<RefreshSessionOutput, AccountsServiceError> {
        // Validate refresh token (sig + exp); an expired access token is
        // irrelevant here.
        let claims = validate_token(refresh_token_value, &self.refresh_secret)
            .map_err(|_| AccountsServiceError::InvalidRefreshToken)?;

        let account_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AccountsServiceError::InvalidRefreshToken)?;

        // Re-resolve the account so a deleted/unknown subject cannot refresh.
        let account = self
            .repo
            .find_by_id(account_id)
            .await?
            .ok_or(AccountsServiceError::InvalidRefreshToken)?;

        let (access_token, access_token_exp) =
            issue_access_token(account.id, account.role, &self.access_secret)?;
        let refresh_token = issue_refresh_token(account.id, account.role, &self.refresh_secret)?;

        Ok(RefreshSessionOutput {
            account_id: account.id,
            role: account.role,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}
