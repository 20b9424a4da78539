use chrono::{Duration, Utc};

use crate::domain::repository::{AccountRepository, MailNotifier};
use crate::domain::types::RESET_TOKEN_TTL_SECS;
use crate::error::AccountsServiceError;
use crate::usecase::password::{generate_single_use_token, hash_password};

// ── ForgotPassword ───────────────────────────────────────────────────────────

pub struct ForgotPasswordUseCase<R: AccountRepository, M: MailNotifier> {
    pub repo: R,
    pub mail: M,
}

impl<R: AccountRepository, M: MailNotifier> ForgotPasswordUseCase<R, M> {
    pub async fn execute(&self, email: &str) -> Result<(), AccountsServiceError> {
        if email.trim().is_empty() {
            return Err(AccountsServiceError::MissingFields);
        }

        // Email only; a matching username does not qualify for a reset link.
        let account = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(AccountsServiceError::AccountNotFound)?;

        let token = generate_single_use_token();
        let expires = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECS);
        self.repo
            .set_reset_token(account.id, &token, expires)
            .await?;

        // Token is committed; delivery failure is logged, not propagated.
        if let Err(e) = self.mail.send_password_reset(&account.email, &token).await {
            tracing::warn!(error = %e, email = %account.email, "failed to send reset email");
        }

        Ok(())
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub struct ResetPasswordUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> ResetPasswordUseCase<R> {
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AccountsServiceError> {
        if input.new_password.is_empty() || input.confirm_password.is_empty() {
            return Err(AccountsServiceError::MissingFields);
        }
        if input.new_password != input.confirm_password {
            return Err(AccountsServiceError::PasswordMismatch);
        }

        // The store only returns an account whose token is unexpired at `now`;
        // unknown and expired tokens are indistinguishable to the caller.
        let account = self
            .repo
            .find_by_reset_token(&input.token, Utc::now())
            .await?
            .ok_or(AccountsServiceError::ResetTokenNotFound)?;

        // The only place besides create that recomputes the hash.
        let password_hash = hash_password(&input.new_password)?;
        self.repo
            .replace_password(account.id, &password_hash)
            .await
    }
}
