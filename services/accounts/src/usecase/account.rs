use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::repository::{AccountRepository, MailNotifier};
use crate::domain::types::{Account, AccountRole, VERIFICATION_TOKEN_TTL_HOURS};
use crate::error::AccountsServiceError;
use crate::usecase::password::{generate_single_use_token, hash_password};

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Public-safe summary returned on registration (no id, no hash, no token).
#[derive(Debug)]
pub struct RegisterOutput {
    pub username: String,
    pub email: String,
}

pub struct RegisterUseCase<R: AccountRepository, M: MailNotifier> {
    pub repo: R,
    pub mail: M,
}

impl<R: AccountRepository, M: MailNotifier> RegisterUseCase<R, M> {
    pub async fn execute(
        &self,
        input: RegisterInput,
    ) -> Result<RegisterOutput, AccountsServiceError> {
        if input.username.trim().is_empty()
            || input.email.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(AccountsServiceError::MissingFields);
        }

        let password_hash = hash_password(&input.password)?;
        let token = generate_single_use_token();
        let now = Utc::now();
        let account = Account {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            password_hash,
            role: AccountRole::User,
            is_verified: false,
            verification_token: Some(token.clone()),
            verification_token_expires: Some(now + Duration::hours(VERIFICATION_TOKEN_TTL_HOURS)),
            reset_password_token: None,
            reset_password_expires: None,
            created_at: now,
            updated_at: now,
        };

        // The store's unique constraints decide the duplicate race; a loser
        // gets DuplicateIdentity here.
        self.repo.create(&account).await?;

        // The account is committed at this point. Delivery failure is logged
        // and does not fail the registration.
        if let Err(e) = self.mail.send_verification(&account.email, &token).await {
            tracing::warn!(error = %e, email = %account.email, "failed to send verification email");
        }

        Ok(RegisterOutput {
            username: account.username,
            email: account.email,
        })
    }
}

// ── VerifyEmail ──────────────────────────────────────────────────────────────

pub struct VerifyEmailUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> VerifyEmailUseCase<R> {
    /// Consume a verification token. One-shot: the token is cleared on
    /// success, so a replay finds nothing and fails the same way an unknown
    /// token does.
    pub async fn execute(&self, token: &str) -> Result<Uuid, AccountsServiceError> {
        let account = self
            .repo
            .find_by_verification_token(token)
            .await?
            .ok_or(AccountsServiceError::VerificationTokenNotFound)?;

        let expired = account
            .verification_token_expires
            .is_some_and(|expires| Utc::now() > expires);
        if expired {
            return Err(AccountsServiceError::VerificationTokenNotFound);
        }

        self.repo.mark_verified(account.id).await?;
        Ok(account.id)
    }
}

// ── GetCurrentAccount ────────────────────────────────────────────────────────

pub struct GetCurrentAccountUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> GetCurrentAccountUseCase<R> {
    pub async fn execute(&self, account_id: Uuid) -> Result<Account, AccountsServiceError> {
        self.repo
            .find_by_id(account_id)
            .await?
            .ok_or(AccountsServiceError::AccountNotFound)
    }
}
