#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::Account;
use crate::error::AccountsServiceError;

/// Credential store for accounts.
///
/// Uniqueness of username/email is the store's responsibility (unique
/// constraints); `create` surfaces `DuplicateIdentity` from the constraint
/// violation rather than from a check-then-create.
pub trait AccountRepository: Send + Sync {
    /// Find by username OR email (exact match as stored).
    async fn find_by_identity(
        &self,
        username_or_email: &str,
    ) -> Result<Option<Account>, AccountsServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsServiceError>;

    /// Find by email only. Password-reset requests never match usernames.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError>;

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountsServiceError>;

    /// Find by reset token; only returns the account if the token is unexpired
    /// at `now`.
    async fn find_by_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountsServiceError>;

    /// Persist a new account. Fails `DuplicateIdentity` if the username or
    /// email is already taken.
    async fn create(&self, account: &Account) -> Result<(), AccountsServiceError>;

    /// Flip `is_verified` and clear the verification token + expiry.
    async fn mark_verified(&self, id: Uuid) -> Result<(), AccountsServiceError>;

    /// Set the reset token and its expiry.
    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), AccountsServiceError>;

    /// Replace the stored password hash and clear the reset token + expiry.
    async fn replace_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError>;
}

/// Mail transport port. Implementations deliver a link containing the given
/// single-use token; callers treat delivery as fire-and-forget (a failure is
/// logged, never rolled back into the account mutation).
pub trait MailNotifier: Send + Sync {
    async fn send_verification(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), AccountsServiceError>;

    async fn send_password_reset(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), AccountsServiceError>;
}
