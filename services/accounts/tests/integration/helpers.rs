use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use gatehouse_accounts::domain::repository::{AccountRepository, MailNotifier};
use gatehouse_accounts::domain::types::{Account, AccountRole};
use gatehouse_accounts::error::AccountsServiceError;
use gatehouse_accounts::usecase::password::hash_password;

pub const TEST_ACCESS_SECRET: &str = "test-access-secret";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret";

// ── MockAccountRepo ──────────────────────────────────────────────────────────

/// In-memory account store. Emulates the database's unique constraints in
/// `create` so conflict behavior can be exercised without Postgres.
pub struct MockAccountRepo {
    pub accounts: Arc<Mutex<Vec<Account>>>,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn accounts_handle(&self) -> Arc<Mutex<Vec<Account>>> {
        Arc::clone(&self.accounts)
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_by_identity(
        &self,
        username_or_email: &str,
    ) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username_or_email || a.email == username_or_email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.verification_token.as_deref() == Some(token))
            .cloned())
    }

    async fn find_by_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountsServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| {
                a.reset_password_token.as_deref() == Some(token)
                    && a.reset_password_expires.is_some_and(|expires| expires >= now)
            })
            .cloned())
    }

    async fn create(&self, account: &Account) -> Result<(), AccountsServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        let duplicate = accounts
            .iter()
            .any(|a| a.username == account.username || a.email == account.email);
        if duplicate {
            return Err(AccountsServiceError::DuplicateIdentity);
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), AccountsServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(a) = accounts.iter_mut().find(|a| a.id == id) {
            a.is_verified = true;
            a.verification_token = None;
            a.verification_token_expires = None;
            a.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), AccountsServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(a) = accounts.iter_mut().find(|a| a.id == id) {
            a.reset_password_token = Some(token.to_owned());
            a.reset_password_expires = Some(expires);
            a.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn replace_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(a) = accounts.iter_mut().find(|a| a.id == id) {
            a.password_hash = password_hash.to_owned();
            a.reset_password_token = None;
            a.reset_password_expires = None;
            a.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── MockMailNotifier ─────────────────────────────────────────────────────────

/// Records every send; optionally fails to simulate a broken mail transport.
#[derive(Clone)]
pub struct MockMailNotifier {
    pub sent: Arc<Mutex<Vec<SentMail>>>,
    pub fail: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub kind: &'static str,
    pub email: String,
    pub token: String,
}

impl MockMailNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<SentMail>>> {
        Arc::clone(&self.sent)
    }

    fn record(&self, kind: &'static str, email: &str, token: &str) -> Result<(), AccountsServiceError> {
        if self.fail {
            return Err(AccountsServiceError::Internal(anyhow::anyhow!(
                "mail transport down"
            )));
        }
        self.sent.lock().unwrap().push(SentMail {
            kind,
            email: email.to_owned(),
            token: token.to_owned(),
        });
        Ok(())
    }
}

impl MailNotifier for MockMailNotifier {
    async fn send_verification(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), AccountsServiceError> {
        self.record("verification", email, token)
    }

    async fn send_password_reset(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), AccountsServiceError> {
        self.record("reset", email, token)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Build a persisted-looking account with a real Argon2 hash of `password`.
pub fn account_with_password(
    username: &str,
    email: &str,
    password: &str,
    verified: bool,
) -> Account {
    let now = Utc::now();
    Account {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        email: email.to_owned(),
        password_hash: hash_password(password).unwrap(),
        role: AccountRole::User,
        is_verified: verified,
        verification_token: if verified {
            None
        } else {
            Some("fixture-verification-token".to_owned())
        },
        verification_token_expires: if verified {
            None
        } else {
            Some(now + chrono::Duration::hours(24))
        },
        reset_password_token: None,
        reset_password_expires: None,
        created_at: now,
        updated_at: now,
    }
}
