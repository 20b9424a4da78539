use chrono::{Duration, Utc};
use uuid::Uuid;

use gatehouse_accounts::error::AccountsServiceError;
use gatehouse_accounts::usecase::account::{
    GetCurrentAccountUseCase, RegisterInput, RegisterUseCase, VerifyEmailUseCase,
};
use gatehouse_accounts::usecase::password::verify_password;

use crate::helpers::{MockAccountRepo, MockMailNotifier, account_with_password};

fn register_input(username: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_unverified_account_with_hashed_password_and_token() {
    let repo = MockAccountRepo::empty();
    let accounts = repo.accounts_handle();
    let mail = MockMailNotifier::new();

    let usecase = RegisterUseCase { repo, mail };
    let out = usecase
        .execute(register_input("alice", "a@x.com", "p1"))
        .await
        .unwrap();

    assert_eq!(out.username, "alice");
    assert_eq!(out.email, "a@x.com");

    let accounts = accounts.lock().unwrap();
    let account = accounts.iter().find(|a| a.username == "alice").unwrap();
    assert!(!account.is_verified);
    assert!(account.verification_token.is_some());
    assert!(account.verification_token_expires.is_some());
    // Stored as a hash, never as the plaintext.
    assert_ne!(account.password_hash, "p1");
    assert!(verify_password("p1", &account.password_hash).unwrap());
}

#[tokio::test]
async fn should_send_verification_mail_with_the_stored_token() {
    let repo = MockAccountRepo::empty();
    let accounts = repo.accounts_handle();
    let mail = MockMailNotifier::new();
    let sent = mail.sent_handle();

    let usecase = RegisterUseCase { repo, mail };
    usecase
        .execute(register_input("alice", "a@x.com", "p1"))
        .await
        .unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, "verification");
    assert_eq!(sent[0].email, "a@x.com");

    let accounts = accounts.lock().unwrap();
    assert_eq!(
        accounts[0].verification_token.as_deref(),
        Some(sent[0].token.as_str())
    );
}

#[tokio::test]
async fn should_register_even_when_mail_transport_fails() {
    let repo = MockAccountRepo::empty();
    let accounts = repo.accounts_handle();

    let usecase = RegisterUseCase {
        repo,
        mail: MockMailNotifier::failing(),
    };
    let result = usecase.execute(register_input("alice", "a@x.com", "p1")).await;

    // Account mutation is committed before notification; delivery failure
    // must not fail the request.
    assert!(result.is_ok());
    assert_eq!(accounts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_missing_fields() {
    let usecase = RegisterUseCase {
        repo: MockAccountRepo::empty(),
        mail: MockMailNotifier::new(),
    };
    for (username, email, password) in [("", "a@x.com", "p1"), ("alice", "", "p1"), ("alice", "a@x.com", "")] {
        let result = usecase.execute(register_input(username, email, password)).await;
        assert!(matches!(result, Err(AccountsServiceError::MissingFields)));
    }
}

#[tokio::test]
async fn should_conflict_on_duplicate_username_or_email() {
    let usecase = RegisterUseCase {
        repo: MockAccountRepo::empty(),
        mail: MockMailNotifier::new(),
    };
    usecase
        .execute(register_input("alice", "a@x.com", "p1"))
        .await
        .unwrap();

    let same_username = usecase.execute(register_input("alice", "b@x.com", "p1")).await;
    assert!(matches!(
        same_username,
        Err(AccountsServiceError::DuplicateIdentity)
    ));

    let same_email = usecase.execute(register_input("bob", "a@x.com", "p1")).await;
    assert!(matches!(
        same_email,
        Err(AccountsServiceError::DuplicateIdentity)
    ));
}

// ── VerifyEmail ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_verify_exactly_once_per_token() {
    let account = account_with_password("alice", "a@x.com", "p1", false);
    let token = account.verification_token.clone().unwrap();
    let account_id = account.id;

    let repo = MockAccountRepo::new(vec![account]);
    let accounts = repo.accounts_handle();
    let usecase = VerifyEmailUseCase { repo };

    let verified_id = usecase.execute(&token).await.unwrap();
    assert_eq!(verified_id, account_id);

    {
        let accounts = accounts.lock().unwrap();
        assert!(accounts[0].is_verified);
        assert_eq!(accounts[0].verification_token, None);
    }

    // Token was cleared on first use; a replay behaves like an unknown token.
    let replay = usecase.execute(&token).await;
    assert!(matches!(
        replay,
        Err(AccountsServiceError::VerificationTokenNotFound)
    ));
}

#[tokio::test]
async fn should_reject_unknown_verification_token() {
    let usecase = VerifyEmailUseCase {
        repo: MockAccountRepo::empty(),
    };
    let result = usecase.execute("no-such-token").await;
    assert!(matches!(
        result,
        Err(AccountsServiceError::VerificationTokenNotFound)
    ));
}

#[tokio::test]
async fn should_reject_expired_verification_token() {
    let mut account = account_with_password("alice", "a@x.com", "p1", false);
    account.verification_token_expires = Some(Utc::now() - Duration::hours(1));
    let token = account.verification_token.clone().unwrap();

    let repo = MockAccountRepo::new(vec![account]);
    let accounts = repo.accounts_handle();
    let usecase = VerifyEmailUseCase { repo };

    let result = usecase.execute(&token).await;
    assert!(matches!(
        result,
        Err(AccountsServiceError::VerificationTokenNotFound)
    ));
    assert!(!accounts.lock().unwrap()[0].is_verified);
}

// ── GetCurrentAccount ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_current_account_by_id() {
    let account = account_with_password("alice", "a@x.com", "p1", true);
    let account_id = account.id;

    let usecase = GetCurrentAccountUseCase {
        repo: MockAccountRepo::new(vec![account]),
    };
    let found = usecase.execute(account_id).await.unwrap();
    assert_eq!(found.id, account_id);
    assert_eq!(found.username, "alice");
}

// ── Lifecycle round trip ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_after_register_and_verify() {
    use gatehouse_accounts::usecase::session::{LoginInput, LoginUseCase};

    use crate::helpers::{TEST_ACCESS_SECRET, TEST_REFRESH_SECRET};

    let store = MockAccountRepo::empty().accounts_handle();
    let mail = MockMailNotifier::new();
    let sent = mail.sent_handle();

    let register = RegisterUseCase {
        repo: MockAccountRepo {
            accounts: store.clone(),
        },
        mail,
    };
    register
        .execute(register_input("alice", "a@x.com", "p1"))
        .await
        .unwrap();

    let login = LoginUseCase {
        repo: MockAccountRepo {
            accounts: store.clone(),
        },
        access_secret: TEST_ACCESS_SECRET.to_owned(),
        refresh_secret: TEST_REFRESH_SECRET.to_owned(),
    };
    let login_input = || LoginInput {
        identifier: "alice".to_owned(),
        password: "p1".to_owned(),
    };

    // Login is gated until the mailed token is consumed.
    assert!(matches!(
        login.execute(login_input()).await,
        Err(AccountsServiceError::EmailNotVerified)
    ));

    let token = sent.lock().unwrap()[0].token.clone();
    let verify = VerifyEmailUseCase {
        repo: MockAccountRepo { accounts: store },
    };
    verify.execute(&token).await.unwrap();

    assert!(login.execute(login_input()).await.is_ok());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_account_id() {
    let usecase = GetCurrentAccountUseCase {
        repo: MockAccountRepo::empty(),
    };
    let result = usecase.execute(Uuid::now_v7()).await;
    assert!(matches!(result, Err(AccountsServiceError::AccountNotFound)));
}
