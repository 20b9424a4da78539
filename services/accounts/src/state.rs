use sea_orm::DatabaseConnection;

use crate::infra::db::DbAccountRepository;
use crate::infra::mail::HttpMailNotifier;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mail: HttpMailNotifier,
    pub access_secret: String,
    pub refresh_secret: String,
    pub cookie_domain: String,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }
}
