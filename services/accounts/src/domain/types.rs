use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account permission level. Stored and serialized as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    User,
    Admin,
}

impl AccountRole {
    /// Wire/storage value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse the wire/storage value. Returns `None` for unknown values.
    pub fn from_str_opt(v: &str) -> Option<Self> {
        match v {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl Default for AccountRole {
    fn default() -> Self {
        Self::User
    }
}

/// A user account and its credential/session lifecycle state.
///
/// The password exists only as an Argon2id hash; single-use tokens are
/// cleared when consumed so they can never match twice.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub verification_token_expires: Option<DateTime<Utc>>,
    pub reset_password_token: Option<String>,
    pub reset_password_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single-use token length in characters (verification + reset).
pub const SINGLE_USE_TOKEN_LEN: usize = 32;

/// Verification-token time-to-live in hours.
pub const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;

/// Reset-token time-to-live in seconds (10 minutes).
pub const RESET_TOKEN_TTL_SECS: i64 = 600;
