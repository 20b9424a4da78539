/// Accounts service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access tokens.
    pub jwt_access_secret: String,
    /// HMAC secret for signing JWT refresh tokens. Env var: `JWT_REFRESH_SECRET`;
    /// falls back to the access secret when unset (single-secret deployments).
    pub jwt_refresh_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Public base URL used in verification/reset links (e.g. "https://example.com").
    pub public_base_url: String,
    /// Mail API endpoint (e.g. "https://api.resend.com/emails").
    pub mail_api_url: String,
    /// Mail API bearer key.
    pub mail_api_key: String,
    /// Sender address for outgoing mail.
    pub mail_from: String,
    /// TCP port to listen on (default 3114). Env var: `ACCOUNTS_PORT`.
    pub accounts_port: u16,
}

impl AccountsConfig {
    pub fn from_env() -> Self {
        let jwt_access_secret = std::env::var("JWT_ACCESS_SECRET").expect("JWT_ACCESS_SECRET");
        let jwt_refresh_secret =
            std::env::var("JWT_REFRESH_SECRET").unwrap_or_else(|_| jwt_access_secret.clone());
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_access_secret,
            jwt_refresh_secret,
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            public_base_url: std::env::var("PUBLIC_BASE_URL").expect("PUBLIC_BASE_URL"),
            mail_api_url: std::env::var("MAIL_API_URL").expect("MAIL_API_URL"),
            mail_api_key: std::env::var("MAIL_API_KEY").expect("MAIL_API_KEY"),
            mail_from: std::env::var("MAIL_FROM").expect("MAIL_FROM"),
            accounts_port: std::env::var("ACCOUNTS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
        }
    }
}
