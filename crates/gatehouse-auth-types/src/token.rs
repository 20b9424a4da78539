//! JWT session-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_ACCOUNTS_SERVICE", test))]
use serde::Serialize;
use uuid::Uuid;

/// Identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub account_id: Uuid,
    pub role: String,
    pub access_token_exp: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims shared by token creation (accounts service) and validation
/// (any consumer holding the secret).
///
/// `sub` is the account ID as a UUID string, `role` the account role wire
/// value (`"user"` / `"admin"`), `exp` seconds since the UNIX epoch.
///
/// [`Deserialize`] is always available — all consumers validate tokens.
/// [`Serialize`] requires the **`USE_ONLY_IN_ACCOUNTS_SERVICE`** cargo
/// feature; only the accounts service enables it because it is the sole
/// token issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_ACCOUNTS_SERVICE", test), derive(Serialize))]
pub struct JwtClaims {
    /// Account ID (UUID string).
    pub sub: String,
    /// Account role wire value (`"user"` / `"admin"`).
    pub role: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew between services.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate an access-token value (cookie or bearer), returning parsed identity.
///
/// This is the primary public API for token validation: it is called on every
/// authenticated request to extract the account identity from the JWT.
pub fn validate_access_token(token_value: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token_value, secret)?;
    let account_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        account_id,
        role: claims.role,
        access_token_exp: claims.exp,
    })
}

/// Validate a token and return raw JWT claims.
///
/// Used by the accounts service's refresh flow — validates the refresh token,
/// then looks up the account from the `sub` claim to issue a new pair.
///
/// Requires the `USE_ONLY_IN_ACCOUNTS_SERVICE` feature; all other consumers
/// use [`validate_access_token`].
#[cfg(any(feature = "USE_ONLY_IN_ACCOUNTS_SERVICE", test))]
pub fn validate_token(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    decode_jwt(token, secret)
}
