//! Access-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "token-issuer", test))]
use serde::Serialize;

use drivehub_domain::id::UserId;

/// Audience the auth server stamps on tokens of signed-in users.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Identity extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: UserId,
    pub email: Option<String>,
    pub expires_at: u64,
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

/// Claims the auth server puts in every access token.
///
/// | Field   | Meaning                                   |
/// |---------|-------------------------------------------|
/// | `sub`   | user id (UUID string)                     |
/// | `email` | address the user signed up with           |
/// | `aud`   | always `authenticated` for user sessions  |
/// | `role`  | database role, `authenticated`            |
/// | `exp`   | expiry, seconds since UNIX epoch          |
///
/// [`Serialize`] is only derived with the `token-issuer` feature.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "token-issuer", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub aud: String,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: u64,
}

/// Validate an access token, returning the identity it carries.
///
/// HS256 with the project secret; `exp`, `sub` and `aud` are required.
/// Default leeway of 60s tolerates clock skew against the auth server.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub", "aud"]);
    validation.set_audience(&[AUTHENTICATED_AUDIENCE]);

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

    let claims = data.claims;
    let user_id = claims
        .sub
        .parse::<UserId>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        email: claims.email,
        expires_at: claims.exp,
    })
}

/// Sign claims the way the auth server does. Test tooling only.
#[cfg(any(feature = "token-issuer", test))]
pub fn issue_access_token(claims: &JwtClaims, secret: &str) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("HS256 signing with an in-memory key cannot fail")
}
