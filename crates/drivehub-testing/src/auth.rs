//! Session helpers for integration tests.
//!
//! Real sessions are minted by the auth server. In tests, `MockSession` signs
//! an equivalent token with a test secret so requests pass the `Session`
//! extractor without any network calls.

use std::time::{SystemTime, UNIX_EPOCH};

use http::{HeaderMap, HeaderName, HeaderValue, header};
use uuid::Uuid;

use drivehub_auth_types::cookie::DRIVEHUB_ACCESS_TOKEN;
use drivehub_auth_types::token::{AUTHENTICATED_AUDIENCE, JwtClaims, issue_access_token};
use drivehub_domain::id::UserId;

/// Secret shared by test state and [`MockSession`].
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-integration-tests";

/// A signed-in user as seen by the service under test.
pub struct MockSession {
    pub user_id: UserId,
    pub email: String,
    pub token: String,
}

impl MockSession {
    /// Sign a one-hour token for a fresh user.
    pub fn new() -> Self {
        Self::for_user(UserId(Uuid::new_v4()))
    }

    pub fn for_user(user_id: UserId) -> Self {
        Self::with_expiry(user_id, now() + 3600)
    }

    /// Sign a token that expired a day ago.
    pub fn expired(user_id: UserId) -> Self {
        Self::with_expiry(user_id, now().saturating_sub(86_400))
    }

    fn with_expiry(user_id: UserId, exp: u64) -> Self {
        let email = format!("{}@drivehub.test", user_id.0.simple());
        let token = issue_access_token(
            &JwtClaims {
                sub: user_id.to_string(),
                email: Some(email.clone()),
                aud: AUTHENTICATED_AUDIENCE.to_owned(),
                role: Some("authenticated".to_owned()),
                exp,
            },
            TEST_SESSION_SECRET,
        );
        Self {
            user_id,
            email,
            token,
        }
    }

    /// `Cookie` header carrying the access token.
    pub fn cookie_header(&self) -> (HeaderName, HeaderValue) {
        let value = format!("{DRIVEHUB_ACCESS_TOKEN}={}", self.token);
        (
            header::COOKIE,
            HeaderValue::from_str(&value).expect("JWT is valid header text"),
        )
    }

    /// `Authorization: Bearer` header carrying the access token.
    pub fn bearer_header(&self) -> (HeaderName, HeaderValue) {
        let value = format!("Bearer {}", self.token);
        (
            header::AUTHORIZATION,
            HeaderValue::from_str(&value).expect("JWT is valid header text"),
        )
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let (name, value) = self.bearer_header();
        map.insert(name, value);
        map
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
