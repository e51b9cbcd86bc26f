//! Signed-in user extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use http::request::Parts;
use http::{HeaderMap, StatusCode, header};

use drivehub_core::error::{ErrorBody, REDIRECT_SIGN_IN};
use drivehub_domain::id::UserId;

use crate::cookie::DRIVEHUB_ACCESS_TOKEN;
use crate::token::{AuthError, validate_access_token};

/// HMAC secret the auth server signs access tokens with.
///
/// Services expose it from their state with `FromRef` so [`Session`] can be
/// extracted without knowing the concrete state type.
#[derive(Clone)]
pub struct SessionSecret(pub Arc<str>);

impl SessionSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

/// The signed-in user of the current request.
///
/// Read from the `Authorization: Bearer` header when present, otherwise from
/// the access-token cookie. Rejects with 401 and a redirect hint to the
/// sign-in view.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub email: Option<String>,
    pub expires_at: u64,
    /// Raw token, forwarded when calling the auth server on the user's behalf.
    pub access_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionRejection {
    #[error("sign in required")]
    Missing,
    #[error("session expired")]
    Expired,
    #[error("invalid session")]
    Invalid,
}

impl From<AuthError> for SessionRejection {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Expired => Self::Expired,
            AuthError::InvalidSignature | AuthError::Malformed => Self::Invalid,
        }
    }
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        ErrorBody::new("UNAUTHORIZED", self.to_string())
            .with_redirect(REDIRECT_SIGN_IN)
            .into_response_with(StatusCode::UNAUTHORIZED)
    }
}

fn read_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned);
    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(DRIVEHUB_ACCESS_TOKEN)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty())
    })
}

fn authenticate(headers: &HeaderMap, secret: &SessionSecret) -> Result<Session, SessionRejection> {
    let token = read_token(headers).ok_or(SessionRejection::Missing)?;
    let info = validate_access_token(&token, &secret.0)?;
    Ok(Session {
        user_id: info.user_id,
        email: info.email,
        expires_at: info.expires_at,
        access_token: token,
    })
}

impl<S> FromRequestParts<S> for Session
where
    SessionSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    // Validation is synchronous; resolve it before building the future so the
    // future does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(&parts.headers, &SessionSecret::from_ref(state));
        if let Err(ref rejection) = result {
            tracing::debug!(reason = %rejection, "session rejected");
        }
        async move { result }
    }
}

/// `Option<Session>` never rejects: missing or invalid tokens yield `None`.
impl<S> OptionalFromRequestParts<S> for Session
where
    SessionSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let session = authenticate(&parts.headers, &SessionSecret::from_ref(state)).ok();
        async move { Ok(session) }
    }
}
