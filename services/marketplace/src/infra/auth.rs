use anyhow::{Context as _, anyhow};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drivehub_domain::id::UserId;

use crate::domain::repository::AuthPort;
use crate::domain::types::{AuthSession, AuthUser};
use crate::error::MarketplaceError;

/// Client for the BaaS auth server, authenticated with the anon key.
#[derive(Clone)]
pub struct BaasAuth {
    pub http: reqwest::Client,
    pub base_url: String,
    pub anon_key: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthServerUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

impl From<AuthServerUser> for AuthUser {
    fn from(user: AuthServerUser) -> Self {
        Self {
            id: UserId(user.id),
            email: user.email,
        }
    }
}

/// Sign-up answers with the bare user when email confirmation is on, and with
/// a full session (user nested) when it is off.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session { user: AuthServerUser },
    User(AuthServerUser),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
    user: AuthServerUser,
}

/// Error body of the auth server. Older versions use `error` and
/// `error_description`, newer ones `error_code` and `msg`.
#[derive(Debug, Default, Deserialize)]
struct AuthServerError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl AuthServerError {
    fn code(&self) -> Option<&str> {
        self.error_code.as_deref().or(self.error.as_deref())
    }

    fn text(&self) -> String {
        self.msg
            .as_deref()
            .or(self.error_description.as_deref())
            .or(self.message.as_deref())
            .unwrap_or("request rejected by auth server")
            .to_owned()
    }

    fn is_already_registered(&self) -> bool {
        matches!(self.code(), Some("user_already_exists" | "email_exists"))
            || self.text().to_ascii_lowercase().contains("already registered")
    }

    fn is_invalid_credentials(&self) -> bool {
        matches!(self.code(), Some("invalid_credentials" | "invalid_grant"))
    }
}

async fn read_error(resp: reqwest::Response) -> AuthServerError {
    resp.json().await.unwrap_or_default()
}

fn sign_up_error(status: StatusCode, body: AuthServerError) -> MarketplaceError {
    if body.is_already_registered() {
        MarketplaceError::EmailAlreadyRegistered
    } else if status.is_client_error() {
        MarketplaceError::AuthRejected(body.text())
    } else {
        anyhow!("sign-up failed ({status}): {}", body.text()).into()
    }
}

fn sign_in_error(status: StatusCode, body: AuthServerError) -> MarketplaceError {
    if body.is_invalid_credentials() {
        MarketplaceError::InvalidCredentials
    } else if status.is_client_error() {
        MarketplaceError::AuthRejected(body.text())
    } else {
        anyhow!("sign-in failed ({status}): {}", body.text()).into()
    }
}

impl BaasAuth {
    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.base_url)
    }
}

impl AuthPort for BaasAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, MarketplaceError> {
        let resp = self
            .http
            .post(self.url("/signup"))
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .context("sign-up request")?;
        let status = resp.status();
        if !status.is_success() {
            return Err(sign_up_error(status, read_error(resp).await));
        }
        let user = match resp
            .json::<SignUpResponse>()
            .await
            .context("decode sign-up response")?
        {
            SignUpResponse::Session { user } | SignUpResponse::User(user) => user,
        };
        Ok(user.into())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, MarketplaceError> {
        let resp = self
            .http
            .post(self.url("/token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .context("sign-in request")?;
        let status = resp.status();
        if !status.is_success() {
            return Err(sign_in_error(status, read_error(resp).await));
        }
        let token: TokenResponse = resp.json().await.context("decode token response")?;
        Ok(AuthSession {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
            user: token.user.into(),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), MarketplaceError> {
        let resp = self
            .http
            .post(self.url("/logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .context("sign-out request")?;
        let status = resp.status();
        // Already revoked or expired sessions are signed out.
        if status.is_success()
            || matches!(
                status,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
            )
        {
            return Ok(());
        }
        Err(anyhow!("sign-out failed ({status})").into())
    }
}
