use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use drivehub_auth_types::cookie::{clear_session_cookies, set_session_cookies};
use drivehub_auth_types::session::Session;
use drivehub_domain::id::UserId;

use crate::error::MarketplaceError;
use crate::handlers::JsonBody;
use crate::handlers::account::ProfileResponse;
use crate::state::AppState;
use crate::usecase::session::{
    CurrentUserUseCase, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};

// ── POST /auth/sign-up ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SignUpRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), MarketplaceError> {
    let usecase = SignUpUseCase {
        auth: state.auth(),
        profiles: state.profile_repo(),
    };
    let profile = usecase
        .execute(SignUpInput {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

// ── POST /auth/sign-in ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SignInResponse {
    pub user_id: UserId,
    pub email: Option<String>,
    /// Access-token lifetime in seconds.
    pub expires_in: u64,
}

pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(body): JsonBody<SignInRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = SignInUseCase { auth: state.auth() };
    let session = usecase.execute(&body.email, &body.password).await?;

    let jar = set_session_cookies(
        jar,
        session.access_token,
        session.refresh_token,
        state.cookie_domain.clone(),
    );
    let body = SignInResponse {
        user_id: session.user.id,
        email: session.user.email,
        expires_in: session.expires_in,
    };
    Ok((StatusCode::OK, jar, Json(body)))
}

// ── GET /auth/session ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionResponse {
    pub signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub is_admin: bool,
}

/// Navigation state: never rejects, a signed-out caller gets `signed_in: false`.
pub async fn get_session(
    session: Option<Session>,
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, MarketplaceError> {
    let Some(session) = session else {
        return Ok(Json(SessionResponse {
            signed_in: false,
            user_id: None,
            email: None,
            first_name: None,
            is_admin: false,
        }));
    };
    let usecase = CurrentUserUseCase {
        profiles: state.profile_repo(),
        roles: state.role_repo(),
    };
    let current = usecase.execute(session.user_id).await?;
    let (email, first_name) = match current.profile {
        Some(profile) => (Some(profile.email), Some(profile.first_name)),
        None => (session.email, None),
    };
    Ok(Json(SessionResponse {
        signed_in: true,
        user_id: Some(current.user_id),
        email,
        first_name,
        is_admin: current.is_admin,
    }))
}

// ── DELETE /auth/session ─────────────────────────────────────────────────────

pub async fn sign_out(
    session: Option<Session>,
    State(state): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    if let Some(session) = session {
        let usecase = SignOutUseCase { auth: state.auth() };
        usecase.execute(&session.access_token).await;
    }
    let jar = clear_session_cookies(jar, state.cookie_domain.clone());
    (StatusCode::NO_CONTENT, jar)
}
