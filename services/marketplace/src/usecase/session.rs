use chrono::Utc;

use drivehub_domain::id::UserId;
use drivehub_domain::role::AppRole;

use crate::domain::repository::{AuthPort, ProfileRepository, RoleRepository};
use crate::domain::types::{AuthSession, AuthUser, Profile};
use crate::error::MarketplaceError;

fn required(value: &str, field: &'static str) -> Result<String, MarketplaceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MarketplaceError::MissingField(field));
    }
    Ok(value.to_owned())
}

fn normalize_email(email: &str) -> Result<String, MarketplaceError> {
    let email = required(email, "email")?.to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(MarketplaceError::InvalidField("email".into())),
    }
}

// ── SignUp ───────────────────────────────────────────────────────────────────

pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct SignUpUseCase<A: AuthPort, P: ProfileRepository> {
    pub auth: A,
    pub profiles: P,
}

impl<A: AuthPort, P: ProfileRepository> SignUpUseCase<A, P> {
    /// Register the user at the auth server, then create their profile row.
    ///
    /// An already registered email is accepted when the password matches and
    /// the account has no profile yet, so a sign-up whose profile insert
    /// failed can be retried.
    pub async fn execute(&self, input: SignUpInput) -> Result<Profile, MarketplaceError> {
        let email = normalize_email(&input.email)?;
        if input.password.is_empty() {
            return Err(MarketplaceError::MissingField("password"));
        }
        let first_name = required(&input.first_name, "first name")?;
        let last_name = required(&input.last_name, "last name")?;

        let user = match self.auth.sign_up(&email, &input.password).await {
            Ok(user) => user,
            Err(MarketplaceError::EmailAlreadyRegistered) => {
                self.registered_without_profile(&email, &input.password)
                    .await?
            }
            Err(e) => return Err(e),
        };
        let profile = Profile {
            id: user.id,
            first_name,
            last_name,
            email: user.email.unwrap_or(email),
            created_at: Utc::now(),
        };
        self.profiles.create(&profile).await?;

        tracing::info!(user_id = %profile.id, "user signed up");
        Ok(profile)
    }

    async fn registered_without_profile(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, MarketplaceError> {
        let user = match self.auth.sign_in(email, password).await {
            Ok(session) => session.user,
            Err(MarketplaceError::InvalidCredentials) => {
                return Err(MarketplaceError::EmailAlreadyRegistered);
            }
            Err(e) => return Err(e),
        };
        if self.profiles.find_by_id(user.id).await?.is_some() {
            return Err(MarketplaceError::EmailAlreadyRegistered);
        }
        tracing::warn!(user_id = %user.id, "completing sign-up for account without profile");
        Ok(user)
    }
}

// ── SignIn ───────────────────────────────────────────────────────────────────

pub struct SignInUseCase<A: AuthPort> {
    pub auth: A,
}

impl<A: AuthPort> SignInUseCase<A> {
    pub async fn execute(&self, email: &str, password: &str) -> Result<AuthSession, MarketplaceError> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(MarketplaceError::MissingField("password"));
        }
        let session = self.auth.sign_in(&email, password).await?;
        tracing::debug!(user_id = %session.user.id, "user signed in");
        Ok(session)
    }
}

// ── SignOut ──────────────────────────────────────────────────────────────────

pub struct SignOutUseCase<A: AuthPort> {
    pub auth: A,
}

impl<A: AuthPort> SignOutUseCase<A> {
    /// Revoke the session at the auth server. Failures are logged, not
    /// returned: the caller clears its cookies either way.
    pub async fn execute(&self, access_token: &str) {
        if let Err(e) = self.auth.sign_out(access_token).await {
            tracing::warn!(error = %e, "sign-out at auth server failed");
        }
    }
}

// ── CurrentUser ──────────────────────────────────────────────────────────────

pub struct CurrentUser {
    pub user_id: UserId,
    pub profile: Option<Profile>,
    pub is_admin: bool,
}

pub struct CurrentUserUseCase<P: ProfileRepository, R: RoleRepository> {
    pub profiles: P,
    pub roles: R,
}

impl<P: ProfileRepository, R: RoleRepository> CurrentUserUseCase<P, R> {
    pub async fn execute(&self, user_id: UserId) -> Result<CurrentUser, MarketplaceError> {
        let profile = self.profiles.find_by_id(user_id).await?;
        let is_admin = self.roles.has_role(user_id, AppRole::Admin).await?;
        Ok(CurrentUser {
            user_id,
            profile,
            is_admin,
        })
    }
}
