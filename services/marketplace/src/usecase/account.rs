use drivehub_domain::id::UserId;

use crate::domain::repository::{BookingRepository, ProfileRepository};
use crate::domain::types::Profile;
use crate::error::MarketplaceError;

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct AccountOverview {
    pub profile: Profile,
    pub total_bookings: u64,
}

pub struct GetAccountUseCase<P: ProfileRepository, B: BookingRepository> {
    pub profiles: P,
    pub bookings: B,
}

impl<P: ProfileRepository, B: BookingRepository> GetAccountUseCase<P, B> {
    pub async fn execute(&self, user_id: UserId) -> Result<AccountOverview, MarketplaceError> {
        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or(MarketplaceError::ProfileNotFound)?;
        let total_bookings = self.bookings.count_by_user(user_id).await?;
        Ok(AccountOverview {
            profile,
            total_bookings,
        })
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub struct UpdateProfileUseCase<P: ProfileRepository> {
    pub repo: P,
}

impl<P: ProfileRepository> UpdateProfileUseCase<P> {
    /// Blank names count as absent; at least one name must remain.
    pub async fn execute(
        &self,
        user_id: UserId,
        input: UpdateProfileInput,
    ) -> Result<Profile, MarketplaceError> {
        let first_name = non_blank(input.first_name);
        let last_name = non_blank(input.last_name);
        if first_name.is_none() && last_name.is_none() {
            return Err(MarketplaceError::MissingData);
        }

        let mut profile = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(MarketplaceError::ProfileNotFound)?;
        self.repo
            .update_names(user_id, first_name.as_deref(), last_name.as_deref())
            .await?;

        if let Some(first_name) = first_name {
            profile.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            profile.last_name = last_name;
        }
        Ok(profile)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
