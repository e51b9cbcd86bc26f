#![allow(async_fn_in_trait)]

use bytes::Bytes;

use drivehub_domain::booking::BookingStatus;
use drivehub_domain::id::{BookingId, CarId, UserId};
use drivehub_domain::pagination::PageRequest;
use drivehub_domain::role::AppRole;

use crate::domain::types::{AuthSession, AuthUser, Booking, Car, CarFilter, Profile};
use crate::error::MarketplaceError;

/// Repository for car listings.
pub trait CarRepository: Send + Sync {
    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, MarketplaceError>;

    /// Available cars matching `filter`, newest first.
    async fn list_available(&self, filter: &CarFilter) -> Result<Vec<Car>, MarketplaceError>;

    /// Newest available cars, at most `limit`.
    async fn list_featured(&self, limit: u64) -> Result<Vec<Car>, MarketplaceError>;

    /// Every car owned by `provider_id`, newest first.
    async fn list_by_provider(&self, provider_id: UserId) -> Result<Vec<Car>, MarketplaceError>;

    async fn list_by_ids(&self, ids: &[CarId]) -> Result<Vec<Car>, MarketplaceError>;

    async fn create(&self, car: &Car) -> Result<(), MarketplaceError>;

    async fn set_available(&self, id: CarId, available: bool) -> Result<(), MarketplaceError>;
}

/// Repository for bookings.
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, MarketplaceError>;

    async fn create(&self, booking: &Booking) -> Result<(), MarketplaceError>;

    /// Bookings made by `user_id`, newest first.
    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Booking>, MarketplaceError>;

    async fn count_by_user(&self, user_id: UserId) -> Result<u64, MarketplaceError>;

    /// Bookings on any of `car_ids`, newest first.
    async fn list_by_cars(&self, car_ids: &[CarId]) -> Result<Vec<Booking>, MarketplaceError>;

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<(), MarketplaceError>;
}

/// Repository for renter profiles.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<Profile>, MarketplaceError>;

    async fn create(&self, profile: &Profile) -> Result<(), MarketplaceError>;

    async fn update_names(
        &self,
        id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), MarketplaceError>;
}

/// Role assignments.
pub trait RoleRepository: Send + Sync {
    async fn has_role(&self, user_id: UserId, role: AppRole) -> Result<bool, MarketplaceError>;
}

/// Object storage for car images.
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `key` and return the object's public URL.
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<String, MarketplaceError>;

    /// Delete the objects stored under `keys`.
    async fn remove(&self, keys: &[String]) -> Result<(), MarketplaceError>;
}

/// Port to the BaaS auth server.
pub trait AuthPort: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, MarketplaceError>;

    async fn sign_in(&self, email: &str, password: &str)
    -> Result<AuthSession, MarketplaceError>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), MarketplaceError>;
}
