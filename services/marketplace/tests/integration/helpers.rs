use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};

use drivehub_domain::booking::BookingStatus;
use drivehub_domain::car::{CarType, FuelType, Transmission};
use drivehub_domain::id::{BookingId, CarId, UserId};
use drivehub_domain::pagination::PageRequest;
use drivehub_domain::role::AppRole;
use drivehub_marketplace::domain::repository::{
    AuthPort, BookingRepository, CarRepository, ObjectStorage, ProfileRepository, RoleRepository,
};
use drivehub_marketplace::domain::types::{
    AuthSession, AuthUser, Booking, Car, CarFilter, Profile,
};
use drivehub_marketplace::error::MarketplaceError;

// ── MockCarRepo ──────────────────────────────────────────────────────────────

/// In-memory car store. Clones share the same list.
#[derive(Clone, Default)]
pub struct MockCarRepo {
    pub cars: Arc<Mutex<Vec<Car>>>,
    pub fail_create: bool,
}

impl MockCarRepo {
    pub fn new(cars: Vec<Car>) -> Self {
        Self {
            cars: Arc::new(Mutex::new(cars)),
            fail_create: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Vec<Car> {
        self.cars.lock().unwrap().clone()
    }
}

fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> DateTime<Utc>) {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
}

impl CarRepository for MockCarRepo {
    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, MarketplaceError> {
        Ok(self.cars.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn list_available(&self, filter: &CarFilter) -> Result<Vec<Car>, MarketplaceError> {
        let location = filter.location.as_ref().map(|l| l.to_lowercase());
        let mut cars: Vec<Car> = self
            .cars
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.available)
            .filter(|c| {
                location
                    .as_ref()
                    .is_none_or(|l| c.location.to_lowercase().contains(l.as_str()))
            })
            .filter(|c| filter.car_types.is_empty() || filter.car_types.contains(&c.car_type))
            .filter(|c| {
                filter.transmissions.is_empty() || filter.transmissions.contains(&c.transmission)
            })
            .filter(|c| filter.fuel_types.is_empty() || filter.fuel_types.contains(&c.fuel_type))
            .filter(|c| filter.min_seats.is_none_or(|seats| c.seats >= seats))
            .cloned()
            .collect();
        newest_first(&mut cars, |c| c.created_at);
        Ok(cars)
    }

    async fn list_featured(&self, limit: u64) -> Result<Vec<Car>, MarketplaceError> {
        let mut cars = self.list_available(&CarFilter::default()).await?;
        cars.truncate(limit as usize);
        Ok(cars)
    }

    async fn list_by_provider(&self, provider_id: UserId) -> Result<Vec<Car>, MarketplaceError> {
        let mut cars: Vec<Car> = self
            .cars
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.provider_id == provider_id)
            .cloned()
            .collect();
        newest_first(&mut cars, |c| c.created_at);
        Ok(cars)
    }

    async fn list_by_ids(&self, ids: &[CarId]) -> Result<Vec<Car>, MarketplaceError> {
        Ok(self
            .cars
            .lock()
            .unwrap()
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn create(&self, car: &Car) -> Result<(), MarketplaceError> {
        if self.fail_create {
            return Err(anyhow::anyhow!("db down").into());
        }
        self.cars.lock().unwrap().push(car.clone());
        Ok(())
    }

    async fn set_available(&self, id: CarId, available: bool) -> Result<(), MarketplaceError> {
        if let Some(car) = self.cars.lock().unwrap().iter_mut().find(|c| c.id == id) {
            car.available = available;
        }
        Ok(())
    }
}

// ── MockBookingRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockBookingRepo {
    pub bookings: Arc<Mutex<Vec<Booking>>>,
}

impl MockBookingRepo {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: Arc::new(Mutex::new(bookings)),
        }
    }

    pub fn snapshot(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }
}

impl BookingRepository for MockBookingRepo {
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, MarketplaceError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn create(&self, booking: &Booking) -> Result<(), MarketplaceError> {
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Booking>, MarketplaceError> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut bookings, |b| b.created_at);
        Ok(page.apply(bookings))
    }

    async fn count_by_user(&self, user_id: UserId) -> Result<u64, MarketplaceError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .count() as u64)
    }

    async fn list_by_cars(&self, car_ids: &[CarId]) -> Result<Vec<Booking>, MarketplaceError> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| car_ids.contains(&b.car_id))
            .cloned()
            .collect();
        newest_first(&mut bookings, |b| b.created_at);
        Ok(bookings)
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<(), MarketplaceError> {
        if let Some(booking) = self
            .bookings
            .lock()
            .unwrap()
            .iter_mut()
            .find(|b| b.id == id)
        {
            booking.status = status;
        }
        Ok(())
    }
}

// ── MockProfileRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockProfileRepo {
    pub profiles: Arc<Mutex<Vec<Profile>>>,
    pub fail_create: bool,
}

impl MockProfileRepo {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
            fail_create: false,
        }
    }

    /// Store whose inserts fail, as when the database is down.
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Vec<Profile> {
        self.profiles.lock().unwrap().clone()
    }
}

impl ProfileRepository for MockProfileRepo {
    async fn find_by_id(&self, id: UserId) -> Result<Option<Profile>, MarketplaceError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, profile: &Profile) -> Result<(), MarketplaceError> {
        if self.fail_create {
            return Err(anyhow::anyhow!("db down").into());
        }
        self.profiles.lock().unwrap().push(profile.clone());
        Ok(())
    }

    async fn update_names(
        &self,
        id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), MarketplaceError> {
        if let Some(profile) = self
            .profiles
            .lock()
            .unwrap()
            .iter_mut()
            .find(|p| p.id == id)
        {
            if let Some(first_name) = first_name {
                profile.first_name = first_name.to_owned();
            }
            if let Some(last_name) = last_name {
                profile.last_name = last_name.to_owned();
            }
        }
        Ok(())
    }
}

// ── MockRoleRepo ─────────────────────────────────────────────────────────────

pub struct MockRoleRepo {
    pub admins: Vec<UserId>,
}

impl MockRoleRepo {
    pub fn admins(admins: Vec<UserId>) -> Self {
        Self { admins }
    }

    pub fn none() -> Self {
        Self { admins: vec![] }
    }
}

impl RoleRepository for MockRoleRepo {
    async fn has_role(&self, user_id: UserId, role: AppRole) -> Result<bool, MarketplaceError> {
        Ok(role == AppRole::Admin && self.admins.contains(&user_id))
    }
}

// ── MockStorage ──────────────────────────────────────────────────────────────

/// Records every upload as `(key, content_type, size)` and every removed key.
#[derive(Clone, Default)]
pub struct MockStorage {
    pub uploads: Arc<Mutex<Vec<(String, String, usize)>>>,
    pub removed: Arc<Mutex<Vec<String>>>,
    /// Reject the upload with this zero-based index.
    pub fail_upload_at: Option<usize>,
}

impl MockStorage {
    pub fn uploads(&self) -> Vec<(String, String, usize)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.uploads().into_iter().map(|(key, _, _)| key).collect()
    }
}

impl ObjectStorage for MockStorage {
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<String, MarketplaceError> {
        let mut uploads = self.uploads.lock().unwrap();
        if self.fail_upload_at == Some(uploads.len()) {
            return Err(anyhow::anyhow!("storage unavailable").into());
        }
        uploads.push((key.to_owned(), content_type.to_owned(), bytes.len()));
        Ok(format!("https://storage.drivehub.test/car-images/{key}"))
    }

    async fn remove(&self, keys: &[String]) -> Result<(), MarketplaceError> {
        self.removed.lock().unwrap().extend_from_slice(keys);
        Ok(())
    }
}

// ── MockAuth ─────────────────────────────────────────────────────────────────

/// Auth server stand-in with a fixed set of `(email, password, user)` accounts.
#[derive(Clone, Default)]
pub struct MockAuth {
    pub accounts: Arc<Mutex<Vec<(String, String, UserId)>>>,
    pub fail_sign_out: bool,
    pub sign_outs: Arc<Mutex<Vec<String>>>,
}

impl MockAuth {
    pub fn with_account(email: &str, password: &str, user_id: UserId) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(vec![(
                email.to_owned(),
                password.to_owned(),
                user_id,
            )])),
            ..Self::default()
        }
    }
}

impl AuthPort for MockAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, MarketplaceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|(e, _, _)| e == email) {
            return Err(MarketplaceError::EmailAlreadyRegistered);
        }
        let id = UserId::generate();
        accounts.push((email.to_owned(), password.to_owned(), id));
        Ok(AuthUser {
            id,
            email: Some(email.to_owned()),
        })
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, MarketplaceError> {
        let accounts = self.accounts.lock().unwrap();
        let (_, _, id) = accounts
            .iter()
            .find(|(e, p, _)| e == email && p == password)
            .ok_or(MarketplaceError::InvalidCredentials)?;
        Ok(AuthSession {
            access_token: format!("access-{id}"),
            refresh_token: format!("refresh-{id}"),
            expires_in: 3600,
            user: AuthUser {
                id: *id,
                email: Some(email.to_owned()),
            },
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), MarketplaceError> {
        self.sign_outs.lock().unwrap().push(access_token.to_owned());
        if self.fail_sign_out {
            return Err(MarketplaceError::Internal(anyhow::anyhow!(
                "auth server unreachable"
            )));
        }
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Available economy car listed `age_days` ago.
pub fn test_car(provider_id: UserId, name: &str, price_per_day: f64, age_days: i64) -> Car {
    Car {
        id: CarId::generate(),
        provider_id,
        name: name.to_owned(),
        brand: "Toyota".to_owned(),
        model: "Corolla".to_owned(),
        year: 2023,
        price_per_day,
        insurance_per_day: 15.0,
        car_type: CarType::Economy,
        transmission: Transmission::Automatic,
        fuel_type: FuelType::Petrol,
        seats: 5,
        luggage: 2,
        location: "Lisbon Airport".to_owned(),
        features: vec!["Bluetooth".to_owned(), "GPS".to_owned()],
        description: None,
        mileage_policy: Some("Unlimited".to_owned()),
        image_url: None,
        image_urls: Vec::new(),
        available: true,
        created_at: Utc::now() - Duration::days(age_days),
    }
}

/// Booking on `car` made `age_days` ago.
pub fn test_booking(
    user_id: UserId,
    car: &Car,
    total_price: f64,
    status: BookingStatus,
    age_days: i64,
) -> Booking {
    let pickup = Utc::now() + Duration::days(7);
    Booking {
        id: BookingId::generate(),
        user_id,
        car_id: car.id,
        pickup_location: car.location.clone(),
        dropoff_location: car.location.clone(),
        pickup_date: pickup,
        dropoff_date: pickup + Duration::days(3),
        total_price,
        first_name: "Ana".to_owned(),
        last_name: "Silva".to_owned(),
        email: "ana@example.com".to_owned(),
        phone: "+351 900 000 000".to_owned(),
        status,
        created_at: Utc::now() - Duration::days(age_days),
    }
}

pub fn test_profile(user_id: UserId) -> Profile {
    Profile {
        id: user_id,
        first_name: "Ana".to_owned(),
        last_name: "Silva".to_owned(),
        email: "ana@example.com".to_owned(),
        created_at: Utc::now() - Duration::days(30),
    }
}
