use std::collections::HashMap;

use chrono::{Datelike, Utc};
use uuid::Uuid;

use drivehub_domain::booking::BookingStatus;
use drivehub_domain::car::{CarType, FuelType, Transmission};
use drivehub_domain::id::{BookingId, CarId, UserId};
use drivehub_domain::pricing::DEFAULT_INSURANCE_PER_DAY;
use drivehub_domain::role::AppRole;

use crate::domain::repository::{BookingRepository, CarRepository, ObjectStorage, RoleRepository};
use crate::domain::types::{
    Booking, BookingWithCar, Car, FleetSummary, ImageFormat, ImageUpload, MAX_IMAGE_BYTES, TopCar,
};
use crate::error::MarketplaceError;

pub const RECENT_BOOKINGS_LIMIT: usize = 5;
pub const TOP_CARS_LIMIT: usize = 3;

// ── AdminGate ────────────────────────────────────────────────────────────────

/// Fleet management is restricted to users holding the `admin` role.
pub struct AdminGate<R: RoleRepository> {
    pub roles: R,
}

impl<R: RoleRepository> AdminGate<R> {
    pub async fn require_admin(&self, user_id: UserId) -> Result<(), MarketplaceError> {
        if self.roles.has_role(user_id, AppRole::Admin).await? {
            Ok(())
        } else {
            tracing::info!(%user_id, "admin access denied");
            Err(MarketplaceError::NotAdmin)
        }
    }
}

// ── ListFleet ────────────────────────────────────────────────────────────────

pub struct ListFleetUseCase<R: RoleRepository, C: CarRepository> {
    pub gate: AdminGate<R>,
    pub cars: C,
}

impl<R: RoleRepository, C: CarRepository> ListFleetUseCase<R, C> {
    pub async fn execute(&self, user_id: UserId) -> Result<Vec<Car>, MarketplaceError> {
        self.gate.require_admin(user_id).await?;
        self.cars.list_by_provider(user_id).await
    }
}

// ── CreateCar ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct NewCarInput {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
    pub insurance_per_day: Option<f64>,
    pub car_type: CarType,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub seats: u32,
    pub luggage: u32,
    pub location: String,
    pub features: Vec<String>,
    pub description: Option<String>,
    pub mileage_policy: Option<String>,
    pub images: Vec<ImageUpload>,
}

/// Oldest model year accepted for a listing.
const MIN_YEAR: i32 = 1900;

impl NewCarInput {
    fn validate(&self) -> Result<Vec<ImageFormat>, MarketplaceError> {
        for (value, field) in [
            (&self.name, "name"),
            (&self.brand, "brand"),
            (&self.model, "model"),
            (&self.location, "location"),
        ] {
            if value.trim().is_empty() {
                return Err(MarketplaceError::MissingField(field));
            }
        }
        if !(MIN_YEAR..=Utc::now().year() + 1).contains(&self.year) {
            return Err(MarketplaceError::InvalidField("year".into()));
        }
        if !self.price_per_day.is_finite() || self.price_per_day <= 0.0 {
            return Err(MarketplaceError::InvalidField("price_per_day".into()));
        }
        if self
            .insurance_per_day
            .is_some_and(|insurance| !insurance.is_finite() || insurance < 0.0)
        {
            return Err(MarketplaceError::InvalidField("insurance_per_day".into()));
        }
        if self.seats == 0 {
            return Err(MarketplaceError::InvalidField("seats".into()));
        }
        self.images
            .iter()
            .map(|image| {
                let format = ImageFormat::from_content_type(&image.content_type)
                    .ok_or(MarketplaceError::InvalidImage)?;
                if image.bytes.len() > MAX_IMAGE_BYTES {
                    return Err(MarketplaceError::ImageTooLarge);
                }
                Ok(format)
            })
            .collect()
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub struct CreateCarUseCase<R: RoleRepository, C: CarRepository, S: ObjectStorage> {
    pub gate: AdminGate<R>,
    pub cars: C,
    pub storage: S,
}

impl<R: RoleRepository, C: CarRepository, S: ObjectStorage> CreateCarUseCase<R, C, S> {
    /// Upload the images, then list the car as available under the caller.
    ///
    /// Every image is validated before the first upload. The first image
    /// becomes the listing photo and all of them form the gallery. Objects
    /// already stored are removed again when the listing cannot be saved.
    pub async fn execute(
        &self,
        user_id: UserId,
        input: NewCarInput,
    ) -> Result<Car, MarketplaceError> {
        self.gate.require_admin(user_id).await?;
        let formats = input.validate()?;

        let car_id = CarId::generate();
        let mut keys = Vec::with_capacity(input.images.len());
        let mut image_urls = Vec::with_capacity(input.images.len());
        for (image, format) in input.images.into_iter().zip(formats) {
            let key = format!(
                "{user_id}/{car_id}/{}.{}",
                Uuid::new_v4(),
                format.extension()
            );
            match self
                .storage
                .upload(&key, format.content_type(), image.bytes)
                .await
            {
                Ok(url) => image_urls.push(url),
                Err(e) => {
                    self.discard_uploads(&keys).await;
                    return Err(e);
                }
            }
            keys.push(key);
        }

        let car = Car {
            id: car_id,
            provider_id: user_id,
            name: input.name.trim().to_owned(),
            brand: input.brand.trim().to_owned(),
            model: input.model.trim().to_owned(),
            year: input.year,
            price_per_day: input.price_per_day,
            insurance_per_day: input.insurance_per_day.unwrap_or(DEFAULT_INSURANCE_PER_DAY),
            car_type: input.car_type,
            transmission: input.transmission,
            fuel_type: input.fuel_type,
            seats: input.seats,
            luggage: input.luggage,
            location: input.location.trim().to_owned(),
            features: input
                .features
                .into_iter()
                .map(|f| f.trim().to_owned())
                .filter(|f| !f.is_empty())
                .collect(),
            description: optional_text(input.description),
            mileage_policy: optional_text(input.mileage_policy),
            image_url: image_urls.first().cloned(),
            image_urls,
            available: true,
            created_at: Utc::now(),
        };
        if let Err(e) = self.cars.create(&car).await {
            self.discard_uploads(&keys).await;
            return Err(e);
        }

        tracing::info!(car_id = %car.id, provider_id = %user_id, "car listed");
        Ok(car)
    }

    async fn discard_uploads(&self, keys: &[String]) {
        if keys.is_empty() {
            return;
        }
        if let Err(e) = self.storage.remove(keys).await {
            tracing::warn!(error = ?e, ?keys, "orphaned car images left in storage");
        }
    }
}

// ── SetAvailability ──────────────────────────────────────────────────────────

pub struct SetAvailabilityUseCase<R: RoleRepository, C: CarRepository> {
    pub gate: AdminGate<R>,
    pub cars: C,
}

impl<R: RoleRepository, C: CarRepository> SetAvailabilityUseCase<R, C> {
    pub async fn execute(
        &self,
        user_id: UserId,
        car_id: CarId,
        available: bool,
    ) -> Result<Car, MarketplaceError> {
        self.gate.require_admin(user_id).await?;
        let mut car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or(MarketplaceError::CarNotFound)?;
        if car.provider_id != user_id {
            return Err(MarketplaceError::Forbidden);
        }
        if car.available != available {
            self.cars.set_available(car_id, available).await?;
            car.available = available;
        }
        Ok(car)
    }
}

// ── AdvanceBooking ───────────────────────────────────────────────────────────

pub struct AdvanceBookingUseCase<R: RoleRepository, C: CarRepository, B: BookingRepository> {
    pub gate: AdminGate<R>,
    pub cars: C,
    pub bookings: B,
}

impl<R: RoleRepository, C: CarRepository, B: BookingRepository> AdvanceBookingUseCase<R, C, B> {
    /// Move a booking on one of the caller's cars to its next status.
    pub async fn execute(
        &self,
        user_id: UserId,
        booking_id: BookingId,
        next: BookingStatus,
    ) -> Result<Booking, MarketplaceError> {
        self.gate.require_admin(user_id).await?;
        let mut booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(MarketplaceError::BookingNotFound)?;
        let owns_car = self
            .cars
            .find_by_id(booking.car_id)
            .await?
            .is_some_and(|car| car.provider_id == user_id);
        if !owns_car {
            return Err(MarketplaceError::Forbidden);
        }
        if !booking.status.can_advance_to(next) {
            return Err(MarketplaceError::InvalidStatusTransition);
        }
        self.bookings.update_status(booking_id, next).await?;
        tracing::info!(
            booking_id = %booking_id,
            from = booking.status.as_str(),
            to = next.as_str(),
            "booking status changed"
        );
        booking.status = next;
        Ok(booking)
    }
}

// ── Dashboard ────────────────────────────────────────────────────────────────

pub struct DashboardUseCase<R: RoleRepository, C: CarRepository, B: BookingRepository> {
    pub gate: AdminGate<R>,
    pub cars: C,
    pub bookings: B,
}

impl<R: RoleRepository, C: CarRepository, B: BookingRepository> DashboardUseCase<R, C, B> {
    pub async fn execute(&self, user_id: UserId) -> Result<FleetSummary, MarketplaceError> {
        self.gate.require_admin(user_id).await?;
        let cars = self.cars.list_by_provider(user_id).await?;
        let car_ids: Vec<CarId> = cars.iter().map(|c| c.id).collect();
        let bookings = if car_ids.is_empty() {
            vec![]
        } else {
            self.bookings.list_by_cars(&car_ids).await?
        };
        Ok(summarize_fleet(&cars, bookings))
    }
}

/// Dashboard figures over one provider's cars and the bookings on them.
///
/// Cancelled bookings count toward neither revenue nor the top-car ranking.
pub fn summarize_fleet(cars: &[Car], mut bookings: Vec<Booking>) -> FleetSummary {
    let names: HashMap<CarId, &str> = cars.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut revenue = 0.0;
    let mut active_bookings = 0;
    let mut pending_bookings = 0;
    let mut per_car: HashMap<CarId, (u64, f64)> = HashMap::new();
    for booking in &bookings {
        if booking.status.is_active() {
            active_bookings += 1;
        }
        if booking.status == BookingStatus::Pending {
            pending_bookings += 1;
        }
        if booking.status != BookingStatus::Cancelled {
            revenue += booking.total_price;
            let entry = per_car.entry(booking.car_id).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += booking.total_price;
        }
    }

    let mut top_cars: Vec<TopCar> = per_car
        .into_iter()
        .filter_map(|(car_id, (count, car_revenue))| {
            names.get(&car_id).map(|name| TopCar {
                car_id,
                name: (*name).to_owned(),
                bookings: count,
                revenue: car_revenue,
            })
        })
        .collect();
    top_cars.sort_by(|a, b| {
        b.bookings
            .cmp(&a.bookings)
            .then_with(|| b.revenue.total_cmp(&a.revenue))
            .then_with(|| a.name.cmp(&b.name))
    });
    top_cars.truncate(TOP_CARS_LIMIT);

    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let recent_bookings = bookings
        .into_iter()
        .take(RECENT_BOOKINGS_LIMIT)
        .map(|booking| BookingWithCar {
            car_name: names.get(&booking.car_id).map(|n| (*n).to_owned()),
            booking,
        })
        .collect();

    FleetSummary {
        total_cars: cars.len() as u64,
        revenue,
        active_bookings,
        pending_bookings,
        recent_bookings,
        top_cars,
    }
}
