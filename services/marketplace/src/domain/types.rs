use bytes::Bytes;
use chrono::{DateTime, Utc};

use drivehub_domain::booking::BookingStatus;
use drivehub_domain::car::{CarType, FuelType, Transmission};
use drivehub_domain::id::{BookingId, CarId, UserId};
use drivehub_domain::pricing::{PriceQuote, PricingError};
use drivehub_domain::search::Priced;

/// A car listed on the marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub id: CarId,
    pub provider_id: UserId,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
    pub insurance_per_day: f64,
    pub car_type: CarType,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub seats: u32,
    pub luggage: u32,
    pub location: String,
    pub features: Vec<String>,
    pub description: Option<String>,
    pub mileage_policy: Option<String>,
    /// Listing photo; the first of `image_urls`.
    pub image_url: Option<String>,
    /// Every uploaded photo, in upload order.
    pub image_urls: Vec<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl Priced for Car {
    fn price_per_day(&self) -> f64 {
        self.price_per_day
    }
}

impl Car {
    /// Quote this car's rates for the given dates (or the default length).
    pub fn quote(
        &self,
        pickup: Option<DateTime<Utc>>,
        dropoff: Option<DateTime<Utc>>,
    ) -> Result<PriceQuote, PricingError> {
        PriceQuote::for_optional_dates(self.price_per_day, self.insurance_per_day, pickup, dropoff)
    }
}

/// Structural filters the store applies to available cars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarFilter {
    /// Case-insensitive substring of the pickup location.
    pub location: Option<String>,
    pub car_types: Vec<CarType>,
    pub transmissions: Vec<Transmission>,
    pub fuel_types: Vec<FuelType>,
    pub min_seats: Option<u32>,
}

/// A search hit, with a quote when the renter already picked dates.
#[derive(Debug, Clone)]
pub struct Listing {
    pub car: Car,
    pub quote: Option<PriceQuote>,
}

/// A reservation of a car.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub car_id: CarId,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_date: DateTime<Utc>,
    pub dropoff_date: DateTime<Utc>,
    pub total_price: f64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// A booking joined with the name of the car it reserves.
///
/// `car_name` is `None` when the car was removed after booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingWithCar {
    pub booking: Booking,
    pub car_name: Option<String>,
}

/// Renter profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// User record returned by the auth server.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// Tokens issued by a successful password sign-in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: u64,
    pub user: AuthUser,
}

/// Largest accepted car image.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Image formats accepted for car photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// One uploaded image part, as received.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: String,
    pub bytes: Bytes,
}

/// Per-car line of the dashboard's top performers.
#[derive(Debug, Clone, PartialEq)]
pub struct TopCar {
    pub car_id: CarId,
    pub name: String,
    pub bookings: u64,
    pub revenue: f64,
}

/// Dashboard figures for one provider's fleet.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetSummary {
    pub total_cars: u64,
    pub revenue: f64,
    pub active_bookings: u64,
    pub pending_bookings: u64,
    pub recent_bookings: Vec<BookingWithCar>,
    pub top_cars: Vec<TopCar>,
}
