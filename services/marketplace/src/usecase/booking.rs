use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use drivehub_domain::booking::BookingStatus;
use drivehub_domain::id::{BookingId, CarId, UserId};
use drivehub_domain::pagination::PageRequest;
use drivehub_domain::pricing::{PriceQuote, PricingError};

use crate::domain::repository::{BookingRepository, CarRepository};
use crate::domain::types::{Booking, BookingWithCar};
use crate::error::MarketplaceError;

/// Card fields from the checkout form. Checked for presence only; never
/// stored or charged.
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CardDetails([redacted])")
    }
}

fn require(value: &str, field: &'static str) -> Result<(), MarketplaceError> {
    if value.trim().is_empty() {
        return Err(MarketplaceError::MissingField(field));
    }
    Ok(())
}

// ── CreateBooking ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CreateBookingInput {
    pub car_id: CarId,
    pub pickup_location: String,
    /// Defaults to the pickup location when absent or blank.
    pub dropoff_location: Option<String>,
    pub pickup_date: Option<DateTime<Utc>>,
    pub dropoff_date: Option<DateTime<Utc>>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub card: CardDetails,
    pub agreed_to_terms: bool,
}

impl CreateBookingInput {
    fn validate(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), MarketplaceError> {
        if !self.agreed_to_terms {
            return Err(MarketplaceError::TermsNotAccepted);
        }
        require(&self.pickup_location, "pickup location")?;
        require(&self.first_name, "first name")?;
        require(&self.last_name, "last name")?;
        require(&self.email, "email")?;
        require(&self.phone, "phone")?;
        require(&self.card.number, "card number")?;
        require(&self.card.expiry, "card expiry")?;
        require(&self.card.cvv, "card cvv")?;
        match (self.pickup_date, self.dropoff_date) {
            (Some(pickup), Some(dropoff)) => Ok((pickup, dropoff)),
            _ => Err(PricingError::IncompleteDateRange.into()),
        }
    }
}

pub struct CreateBookingUseCase<C: CarRepository, B: BookingRepository> {
    pub cars: C,
    pub bookings: B,
}

impl<C: CarRepository, B: BookingRepository> CreateBookingUseCase<C, B> {
    pub async fn execute(
        &self,
        user_id: UserId,
        input: CreateBookingInput,
    ) -> Result<Booking, MarketplaceError> {
        let (pickup, dropoff) = input.validate()?;

        let car = self
            .cars
            .find_by_id(input.car_id)
            .await?
            .ok_or(MarketplaceError::CarNotFound)?;
        if !car.available {
            return Err(MarketplaceError::CarUnavailable);
        }
        let quote =
            PriceQuote::for_dates(car.price_per_day, car.insurance_per_day, pickup, dropoff)?;

        let pickup_location = input.pickup_location.trim().to_owned();
        let dropoff_location = input
            .dropoff_location
            .map(|l| l.trim().to_owned())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| pickup_location.clone());

        let booking = Booking {
            id: BookingId::generate(),
            user_id,
            car_id: car.id,
            pickup_location,
            dropoff_location,
            pickup_date: pickup,
            dropoff_date: dropoff,
            total_price: quote.total,
            first_name: input.first_name.trim().to_owned(),
            last_name: input.last_name.trim().to_owned(),
            email: input.email.trim().to_owned(),
            phone: input.phone.trim().to_owned(),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        };
        self.bookings.create(&booking).await?;

        tracing::info!(
            booking_id = %booking.id,
            car_id = %car.id,
            days = quote.days,
            total = quote.total,
            "booking created"
        );
        Ok(booking)
    }
}

// ── ListMyBookings ───────────────────────────────────────────────────────────

pub struct ListMyBookingsUseCase<B: BookingRepository, C: CarRepository> {
    pub bookings: B,
    pub cars: C,
}

impl<B: BookingRepository, C: CarRepository> ListMyBookingsUseCase<B, C> {
    pub async fn execute(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<BookingWithCar>, MarketplaceError> {
        let bookings = self.bookings.list_by_user(user_id, page).await?;
        with_car_names(&self.cars, bookings).await
    }
}

/// Attach car names to bookings, preserving order.
pub(crate) async fn with_car_names<C: CarRepository>(
    cars: &C,
    bookings: Vec<Booking>,
) -> Result<Vec<BookingWithCar>, MarketplaceError> {
    if bookings.is_empty() {
        return Ok(vec![]);
    }
    let mut ids: Vec<CarId> = bookings.iter().map(|b| b.car_id).collect();
    ids.sort_by_key(|id| id.0);
    ids.dedup();
    let names: HashMap<CarId, String> = cars
        .list_by_ids(&ids)
        .await?
        .into_iter()
        .map(|car| (car.id, car.name))
        .collect();
    Ok(bookings
        .into_iter()
        .map(|booking| BookingWithCar {
            car_name: names.get(&booking.car_id).cloned(),
            booking,
        })
        .collect())
}

// ── CancelBooking ────────────────────────────────────────────────────────────

pub struct CancelBookingUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> CancelBookingUseCase<B> {
    /// Cancel one of the caller's own bookings.
    ///
    /// Bookings of other users answer `BookingNotFound`.
    pub async fn execute(
        &self,
        user_id: UserId,
        booking_id: BookingId,
    ) -> Result<Booking, MarketplaceError> {
        let mut booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .filter(|b| b.user_id == user_id)
            .ok_or(MarketplaceError::BookingNotFound)?;
        if !booking.status.is_cancellable() {
            return Err(MarketplaceError::BookingNotCancellable);
        }
        self.bookings
            .update_status(booking_id, BookingStatus::Cancelled)
            .await?;
        booking.status = BookingStatus::Cancelled;
        tracing::info!(booking_id = %booking.id, "booking cancelled");
        Ok(booking)
    }
}
