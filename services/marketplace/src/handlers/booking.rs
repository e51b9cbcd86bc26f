use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivehub_auth_types::session::Session;
use drivehub_domain::booking::BookingStatus;
use drivehub_domain::id::{BookingId, CarId};

use crate::domain::types::{Booking, BookingWithCar};
use crate::error::MarketplaceError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::booking::{CardDetails, CreateBookingInput, CreateBookingUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: BookingId,
    pub car_id: CarId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_name: Option<String>,
    pub pickup_location: String,
    pub dropoff_location: String,
    #[serde(serialize_with = "drivehub_core::serde::to_rfc3339_ms")]
    pub pickup_date: DateTime<Utc>,
    #[serde(serialize_with = "drivehub_core::serde::to_rfc3339_ms")]
    pub dropoff_date: DateTime<Utc>,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
    pub total_price: f64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub status: BookingStatus,
    #[serde(serialize_with = "drivehub_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl BookingResponse {
    fn new(booking: Booking, car_name: Option<String>) -> Self {
        Self {
            id: booking.id,
            car_id: booking.car_id,
            car_name,
            pickup_location: booking.pickup_location,
            dropoff_location: booking.dropoff_location,
            pickup_date: booking.pickup_date,
            dropoff_date: booking.dropoff_date,
            total_price: booking.total_price,
            first_name: booking.first_name,
            last_name: booking.last_name,
            email: booking.email,
            phone: booking.phone,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self::new(booking, None)
    }
}

impl From<BookingWithCar> for BookingResponse {
    fn from(b: BookingWithCar) -> Self {
        Self::new(b.booking, b.car_name)
    }
}

// ── POST /bookings ───────────────────────────────────────────────────────────

/// Checkout form. Text fields default to empty so a missing field is
/// reported by name rather than as a body rejection.
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub car_id: CarId,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub dropoff_location: Option<String>,
    #[serde(default)]
    pub pickup_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dropoff_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub card_expiry: String,
    #[serde(default)]
    pub card_cvv: String,
    #[serde(default)]
    pub agreed_to_terms: bool,
}

pub async fn create_booking(
    session: Session,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), MarketplaceError> {
    let usecase = CreateBookingUseCase {
        cars: state.car_repo(),
        bookings: state.booking_repo(),
    };
    let booking = usecase
        .execute(
            session.user_id,
            CreateBookingInput {
                car_id: body.car_id,
                pickup_location: body.pickup_location,
                dropoff_location: body.dropoff_location,
                pickup_date: body.pickup_date,
                dropoff_date: body.dropoff_date,
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                phone: body.phone,
                card: CardDetails {
                    number: body.card_number,
                    expiry: body.card_expiry,
                    cvv: body.card_cvv,
                },
                agreed_to_terms: body.agreed_to_terms,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}
