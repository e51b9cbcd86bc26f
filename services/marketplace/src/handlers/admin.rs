use std::collections::HashMap;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use drivehub_auth_types::session::Session;
use drivehub_domain::booking::BookingStatus;
use drivehub_domain::id::{BookingId, CarId};

use crate::domain::types::{ImageUpload, MAX_IMAGE_BYTES, TopCar};
use crate::error::MarketplaceError;
use crate::handlers::JsonBody;
use crate::handlers::booking::BookingResponse;
use crate::handlers::car::{CarResponse, parse_car_id};
use crate::infra::db::DbRoleRepository;
use crate::state::AppState;
use crate::usecase::admin::{
    AdminGate, AdvanceBookingUseCase, CreateCarUseCase, DashboardUseCase, ListFleetUseCase,
    NewCarInput, SetAvailabilityUseCase,
};

/// Request body limit for the car form: up to six full-size photos.
pub const MAX_CAR_FORM_BYTES: usize = 6 * MAX_IMAGE_BYTES;

fn gate(state: &AppState) -> AdminGate<DbRoleRepository> {
    AdminGate {
        roles: state.role_repo(),
    }
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TopCarResponse {
    pub car_id: CarId,
    pub name: String,
    pub bookings: u64,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
    pub revenue: f64,
}

impl From<TopCar> for TopCarResponse {
    fn from(t: TopCar) -> Self {
        Self {
            car_id: t.car_id,
            name: t.name,
            bookings: t.bookings,
            revenue: t.revenue,
        }
    }
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub total_cars: u64,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
    pub revenue: f64,
    pub active_bookings: u64,
    pub pending_bookings: u64,
    pub recent_bookings: Vec<BookingResponse>,
    pub top_cars: Vec<TopCarResponse>,
}

// ── GET /admin/dashboard ─────────────────────────────────────────────────────

pub async fn get_dashboard(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, MarketplaceError> {
    let usecase = DashboardUseCase {
        gate: gate(&state),
        cars: state.car_repo(),
        bookings: state.booking_repo(),
    };
    let summary = usecase.execute(session.user_id).await?;
    Ok(Json(DashboardResponse {
        total_cars: summary.total_cars,
        revenue: summary.revenue,
        active_bookings: summary.active_bookings,
        pending_bookings: summary.pending_bookings,
        recent_bookings: summary.recent_bookings.into_iter().map(Into::into).collect(),
        top_cars: summary.top_cars.into_iter().map(Into::into).collect(),
    }))
}

// ── GET /admin/cars ──────────────────────────────────────────────────────────

pub async fn get_fleet(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<Vec<CarResponse>>, MarketplaceError> {
    let usecase = ListFleetUseCase {
        gate: gate(&state),
        cars: state.car_repo(),
    };
    let cars = usecase.execute(session.user_id).await?;
    Ok(Json(cars.into_iter().map(Into::into).collect()))
}

// ── POST /admin/cars ─────────────────────────────────────────────────────────

fn form_error(e: MultipartError) -> MarketplaceError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        MarketplaceError::ImageTooLarge
    } else {
        MarketplaceError::InvalidField(format!("form: {}", e.body_text()))
    }
}

/// Text parts of the car form, keyed by part name.
struct CarForm {
    fields: HashMap<String, String>,
}

impl CarForm {
    fn text(&self, key: &str) -> String {
        self.fields.get(key).cloned().unwrap_or_default()
    }

    fn optional_text(&self, key: &str) -> Option<String> {
        self.fields.get(key).cloned()
    }

    fn optional<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, MarketplaceError> {
        match self.fields.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(v) => v
                .parse()
                .map(Some)
                .map_err(|_| MarketplaceError::InvalidField(key.to_owned())),
        }
    }

    fn required<T: FromStr>(&self, key: &'static str) -> Result<T, MarketplaceError> {
        self.optional(key)?.ok_or(MarketplaceError::MissingField(key))
    }

    fn into_input(self, images: Vec<ImageUpload>) -> Result<NewCarInput, MarketplaceError> {
        Ok(NewCarInput {
            name: self.text("name"),
            brand: self.text("brand"),
            model: self.text("model"),
            year: self.required("year")?,
            price_per_day: self.required("price_per_day")?,
            insurance_per_day: self.optional("insurance_per_day")?,
            car_type: self.required("car_type")?,
            transmission: self.required("transmission")?,
            fuel_type: self.required("fuel_type")?,
            seats: self.required("seats")?,
            luggage: self.optional("luggage")?.unwrap_or(0),
            location: self.text("location"),
            features: self
                .text("features")
                .split(',')
                .map(str::to_owned)
                .collect(),
            description: self.optional_text("description"),
            mileage_policy: self.optional_text("mileage_policy"),
            images,
        })
    }
}

pub async fn create_car(
    session: Session,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CarResponse>), MarketplaceError> {
    let mut fields = HashMap::new();
    let mut images = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_owned();
        if name == "images" {
            let content_type = field.content_type().unwrap_or_default().to_owned();
            let bytes = field.bytes().await.map_err(form_error)?;
            // Browsers send an empty part when no file was picked.
            if !bytes.is_empty() {
                images.push(ImageUpload {
                    content_type,
                    bytes,
                });
            }
        } else {
            let text = field.text().await.map_err(form_error)?;
            fields.insert(name, text);
        }
    }
    let input = CarForm { fields }.into_input(images)?;

    let usecase = CreateCarUseCase {
        gate: gate(&state),
        cars: state.car_repo(),
        storage: state.storage(),
    };
    let car = usecase.execute(session.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(car.into())))
}

// ── PATCH /admin/cars/{car_id}/availability ──────────────────────────────────

#[derive(Deserialize)]
pub struct SetAvailabilityRequest {
    pub available: bool,
}

pub async fn set_availability(
    session: Session,
    State(state): State<AppState>,
    Path(car_id): Path<String>,
    JsonBody(body): JsonBody<SetAvailabilityRequest>,
) -> Result<Json<CarResponse>, MarketplaceError> {
    let car_id = parse_car_id(&car_id)?;
    let usecase = SetAvailabilityUseCase {
        gate: gate(&state),
        cars: state.car_repo(),
    };
    let car = usecase
        .execute(session.user_id, car_id, body.available)
        .await?;
    Ok(Json(car.into()))
}

// ── PATCH /admin/bookings/{booking_id}/status ────────────────────────────────

#[derive(Deserialize)]
pub struct AdvanceBookingRequest {
    pub status: BookingStatus,
}

pub async fn advance_booking(
    session: Session,
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    JsonBody(body): JsonBody<AdvanceBookingRequest>,
) -> Result<Json<BookingResponse>, MarketplaceError> {
    let booking_id: BookingId = booking_id
        .parse()
        .map_err(|_| MarketplaceError::BookingNotFound)?;
    let usecase = AdvanceBookingUseCase {
        gate: gate(&state),
        cars: state.car_repo(),
        bookings: state.booking_repo(),
    };
    let booking = usecase
        .execute(session.user_id, booking_id, body.status)
        .await?;
    Ok(Json(booking.into()))
}
