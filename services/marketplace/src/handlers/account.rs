use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivehub_auth_types::session::Session;
use drivehub_domain::id::{BookingId, UserId};
use drivehub_domain::pagination::PageRequest;

use crate::domain::types::Profile;
use crate::error::MarketplaceError;
use crate::handlers::JsonBody;
use crate::handlers::booking::BookingResponse;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::account::{GetAccountUseCase, UpdateProfileInput, UpdateProfileUseCase};
use crate::usecase::booking::{CancelBookingUseCase, ListMyBookingsUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(serialize_with = "drivehub_core::serde::to_rfc3339_ms")]
    pub member_since: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            member_since: profile.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct AccountResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub total_bookings: u64,
}

// ── GET /account ─────────────────────────────────────────────────────────────

pub async fn get_account(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<AccountResponse>, MarketplaceError> {
    let usecase = GetAccountUseCase {
        profiles: state.profile_repo(),
        bookings: state.booking_repo(),
    };
    let overview = usecase.execute(session.user_id).await?;
    Ok(Json(AccountResponse {
        profile: overview.profile.into(),
        total_bookings: overview.total_bookings,
    }))
}

// ── PATCH /account ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateAccountRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub async fn update_account(
    session: Session,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UpdateAccountRequest>,
) -> Result<Json<ProfileResponse>, MarketplaceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase
        .execute(
            session.user_id,
            UpdateProfileInput {
                first_name: body.first_name,
                last_name: body.last_name,
            },
        )
        .await?;
    Ok(Json(profile.into()))
}

// ── GET /account/bookings ────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BookingListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn get_my_bookings(
    session: Session,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<BookingResponse>>, MarketplaceError> {
    let query: BookingListQuery = parse_query(raw_query)?;
    let usecase = ListMyBookingsUseCase {
        bookings: state.booking_repo(),
        cars: state.car_repo(),
    };
    let bookings = usecase
        .execute(
            session.user_id,
            PageRequest::from_query(query.per_page, query.page),
        )
        .await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

// ── DELETE /account/bookings/{booking_id} ────────────────────────────────────

pub async fn cancel_my_booking(
    session: Session,
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingResponse>, MarketplaceError> {
    let booking_id: BookingId = booking_id
        .parse()
        .map_err(|_| MarketplaceError::BookingNotFound)?;
    let usecase = CancelBookingUseCase {
        bookings: state.booking_repo(),
    };
    let booking = usecase.execute(session.user_id, booking_id).await?;
    Ok(Json(booking.into()))
}
