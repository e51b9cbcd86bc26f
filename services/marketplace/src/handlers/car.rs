use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivehub_domain::car::{CarSortBy, CarType, FuelType, Transmission};
use drivehub_domain::id::{CarId, UserId};
use drivehub_domain::pagination::PageRequest;
use drivehub_domain::pricing::PriceQuote;
use drivehub_domain::search::PriceRange;

use crate::domain::types::{Car, CarFilter, Listing};
use crate::error::MarketplaceError;
use crate::handlers::parse_query;
use crate::state::AppState;
use crate::usecase::car::{
    GetCarUseCase, ListFeaturedCarsUseCase, SearchCarsInput, SearchCarsUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CarResponse {
    pub id: CarId,
    pub provider_id: UserId,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
    pub price_per_day: f64,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
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
    pub image_url: Option<String>,
    pub image_urls: Vec<String>,
    pub available: bool,
    #[serde(serialize_with = "drivehub_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            provider_id: car.provider_id,
            name: car.name,
            brand: car.brand,
            model: car.model,
            year: car.year,
            price_per_day: car.price_per_day,
            insurance_per_day: car.insurance_per_day,
            car_type: car.car_type,
            transmission: car.transmission,
            fuel_type: car.fuel_type,
            seats: car.seats,
            luggage: car.luggage,
            location: car.location,
            features: car.features,
            description: car.description,
            mileage_policy: car.mileage_policy,
            image_url: car.image_url,
            image_urls: car.image_urls,
            available: car.available,
            created_at: car.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct QuoteResponse {
    pub days: u32,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
    pub price_per_day: f64,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
    pub insurance_per_day: f64,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
    pub base: f64,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
    pub insurance: f64,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
    pub taxes: f64,
    #[serde(serialize_with = "drivehub_core::serde::to_cents")]
    pub total: f64,
}

impl From<PriceQuote> for QuoteResponse {
    fn from(q: PriceQuote) -> Self {
        Self {
            days: q.days,
            price_per_day: q.price_per_day,
            insurance_per_day: q.insurance_per_day,
            base: q.base,
            insurance: q.insurance,
            taxes: q.taxes,
            total: q.total,
        }
    }
}

#[derive(Serialize)]
pub struct ListingResponse {
    #[serde(flatten)]
    pub car: CarResponse,
    pub quote: Option<QuoteResponse>,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self {
            car: listing.car.into(),
            quote: listing.quote.map(Into::into),
        }
    }
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub items: Vec<ListingResponse>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub price_range: PriceRange,
    pub sort_by: CarSortBy,
}

#[derive(Serialize)]
pub struct CarDetailResponse {
    pub car: CarResponse,
    pub quote: QuoteResponse,
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SearchQuery {
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub car_type: Vec<CarType>,
    #[serde(default)]
    pub transmission: Vec<Transmission>,
    #[serde(default)]
    pub fuel_type: Vec<FuelType>,
    pub min_seats: Option<u32>,
    pub sort_by: Option<CarSortBy>,
    pub pickup: Option<DateTime<Utc>>,
    pub dropoff: Option<DateTime<Utc>>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Deserialize, Default)]
pub struct QuoteQuery {
    pub pickup: Option<DateTime<Utc>>,
    pub dropoff: Option<DateTime<Utc>>,
}

/// Malformed ids cannot name an existing car.
pub(crate) fn parse_car_id(raw: &str) -> Result<CarId, MarketplaceError> {
    raw.parse().map_err(|_| MarketplaceError::CarNotFound)
}

// ── GET /cars/featured ───────────────────────────────────────────────────────

pub async fn get_featured_cars(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarResponse>>, MarketplaceError> {
    let usecase = ListFeaturedCarsUseCase {
        repo: state.car_repo(),
    };
    let cars = usecase.execute().await?;
    Ok(Json(cars.into_iter().map(Into::into).collect()))
}

// ── GET /cars ────────────────────────────────────────────────────────────────

pub async fn search_cars(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<SearchResponse>, MarketplaceError> {
    let query: SearchQuery = parse_query(raw_query)?;

    let price_range = PriceRange::from_bounds(query.min_price, query.max_price);
    let sort_by = query.sort_by.unwrap_or_default();
    let page = PageRequest::from_query(query.per_page, query.page);

    let usecase = SearchCarsUseCase {
        repo: state.car_repo(),
    };
    let result = usecase
        .execute(SearchCarsInput {
            filter: CarFilter {
                location: query.location,
                car_types: query.car_type,
                transmissions: query.transmission,
                fuel_types: query.fuel_type,
                min_seats: query.min_seats,
            },
            price_range,
            sort_by,
            page,
            pickup: query.pickup,
            dropoff: query.dropoff,
        })
        .await?;

    Ok(Json(SearchResponse {
        items: result.listings.into_iter().map(Into::into).collect(),
        total: result.total,
        page: page.page,
        per_page: page.per_page,
        price_range,
        sort_by,
    }))
}

// ── GET /cars/{car_id} ───────────────────────────────────────────────────────

pub async fn get_car(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<CarDetailResponse>, MarketplaceError> {
    let car_id = parse_car_id(&car_id)?;
    let query: QuoteQuery = parse_query(raw_query)?;
    let usecase = GetCarUseCase {
        repo: state.car_repo(),
    };
    let (car, quote) = usecase.execute(car_id, query.pickup, query.dropoff).await?;
    Ok(Json(CarDetailResponse {
        car: car.into(),
        quote: quote.into(),
    }))
}

// ── GET /cars/{car_id}/quote ─────────────────────────────────────────────────

pub async fn get_quote(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<QuoteResponse>, MarketplaceError> {
    let car_id = parse_car_id(&car_id)?;
    let query: QuoteQuery = parse_query(raw_query)?;
    let usecase = GetCarUseCase {
        repo: state.car_repo(),
    };
    let (_, quote) = usecase.execute(car_id, query.pickup, query.dropoff).await?;
    Ok(Json(quote.into()))
}
