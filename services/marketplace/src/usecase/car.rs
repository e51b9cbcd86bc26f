use chrono::{DateTime, Utc};

use drivehub_domain::car::CarSortBy;
use drivehub_domain::id::CarId;
use drivehub_domain::pagination::PageRequest;
use drivehub_domain::pricing::{PriceQuote, PricingError, rental_days};
use drivehub_domain::search::{PriceRange, filter_by_price_range, sort_listings};

use crate::domain::repository::CarRepository;
use crate::domain::types::{Car, CarFilter, Listing};
use crate::error::MarketplaceError;

/// Number of cars on the landing view.
pub const FEATURED_LIMIT: u64 = 6;

// ── ListFeaturedCars ─────────────────────────────────────────────────────────

pub struct ListFeaturedCarsUseCase<R: CarRepository> {
    pub repo: R,
}

impl<R: CarRepository> ListFeaturedCarsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Car>, MarketplaceError> {
        self.repo.list_featured(FEATURED_LIMIT).await
    }
}

// ── SearchCars ───────────────────────────────────────────────────────────────

pub struct SearchCarsInput {
    pub filter: CarFilter,
    pub price_range: PriceRange,
    pub sort_by: CarSortBy,
    pub page: PageRequest,
    pub pickup: Option<DateTime<Utc>>,
    pub dropoff: Option<DateTime<Utc>>,
}

pub struct SearchResult {
    pub listings: Vec<Listing>,
    /// Matches across all pages.
    pub total: u64,
}

pub struct SearchCarsUseCase<R: CarRepository> {
    pub repo: R,
}

impl<R: CarRepository> SearchCarsUseCase<R> {
    pub async fn execute(&self, input: SearchCarsInput) -> Result<SearchResult, MarketplaceError> {
        let days = match (input.pickup, input.dropoff) {
            (Some(pickup), Some(dropoff)) => Some(rental_days(pickup, dropoff)?),
            (None, None) => None,
            _ => return Err(PricingError::IncompleteDateRange.into()),
        };

        let cars = self.repo.list_available(&input.filter).await?;
        let mut cars = filter_by_price_range(cars, input.price_range);
        sort_listings(&mut cars, input.sort_by);

        let total = cars.len() as u64;
        let listings = input
            .page
            .apply(cars)
            .into_iter()
            .map(|car| {
                let quote = days
                    .map(|days| PriceQuote::for_days(car.price_per_day, car.insurance_per_day, days));
                Listing { car, quote }
            })
            .collect();

        tracing::debug!(total, sort_by = input.sort_by.as_kebab_case(), "searched cars");
        Ok(SearchResult { listings, total })
    }
}

// ── GetCar ───────────────────────────────────────────────────────────────────

pub struct GetCarUseCase<R: CarRepository> {
    pub repo: R,
}

impl<R: CarRepository> GetCarUseCase<R> {
    /// Load a car with its price quote. Without dates the quote covers the
    /// default rental length.
    pub async fn execute(
        &self,
        car_id: CarId,
        pickup: Option<DateTime<Utc>>,
        dropoff: Option<DateTime<Utc>>,
    ) -> Result<(Car, PriceQuote), MarketplaceError> {
        let car = self
            .repo
            .find_by_id(car_id)
            .await?
            .ok_or(MarketplaceError::CarNotFound)?;
        let quote = car.quote(pickup, dropoff)?;
        Ok((car, quote))
    }
}
