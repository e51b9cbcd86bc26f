//! Rental price calculation.
//!
//! `total = rate * days + insurance * days + FIXED_TAXES`. The car detail
//! quote and the booking submission both go through [`PriceQuote`], so a
//! renter is charged exactly what they were shown.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Flat taxes and fees added once per rental.
pub const FIXED_TAXES: f64 = 25.0;

/// Insurance rate applied when a listing does not set its own.
pub const DEFAULT_INSURANCE_PER_DAY: f64 = 15.0;

/// Rental length quoted on the detail page before dates are chosen.
pub const DEFAULT_RENTAL_DAYS: u32 = 3;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("dropoff must be after pickup")]
    InvalidDateRange,
    #[error("both pickup and dropoff dates are required")]
    IncompleteDateRange,
}

/// Number of billable days between pickup and dropoff.
///
/// Any started day is billed in full. Rejects ranges where dropoff is not
/// strictly after pickup.
pub fn rental_days(pickup: DateTime<Utc>, dropoff: DateTime<Utc>) -> Result<u32, PricingError> {
    let seconds = (dropoff - pickup).num_seconds();
    if seconds <= 0 {
        return Err(PricingError::InvalidDateRange);
    }
    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    u32::try_from(days).map_err(|_| PricingError::InvalidDateRange)
}

/// `days*rate + days*insurance + tax`.
pub fn calculate_total(rate: f64, insurance: f64, days: u32, tax: f64) -> f64 {
    let days = f64::from(days);
    days * rate + days * insurance + tax
}

/// Itemised price for one rental.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    pub days: u32,
    pub price_per_day: f64,
    pub insurance_per_day: f64,
    /// `price_per_day * days`
    pub base: f64,
    /// `insurance_per_day * days`
    pub insurance: f64,
    pub taxes: f64,
    pub total: f64,
}

impl PriceQuote {
    pub fn for_days(price_per_day: f64, insurance_per_day: f64, days: u32) -> Self {
        let n = f64::from(days);
        Self {
            days,
            price_per_day,
            insurance_per_day,
            base: price_per_day * n,
            insurance: insurance_per_day * n,
            taxes: FIXED_TAXES,
            total: calculate_total(price_per_day, insurance_per_day, days, FIXED_TAXES),
        }
    }

    pub fn for_dates(
        price_per_day: f64,
        insurance_per_day: f64,
        pickup: DateTime<Utc>,
        dropoff: DateTime<Utc>,
    ) -> Result<Self, PricingError> {
        let days = rental_days(pickup, dropoff)?;
        Ok(Self::for_days(price_per_day, insurance_per_day, days))
    }

    /// Quote for optional dates: none given quotes [`DEFAULT_RENTAL_DAYS`].
    pub fn for_optional_dates(
        price_per_day: f64,
        insurance_per_day: f64,
        pickup: Option<DateTime<Utc>>,
        dropoff: Option<DateTime<Utc>>,
    ) -> Result<Self, PricingError> {
        match (pickup, dropoff) {
            (Some(pickup), Some(dropoff)) => {
                Self::for_dates(price_per_day, insurance_per_day, pickup, dropoff)
            }
            (None, None) => Ok(Self::for_days(
                price_per_day,
                insurance_per_day,
                DEFAULT_RENTAL_DAYS,
            )),
            _ => Err(PricingError::IncompleteDateRange),
        }
    }
}
