//! In-memory filtering and ordering of listing results.

use serde::{Deserialize, Serialize};

use crate::car::CarSortBy;
use crate::pagination::Sort;

/// Upper bound of the search view's price slider.
pub const DEFAULT_MAX_PRICE: f64 = 200.0;

/// Anything that carries a daily rate.
pub trait Priced {
    fn price_per_day(&self) -> f64;
}

/// Inclusive daily-price range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

impl PriceRange {
    /// Build from optional bounds, filling missing ones from the default range.
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Self {
        let default = Self::default();
        Self {
            min: min.unwrap_or(default.min),
            max: max.unwrap_or(default.max),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Keep exactly the items priced within `range`, in their original order.
pub fn filter_by_price_range<T: Priced>(items: Vec<T>, range: PriceRange) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| range.contains(item.price_per_day()))
        .collect()
}

/// Order items for display. Sorting is stable, so equal prices keep store order.
pub fn sort_listings<T: Priced>(items: &mut [T], sort_by: CarSortBy) {
    match sort_by {
        CarSortBy::Recommended => {}
        CarSortBy::Price(Sort::Asc) => {
            items.sort_by(|a, b| a.price_per_day().total_cmp(&b.price_per_day()))
        }
        CarSortBy::Price(Sort::Desc) => {
            items.sort_by(|a, b| b.price_per_day().total_cmp(&a.price_per_day()))
        }
    }
}
