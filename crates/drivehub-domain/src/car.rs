//! Car listing attribute types.
//!
//! The store keeps these as lowercase text columns; `as_str` / `FromStr`
//! are the column encoding and serde uses the same spelling on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pagination::Sort;

/// Returned when a stored or submitted attribute value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {attribute}: {value:?}")]
pub struct UnknownVariant {
    pub attribute: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Automatic,
    Manual,
}

impl Transmission {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for Transmission {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automatic" => Ok(Self::Automatic),
            "manual" => Ok(Self::Manual),
            other => Err(UnknownVariant {
                attribute: "transmission",
                value: other.to_owned(),
            }),
        }
    }
}

/// Fuel type. `gasoline` is accepted as a spelling of `petrol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    #[serde(alias = "gasoline")]
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

impl FuelType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Petrol => "petrol",
            Self::Diesel => "diesel",
            Self::Hybrid => "hybrid",
            Self::Electric => "electric",
        }
    }
}

impl FromStr for FuelType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "petrol" | "gasoline" => Ok(Self::Petrol),
            "diesel" => Ok(Self::Diesel),
            "hybrid" => Ok(Self::Hybrid),
            "electric" => Ok(Self::Electric),
            other => Err(UnknownVariant {
                attribute: "fuel type",
                value: other.to_owned(),
            }),
        }
    }
}

/// Vehicle class shown on listing cards and used as a search facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarType {
    Economy,
    Compact,
    Sedan,
    Suv,
    Luxury,
    Electric,
    Van,
}

impl CarType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Compact => "compact",
            Self::Sedan => "sedan",
            Self::Suv => "suv",
            Self::Luxury => "luxury",
            Self::Electric => "electric",
            Self::Van => "van",
        }
    }
}

impl FromStr for CarType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economy" => Ok(Self::Economy),
            "compact" => Ok(Self::Compact),
            "sedan" => Ok(Self::Sedan),
            "suv" => Ok(Self::Suv),
            "luxury" => Ok(Self::Luxury),
            "electric" => Ok(Self::Electric),
            "van" => Ok(Self::Van),
            other => Err(UnknownVariant {
                attribute: "car type",
                value: other.to_owned(),
            }),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Transmission, FuelType, CarType);

/// Sort order for the search listing.
///
/// Wire format is a single kebab-case string: `recommended`, `price-low`,
/// `price-high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarSortBy {
    /// Store order (newest listings first).
    #[default]
    Recommended,
    Price(Sort),
}

impl CarSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "recommended" => Some(Self::Recommended),
            "price-low" => Some(Self::Price(Sort::Asc)),
            "price-high" => Some(Self::Price(Sort::Desc)),
            _ => None,
        }
    }

    pub fn as_kebab_case(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Price(Sort::Asc) => "price-low",
            Self::Price(Sort::Desc) => "price-high",
        }
    }
}

impl<'de> Deserialize<'de> for CarSortBy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_kebab_case(&s).ok_or_else(|| {
            serde::de::Error::unknown_variant(&s, &["recommended", "price-low", "price-high"])
        })
    }
}

impl Serialize for CarSortBy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_kebab_case())
    }
}
