//! Booking status and its allowed transitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::car::UnknownVariant;

/// Lifecycle of a booking.
///
/// ```text
/// pending ──► upcoming ──► completed
///    │            │
///    └──► cancelled ◄┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Upcoming,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// The renter may cancel until the rental has been completed.
    pub fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Upcoming)
    }

    /// Pending or upcoming bookings count as active on the provider dashboard.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Upcoming)
    }

    /// Transitions a provider may apply to a booking on one of their cars.
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Upcoming) | (Self::Upcoming, Self::Completed)
        )
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownVariant {
                attribute: "booking status",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
