//! Role assignments.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::car::UnknownVariant;

/// Role label stored in a `user_roles` row.
///
/// Only `admin` grants anything today: it opens the fleet-management
/// endpoints. Users without a row are ordinary renters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    Admin,
}

impl AppRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

impl FromStr for AppRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            other => Err(UnknownVariant {
                attribute: "role",
                value: other.to_owned(),
            }),
        }
    }
}
