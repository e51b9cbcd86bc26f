//! Domain types shared across all DriveHub services.
//!
//! Pure types and calculations with no framework dependencies: identifiers,
//! listing enums, booking status, pricing and the listing filter.

pub mod booking;
pub mod car;
pub mod id;
pub mod pagination;
pub mod pricing;
pub mod role;
pub mod search;
