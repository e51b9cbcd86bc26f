//! sea-orm entities for the tables the marketplace reads and writes.

pub mod bookings;
pub mod cars;
pub mod profiles;
pub mod user_roles;
