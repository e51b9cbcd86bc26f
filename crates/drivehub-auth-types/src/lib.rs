//! Session handling shared across DriveHub services.
//!
//! The auth server of the backend-as-a-service issues the tokens; this crate
//! validates them, stores them in cookies, and extracts the signed-in user.

pub mod cookie;
pub mod session;
pub mod token;
