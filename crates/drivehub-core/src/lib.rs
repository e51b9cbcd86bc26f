//! Service plumbing shared by DriveHub services: error bodies, health probes,
//! request middleware, serde helpers and tracing setup.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
