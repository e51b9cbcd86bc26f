pub mod account;
pub mod admin;
pub mod booking;
pub mod car;
pub mod session;
