pub mod auth;
pub mod booking;
pub mod errors;
pub mod hotel;
pub mod user;
