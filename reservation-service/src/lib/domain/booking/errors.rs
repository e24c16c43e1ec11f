use thiserror::Error;

use crate::domain::errors::StoreError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingIdError {
    #[error("Invalid ObjectId format: {0}")]
    InvalidFormat(String),
}

/// Error for requested stay validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StayPeriodError {
    #[error("cannot book a room in the past")]
    InPast,

    #[error("tillDate must be after fromDate")]
    EndsBeforeStart,
}

/// Top-level error for booking operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid booking ID: {0}")]
    InvalidBookingId(#[from] BookingIdError),

    #[error("{0}")]
    InvalidStay(#[from] StayPeriodError),

    #[error("room already booked")]
    RoomAlreadyBooked,

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Booking not found: {0}")]
    NotFound(String),

    /// Requester neither owns the booking nor is an admin.
    #[error("Booking belongs to another user")]
    NotOwner,

    #[error("Admin privileges required")]
    AdminOnly,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound {
                collection: "rooms",
                id,
            } => BookingError::RoomNotFound(id),
            StoreError::NotFound { id, .. } => BookingError::NotFound(id),
            other => BookingError::Store(other),
        }
    }
}
