use thiserror::Error;

use crate::domain::errors::StoreError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HotelIdError {
    #[error("Invalid ObjectId format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomIdError {
    #[error("Invalid ObjectId format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomTypeError {
    #[error("Unknown room type code: {0}")]
    UnknownCode(i32),
}

/// Top-level error for hotel and room operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HotelError {
    #[error("Invalid hotel ID: {0}")]
    InvalidHotelId(#[from] HotelIdError),

    #[error("Invalid room ID: {0}")]
    InvalidRoomId(#[from] RoomIdError),

    #[error("Invalid room type: {0}")]
    InvalidRoomType(#[from] RoomTypeError),

    #[error("not found {collection} with id {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for HotelError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => HotelError::NotFound { collection, id },
            other => HotelError::Store(other),
        }
    }
}
