use std::fmt;

use bson::oid::ObjectId;

use crate::domain::hotel::errors::HotelIdError;
use crate::domain::hotel::errors::RoomIdError;
use crate::domain::hotel::errors::RoomTypeError;

/// A hotel and the ids of the rooms it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub location: String,
    pub rating: i32,
    pub rooms: Vec<RoomId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewHotel {
    pub name: String,
    pub location: String,
    pub rating: i32,
}

impl NewHotel {
    pub fn with_id(self, id: HotelId) -> Hotel {
        Hotel {
            id,
            name: self.name,
            location: self.location,
            rating: self.rating,
            rooms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HotelId(pub ObjectId);

impl HotelId {
    /// Parse a hotel ID from its hex representation.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a 24-character hex ObjectId
    pub fn from_string(s: &str) -> Result<Self, HotelIdError> {
        ObjectId::parse_str(s)
            .map(HotelId)
            .map_err(|e| HotelIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// A bookable room belonging to exactly one hotel.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub room_type: RoomType,
    pub base_price: f64,
    pub price: f64,
    pub hotel_id: HotelId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub room_type: RoomType,
    pub base_price: f64,
    pub price: f64,
    pub hotel_id: HotelId,
}

impl NewRoom {
    pub fn with_id(self, id: RoomId) -> Room {
        Room {
            id,
            room_type: self.room_type,
            base_price: self.base_price,
            price: self.price,
            hotel_id: self.hotel_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub ObjectId);

impl RoomId {
    /// Parse a room ID from its hex representation.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a 24-character hex ObjectId
    pub fn from_string(s: &str) -> Result<Self, RoomIdError> {
        ObjectId::parse_str(s)
            .map(RoomId)
            .map_err(|e| RoomIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Room category, persisted and serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomType {
    Single,
    Double,
    Deluxe,
}

impl RoomType {
    pub fn code(self) -> i32 {
        match self {
            RoomType::Single => 1,
            RoomType::Double => 2,
            RoomType::Deluxe => 3,
        }
    }
}

impl TryFrom<i32> for RoomType {
    type Error = RoomTypeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(RoomType::Single),
            2 => Ok(RoomType::Double),
            3 => Ok(RoomType::Deluxe),
            other => Err(RoomTypeError::UnknownCode(other)),
        }
    }
}

/// Hotel listing filter. `None` matches every hotel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HotelFilter {
    pub rating: Option<i32>,
}

impl HotelFilter {
    pub fn matches(&self, hotel: &Hotel) -> bool {
        self.rating.map_or(true, |rating| hotel.rating == rating)
    }
}

/// One-based page selection for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Pagination {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;

    /// Missing or zero values fall back to page 1 and a limit of 10.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(Self::DEFAULT_PAGE),
            limit: limit.filter(|l| *l > 0).unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of records to skip before this page starts, saturating at
    /// `u64::MAX`.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub hotel_id: Option<HotelId>,
}

impl RoomFilter {
    pub fn for_hotel(hotel_id: HotelId) -> Self {
        Self {
            hotel_id: Some(hotel_id),
        }
    }

    pub fn matches(&self, room: &Room) -> bool {
        self.hotel_id.map_or(true, |id| room.hotel_id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelChanges {
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomChanges {
    pub base_price: Option<f64>,
    pub price: Option<f64>,
}
