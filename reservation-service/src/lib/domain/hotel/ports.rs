use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::HotelChanges;
use crate::domain::hotel::models::HotelFilter;
use crate::domain::hotel::models::HotelId;
use crate::domain::hotel::models::NewHotel;
use crate::domain::hotel::models::NewRoom;
use crate::domain::hotel::models::Pagination;
use crate::domain::hotel::models::Room;
use crate::domain::hotel::models::RoomChanges;
use crate::domain::hotel::models::RoomFilter;
use crate::domain::hotel::models::RoomId;

/// Port for hotel and room catalogue operations.
#[async_trait]
pub trait HotelServicePort: Send + Sync + 'static {
    async fn create_hotel(&self, hotel: NewHotel) -> Result<Hotel, HotelError>;

    /// # Errors
    /// * `NotFound` - Hotel does not exist
    async fn get_hotel(&self, id: &HotelId) -> Result<Hotel, HotelError>;

    /// One page of hotels matching `filter`.
    async fn list_hotels(
        &self,
        filter: &HotelFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Hotel>, HotelError>;

    /// Add a room to an existing hotel.
    ///
    /// The room id is appended to the hotel's room list.
    ///
    /// # Errors
    /// * `NotFound` - Owning hotel does not exist
    async fn add_room(&self, room: NewRoom) -> Result<Room, HotelError>;

    /// # Errors
    /// * `NotFound` - Room does not exist
    async fn get_room(&self, id: &RoomId) -> Result<Room, HotelError>;

    /// Rooms whose owning hotel is `hotel_id`; empty for an unknown hotel.
    async fn list_rooms(&self, hotel_id: &HotelId) -> Result<Vec<Room>, HotelError>;
}

/// Persistence operations for the `hotels` collection.
#[async_trait]
pub trait HotelRepository: Send + Sync + 'static {
    async fn insert(&self, hotel: NewHotel) -> Result<Hotel, StoreError>;

    /// # Errors
    /// * `NotFound` - No hotel with this id
    async fn find_by_id(&self, id: &HotelId) -> Result<Hotel, StoreError>;

    async fn find_all(
        &self,
        filter: &HotelFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Hotel>, StoreError>;

    /// # Errors
    /// * `NotFound` - No hotel with this id
    async fn update_by_id(&self, id: &HotelId, changes: &HotelChanges) -> Result<(), StoreError>;

    /// # Errors
    /// * `NotFound` - No hotel with this id
    async fn delete_by_id(&self, id: &HotelId) -> Result<(), StoreError>;

    async fn drop_all(&self) -> Result<(), StoreError>;
}

/// Persistence operations for the `rooms` collection.
#[async_trait]
pub trait RoomRepository: Send + Sync + 'static {
    /// Persist a room and push its id onto the owning hotel's room list.
    async fn insert(&self, room: NewRoom) -> Result<Room, StoreError>;

    /// # Errors
    /// * `NotFound` - No room with this id
    async fn find_by_id(&self, id: &RoomId) -> Result<Room, StoreError>;

    async fn find_all(&self, filter: &RoomFilter) -> Result<Vec<Room>, StoreError>;

    /// # Errors
    /// * `NotFound` - No room with this id
    async fn update_by_id(&self, id: &RoomId, changes: &RoomChanges) -> Result<(), StoreError>;

    /// # Errors
    /// * `NotFound` - No room with this id
    async fn delete_by_id(&self, id: &RoomId) -> Result<(), StoreError>;

    async fn drop_all(&self) -> Result<(), StoreError>;
}
