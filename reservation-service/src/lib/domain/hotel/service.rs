use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::HotelFilter;
use crate::domain::hotel::models::HotelId;
use crate::domain::hotel::models::NewHotel;
use crate::domain::hotel::models::NewRoom;
use crate::domain::hotel::models::Pagination;
use crate::domain::hotel::models::Room;
use crate::domain::hotel::models::RoomFilter;
use crate::domain::hotel::models::RoomId;
use crate::domain::hotel::ports::HotelRepository;
use crate::domain::hotel::ports::HotelServicePort;
use crate::domain::hotel::ports::RoomRepository;

/// Catalogue service over the hotel and room stores.
pub struct HotelService<HR, RR>
where
    HR: HotelRepository,
    RR: RoomRepository,
{
    hotels: Arc<HR>,
    rooms: Arc<RR>,
}

impl<HR, RR> HotelService<HR, RR>
where
    HR: HotelRepository,
    RR: RoomRepository,
{
    pub fn new(hotels: Arc<HR>, rooms: Arc<RR>) -> Self {
        Self { hotels, rooms }
    }
}

#[async_trait]
impl<HR, RR> HotelServicePort for HotelService<HR, RR>
where
    HR: HotelRepository,
    RR: RoomRepository,
{
    async fn create_hotel(&self, hotel: NewHotel) -> Result<Hotel, HotelError> {
        let hotel = self.hotels.insert(hotel).await?;
        tracing::info!(hotel_id = %hotel.id, name = %hotel.name, "Hotel created");
        Ok(hotel)
    }

    async fn get_hotel(&self, id: &HotelId) -> Result<Hotel, HotelError> {
        Ok(self.hotels.find_by_id(id).await?)
    }

    async fn list_hotels(
        &self,
        filter: &HotelFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Hotel>, HotelError> {
        Ok(self.hotels.find_all(filter, pagination).await?)
    }

    async fn add_room(&self, room: NewRoom) -> Result<Room, HotelError> {
        self.hotels.find_by_id(&room.hotel_id).await?;

        let room = self.rooms.insert(room).await?;
        tracing::info!(room_id = %room.id, hotel_id = %room.hotel_id, "Room added");
        Ok(room)
    }

    async fn get_room(&self, id: &RoomId) -> Result<Room, HotelError> {
        Ok(self.rooms.find_by_id(id).await?)
    }

    async fn list_rooms(&self, hotel_id: &HotelId) -> Result<Vec<Room>, HotelError> {
        Ok(self.rooms.find_all(&RoomFilter::for_hotel(*hotel_id)).await?)
    }
}
