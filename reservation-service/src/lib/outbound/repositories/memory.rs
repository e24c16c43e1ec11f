use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::domain::booking::models::Booking;
use crate::domain::booking::models::BookingChanges;
use crate::domain::booking::models::BookingFilter;
use crate::domain::booking::models::BookingId;
use crate::domain::booking::models::NewBooking;
use crate::domain::booking::ports::BookingRepository;
use crate::domain::errors::StoreError;
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
use crate::domain::hotel::ports::HotelRepository;
use crate::domain::hotel::ports::RoomRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

#[derive(Default)]
struct Collections {
    users: BTreeMap<UserId, User>,
    hotels: BTreeMap<HotelId, Hotel>,
    rooms: BTreeMap<RoomId, Room>,
    bookings: BTreeMap<BookingId, Booking>,
}

/// Process-local record store implementing every repository port.
///
/// Records are kept in id order, which is insertion order since ObjectIds
/// are generated monotonically. Nothing is persisted.
#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections
            .read()
            .map_err(|_| StoreError::Database("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections
            .write()
            .map_err(|_| StoreError::Database("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = user.with_id(UserId(ObjectId::new()));
        self.write()?.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, StoreError> {
        self.read()?
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("users", id))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|user| user.email == *email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn update_by_id(
        &self,
        id: &UserId,
        changes: &UpdateUserCommand,
    ) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        let user = collections
            .users
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("users", id))?;

        if let Some(first_name) = &changes.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            user.last_name = last_name.clone();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), StoreError> {
        self.write()?
            .users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("users", id))
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        self.write()?.users.clear();
        Ok(())
    }
}

#[async_trait]
impl HotelRepository for InMemoryStore {
    async fn insert(&self, hotel: NewHotel) -> Result<Hotel, StoreError> {
        let hotel = hotel.with_id(HotelId(ObjectId::new()));
        self.write()?.hotels.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn find_by_id(&self, id: &HotelId) -> Result<Hotel, StoreError> {
        self.read()?
            .hotels
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("hotels", id))
    }

    async fn find_all(
        &self,
        filter: &HotelFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Hotel>, StoreError> {
        let skip = usize::try_from(pagination.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);

        Ok(self
            .read()?
            .hotels
            .values()
            .filter(|hotel| filter.matches(hotel))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_by_id(&self, id: &HotelId, changes: &HotelChanges) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        let hotel = collections
            .hotels
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("hotels", id))?;

        if let Some(name) = &changes.name {
            hotel.name = name.clone();
        }
        if let Some(location) = &changes.location {
            hotel.location = location.clone();
        }
        if let Some(rating) = changes.rating {
            hotel.rating = rating;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &HotelId) -> Result<(), StoreError> {
        self.write()?
            .hotels
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("hotels", id))
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        self.write()?.hotels.clear();
        Ok(())
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn insert(&self, room: NewRoom) -> Result<Room, StoreError> {
        let room = room.with_id(RoomId(ObjectId::new()));

        let mut collections = self.write()?;
        collections.rooms.insert(room.id, room.clone());
        match collections.hotels.get_mut(&room.hotel_id) {
            Some(hotel) => hotel.rooms.push(room.id),
            None => {
                tracing::warn!(room_id = %room.id, hotel_id = %room.hotel_id, "Room inserted for unknown hotel")
            }
        }
        Ok(room)
    }

    async fn find_by_id(&self, id: &RoomId) -> Result<Room, StoreError> {
        self.read()?
            .rooms
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("rooms", id))
    }

    async fn find_all(&self, filter: &RoomFilter) -> Result<Vec<Room>, StoreError> {
        Ok(self
            .read()?
            .rooms
            .values()
            .filter(|room| filter.matches(room))
            .cloned()
            .collect())
    }

    async fn update_by_id(&self, id: &RoomId, changes: &RoomChanges) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        let room = collections
            .rooms
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("rooms", id))?;

        if let Some(base_price) = changes.base_price {
            room.base_price = base_price;
        }
        if let Some(price) = changes.price {
            room.price = price;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &RoomId) -> Result<(), StoreError> {
        self.write()?
            .rooms
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("rooms", id))
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        self.write()?.rooms.clear();
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let booking = booking.with_id(BookingId(ObjectId::new()));
        self.write()?.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Booking, StoreError> {
        self.read()?
            .bookings
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("bookings", id))
    }

    async fn find_all(&self, filter: &BookingFilter) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .read()?
            .bookings
            .values()
            .filter(|booking| filter.matches(booking))
            .cloned()
            .collect())
    }

    async fn update_by_id(
        &self,
        id: &BookingId,
        changes: &BookingChanges,
    ) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        let booking = collections
            .bookings
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("bookings", id))?;

        if let Some(cancelled_at) = changes.cancelled_at {
            booking.cancelled_at = Some(cancelled_at);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &BookingId) -> Result<(), StoreError> {
        self.write()?
            .bookings
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("bookings", id))
    }

    async fn drop_all(&self) -> Result<(), StoreError> {
        self.write()?.bookings.clear();
        Ok(())
    }
}
