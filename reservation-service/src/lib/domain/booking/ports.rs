use async_trait::async_trait;

use crate::domain::booking::errors::BookingError;
use crate::domain::booking::models::BookRoomCommand;
use crate::domain::booking::models::Booking;
use crate::domain::booking::models::BookingChanges;
use crate::domain::booking::models::BookingFilter;
use crate::domain::booking::models::BookingId;
use crate::domain::booking::models::NewBooking;
use crate::domain::booking::models::StayPeriod;
use crate::domain::errors::StoreError;
use crate::domain::hotel::models::RoomId;
use crate::domain::user::models::User;

/// Port for booking operations.
#[async_trait]
pub trait BookingServicePort: Send + Sync + 'static {
    /// Book a room after the availability check.
    ///
    /// The check and the insert are separate store calls; two concurrent
    /// requests for the same room and stay can both succeed.
    ///
    /// # Errors
    /// * `InvalidStay` - Stay starts or ends in the past
    /// * `RoomNotFound` - Room does not exist
    /// * `RoomAlreadyBooked` - A conflicting active booking exists
    /// * `Store` - Store operation failed
    async fn book_room(&self, command: BookRoomCommand) -> Result<Booking, BookingError>;

    /// True when no active booking for `room_id` conflicts with `stay`.
    ///
    /// A stored booking conflicts when its range lies within `stay` or
    /// `stay` lies within it. Partially overlapping ranges do not conflict.
    ///
    /// The second containment check goes beyond the historical API, which
    /// only looked for stored ranges inside `stay`: a stay nested inside an
    /// active booking is refused here but was accepted there.
    async fn is_available(&self, room_id: &RoomId, stay: &StayPeriod)
        -> Result<bool, BookingError>;

    /// Read one booking on behalf of `requester`.
    ///
    /// # Errors
    /// * `NotFound` - Booking does not exist
    /// * `NotOwner` - Requester neither owns the booking nor is an admin
    async fn get_booking(&self, id: &BookingId, requester: &User)
        -> Result<Booking, BookingError>;

    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, BookingError>;

    /// Soft-cancel a booking. Cancelling twice keeps the first timestamp.
    ///
    /// # Errors
    /// * `NotFound` - Booking does not exist
    /// * `AdminOnly` - Requester is not an admin
    async fn cancel_booking(&self, id: &BookingId, requester: &User)
        -> Result<Booking, BookingError>;
}

/// Persistence operations for the `bookings` collection.
#[async_trait]
pub trait BookingRepository: Send + Sync + 'static {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError>;

    /// # Errors
    /// * `NotFound` - No booking with this id
    async fn find_by_id(&self, id: &BookingId) -> Result<Booking, StoreError>;

    async fn find_all(&self, filter: &BookingFilter) -> Result<Vec<Booking>, StoreError>;

    /// # Errors
    /// * `NotFound` - No booking with this id
    async fn update_by_id(&self, id: &BookingId, changes: &BookingChanges)
        -> Result<(), StoreError>;

    /// # Errors
    /// * `NotFound` - No booking with this id
    async fn delete_by_id(&self, id: &BookingId) -> Result<(), StoreError>;

    async fn drop_all(&self) -> Result<(), StoreError>;
}
