use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use chrono::Utc;

use crate::domain::booking::errors::BookingError;
use crate::domain::booking::models::BookRoomCommand;
use crate::domain::booking::models::Booking;
use crate::domain::booking::models::BookingChanges;
use crate::domain::booking::models::BookingFilter;
use crate::domain::booking::models::BookingId;
use crate::domain::booking::models::DateBound;
use crate::domain::booking::models::NewBooking;
use crate::domain::booking::models::StayPeriod;
use crate::domain::booking::ports::BookingRepository;
use crate::domain::booking::ports::BookingServicePort;
use crate::domain::hotel::models::RoomId;
use crate::domain::hotel::ports::RoomRepository;
use crate::domain::user::models::User;

/// Booking service: availability, ownership and admin cancellation rules.
pub struct BookingService<BR, RR>
where
    BR: BookingRepository,
    RR: RoomRepository,
{
    bookings: Arc<BR>,
    rooms: Arc<RR>,
}

impl<BR, RR> BookingService<BR, RR>
where
    BR: BookingRepository,
    RR: RoomRepository,
{
    pub fn new(bookings: Arc<BR>, rooms: Arc<RR>) -> Self {
        Self { bookings, rooms }
    }

    async fn has_conflict(&self, filter: BookingFilter) -> Result<bool, BookingError> {
        Ok(!self.bookings.find_all(&filter.active_only()).await?.is_empty())
    }
}

#[async_trait]
impl<BR, RR> BookingServicePort for BookingService<BR, RR>
where
    BR: BookingRepository,
    RR: RoomRepository,
{
    async fn book_room(&self, command: BookRoomCommand) -> Result<Booking, BookingError> {
        command.stay.ensure_not_past(Utc::now())?;

        self.rooms.find_by_id(&command.room_id).await?;

        if !self.is_available(&command.room_id, &command.stay).await? {
            tracing::info!(room_id = %command.room_id, "Room already booked for requested stay");
            return Err(BookingError::RoomAlreadyBooked);
        }

        let booking = self
            .bookings
            .insert(NewBooking {
                user_id: command.user_id,
                room_id: command.room_id,
                num_persons: command.num_persons,
                stay: command.stay,
            })
            .await?;

        tracing::info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            user_id = %booking.user_id,
            "Room booked"
        );
        Ok(booking)
    }

    async fn is_available(
        &self,
        room_id: &RoomId,
        stay: &StayPeriod,
    ) -> Result<bool, BookingError> {
        let stored_within_requested = BookingFilter::for_room(*room_id)
            .from_date(DateBound::OnOrAfter(stay.from()))
            .till_date(DateBound::OnOrBefore(stay.till()));
        if self.has_conflict(stored_within_requested).await? {
            return Ok(false);
        }

        let requested_within_stored = BookingFilter::for_room(*room_id)
            .from_date(DateBound::OnOrBefore(stay.from()))
            .till_date(DateBound::OnOrAfter(stay.till()));
        Ok(!self.has_conflict(requested_within_stored).await?)
    }

    async fn get_booking(
        &self,
        id: &BookingId,
        requester: &User,
    ) -> Result<Booking, BookingError> {
        let booking = self.bookings.find_by_id(id).await?;

        if !booking.is_owned_by(&requester.id) && !requester.is_admin {
            tracing::warn!(
                booking_id = %id,
                requester = %requester.id,
                "Booking read refused for non-owner"
            );
            return Err(BookingError::NotOwner);
        }

        Ok(booking)
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, BookingError> {
        Ok(self.bookings.find_all(filter).await?)
    }

    async fn cancel_booking(
        &self,
        id: &BookingId,
        requester: &User,
    ) -> Result<Booking, BookingError> {
        let mut booking = self.bookings.find_by_id(id).await?;

        if !requester.is_admin {
            tracing::warn!(
                booking_id = %id,
                requester = %requester.id,
                "Booking cancellation refused for non-admin"
            );
            return Err(BookingError::AdminOnly);
        }

        if booking.is_cancelled() {
            return Ok(booking);
        }

        let cancelled_at = Utc::now().trunc_subsecs(3);
        self.bookings
            .update_by_id(
                id,
                &BookingChanges {
                    cancelled_at: Some(cancelled_at),
                },
            )
            .await?;
        booking.cancelled_at = Some(cancelled_at);

        tracing::info!(booking_id = %id, cancelled_by = %requester.id, "Booking cancelled");
        Ok(booking)
    }
}
