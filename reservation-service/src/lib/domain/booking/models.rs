use std::fmt;

use bson::oid::ObjectId;
use chrono::DateTime;
use chrono::SubsecRound;
use chrono::Utc;

use crate::domain::booking::errors::BookingIdError;
use crate::domain::booking::errors::StayPeriodError;
use crate::domain::hotel::models::RoomId;
use crate::domain::user::models::UserId;

/// A reservation of one room by one user.
///
/// Cancellation is soft: `cancelled_at` is set once and the record is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub num_persons: u32,
    pub from_date: DateTime<Utc>,
    pub till_date: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled_at.is_some()
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingId(pub ObjectId);

impl BookingId {
    /// Parse a booking ID from its hex representation.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a 24-character hex ObjectId
    pub fn from_string(s: &str) -> Result<Self, BookingIdError> {
        ObjectId::parse_str(s)
            .map(BookingId)
            .map_err(|e| BookingIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Requested `[from, till]` stay. `till` is strictly after `from`.
///
/// Both ends are truncated to milliseconds, the precision the stores persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    from: DateTime<Utc>,
    till: DateTime<Utc>,
}

impl StayPeriod {
    /// # Errors
    /// * `EndsBeforeStart` - `till` is not after `from`
    pub fn new(from: DateTime<Utc>, till: DateTime<Utc>) -> Result<Self, StayPeriodError> {
        let from = from.trunc_subsecs(3);
        let till = till.trunc_subsecs(3);
        if till <= from {
            return Err(StayPeriodError::EndsBeforeStart);
        }
        Ok(Self { from, till })
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn till(&self) -> DateTime<Utc> {
        self.till
    }

    /// Reject a stay that has already started (or ended) at `now`.
    pub fn ensure_not_past(&self, now: DateTime<Utc>) -> Result<(), StayPeriodError> {
        if self.from < now || self.till < now {
            return Err(StayPeriodError::InPast);
        }
        Ok(())
    }
}

/// Booking record before the store has assigned it an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub user_id: UserId,
    pub room_id: RoomId,
    pub num_persons: u32,
    pub stay: StayPeriod,
}

impl NewBooking {
    pub fn with_id(self, id: BookingId) -> Booking {
        Booking {
            id,
            user_id: self.user_id,
            room_id: self.room_id,
            num_persons: self.num_persons,
            from_date: self.stay.from(),
            till_date: self.stay.till(),
            cancelled_at: None,
        }
    }
}

/// Command to book a room for the requesting user
#[derive(Debug, Clone)]
pub struct BookRoomCommand {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub num_persons: u32,
    pub stay: StayPeriod,
}

/// One-sided bound on a stored booking date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    OnOrAfter(DateTime<Utc>),
    OnOrBefore(DateTime<Utc>),
}

impl DateBound {
    pub fn admits(&self, value: DateTime<Utc>) -> bool {
        match *self {
            DateBound::OnOrAfter(bound) => value >= bound,
            DateBound::OnOrBefore(bound) => value <= bound,
        }
    }
}

/// Equality and range predicates over stored bookings. Unset fields match anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub room_id: Option<RoomId>,
    pub user_id: Option<UserId>,
    pub from_date: Option<DateBound>,
    pub till_date: Option<DateBound>,
    pub exclude_cancelled: bool,
}

impl BookingFilter {
    pub fn for_room(room_id: RoomId) -> Self {
        Self {
            room_id: Some(room_id),
            ..Self::default()
        }
    }

    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn from_date(mut self, bound: DateBound) -> Self {
        self.from_date = Some(bound);
        self
    }

    pub fn till_date(mut self, bound: DateBound) -> Self {
        self.till_date = Some(bound);
        self
    }

    pub fn active_only(mut self) -> Self {
        self.exclude_cancelled = true;
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.room_id.map_or(true, |id| booking.room_id == id)
            && self.user_id.map_or(true, |id| booking.user_id == id)
            && self
                .from_date
                .map_or(true, |bound| bound.admits(booking.from_date))
            && self
                .till_date
                .map_or(true, |bound| bound.admits(booking.till_date))
            && !(self.exclude_cancelled && booking.is_cancelled())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingChanges {
    pub cancelled_at: Option<DateTime<Utc>>,
}
