use bson::oid::ObjectId;
use bson::DateTime as BsonDateTime;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::booking::models::Booking;
use crate::domain::booking::models::BookingId;
use crate::domain::booking::models::NewBooking;
use crate::domain::errors::StoreError;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::HotelId;
use crate::domain::hotel::models::NewHotel;
use crate::domain::hotel::models::NewRoom;
use crate::domain::hotel::models::Room;
use crate::domain::hotel::models::RoomId;
use crate::domain::hotel::models::RoomType;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

pub const USERS: &str = "users";
pub const HOTELS: &str = "hotels";
pub const ROOMS: &str = "rooms";
pub const BOOKINGS: &str = "bookings";

fn require_id(collection: &'static str, id: Option<ObjectId>) -> Result<ObjectId, StoreError> {
    id.ok_or_else(|| StoreError::invalid_document(collection, "missing _id"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub encrypted_password: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<NewUser> for UserDocument {
    fn from(user: NewUser) -> Self {
        Self {
            id: None,
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
            email: user.email.to_string(),
            encrypted_password: user.password_hash,
            is_admin: user.is_admin,
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = StoreError;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(require_id(USERS, doc.id)?),
            first_name: PersonName::new(doc.first_name)
                .map_err(|e| StoreError::invalid_document(USERS, format!("firstName {e}")))?,
            last_name: PersonName::new(doc.last_name)
                .map_err(|e| StoreError::invalid_document(USERS, format!("lastName {e}")))?,
            email: EmailAddress::new(doc.email)
                .map_err(|e| StoreError::invalid_document(USERS, e))?,
            password_hash: doc.encrypted_password,
            is_admin: doc.is_admin,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub rooms: Vec<ObjectId>,
    #[serde(default)]
    pub rating: i32,
}

impl From<NewHotel> for HotelDocument {
    fn from(hotel: NewHotel) -> Self {
        Self {
            id: None,
            name: hotel.name,
            location: hotel.location,
            rooms: Vec::new(),
            rating: hotel.rating,
        }
    }
}

impl TryFrom<HotelDocument> for Hotel {
    type Error = StoreError;

    fn try_from(doc: HotelDocument) -> Result<Self, Self::Error> {
        Ok(Hotel {
            id: HotelId(require_id(HOTELS, doc.id)?),
            name: doc.name,
            location: doc.location,
            rating: doc.rating,
            rooms: doc.rooms.into_iter().map(RoomId).collect(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "type")]
    pub room_type: i32,
    pub base_price: f64,
    pub price: f64,
    pub hotel_id: ObjectId,
}

impl From<NewRoom> for RoomDocument {
    fn from(room: NewRoom) -> Self {
        Self {
            id: None,
            room_type: room.room_type.code(),
            base_price: room.base_price,
            price: room.price,
            hotel_id: room.hotel_id.as_object_id(),
        }
    }
}

impl TryFrom<RoomDocument> for Room {
    type Error = StoreError;

    fn try_from(doc: RoomDocument) -> Result<Self, Self::Error> {
        Ok(Room {
            id: RoomId(require_id(ROOMS, doc.id)?),
            room_type: RoomType::try_from(doc.room_type)
                .map_err(|e| StoreError::invalid_document(ROOMS, e))?,
            base_price: doc.base_price,
            price: doc.price,
            hotel_id: HotelId(doc.hotel_id),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "userID")]
    pub user_id: ObjectId,
    #[serde(rename = "roomID")]
    pub room_id: ObjectId,
    pub num_persons: i64,
    pub from_date: BsonDateTime,
    pub till_date: BsonDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<BsonDateTime>,
}

impl From<NewBooking> for BookingDocument {
    fn from(booking: NewBooking) -> Self {
        Self {
            id: None,
            user_id: booking.user_id.as_object_id(),
            room_id: booking.room_id.as_object_id(),
            num_persons: i64::from(booking.num_persons),
            from_date: BsonDateTime::from_chrono(booking.stay.from()),
            till_date: BsonDateTime::from_chrono(booking.stay.till()),
            cancelled_at: None,
        }
    }
}

impl TryFrom<BookingDocument> for Booking {
    type Error = StoreError;

    fn try_from(doc: BookingDocument) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: BookingId(require_id(BOOKINGS, doc.id)?),
            user_id: UserId(doc.user_id),
            room_id: RoomId(doc.room_id),
            num_persons: u32::try_from(doc.num_persons)
                .map_err(|e| StoreError::invalid_document(BOOKINGS, format!("numPersons {e}")))?,
            from_date: doc.from_date.to_chrono(),
            till_date: doc.till_date.to_chrono(),
            cancelled_at: doc.cancelled_at.map(BsonDateTime::to_chrono),
        })
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;
    use chrono::Duration;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::domain::booking::models::StayPeriod;

    #[test]
    fn test_booking_document_field_names() {
        let from = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let booking = NewBooking {
            user_id: UserId(ObjectId::new()),
            room_id: RoomId(ObjectId::new()),
            num_persons: 2,
            stay: StayPeriod::new(from, from + Duration::days(5)).unwrap(),
        };

        let document = bson::to_document(&BookingDocument::from(booking)).unwrap();

        for key in ["userID", "roomID", "numPersons", "fromDate", "tillDate"] {
            assert!(document.contains_key(key), "missing {key}");
        }
        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("cancelledAt"));
        assert_eq!(
            document.get_datetime("fromDate").unwrap().to_chrono(),
            from
        );
    }

    #[test]
    fn test_room_document_uses_type_code() {
        let raw = doc! {
            "_id": ObjectId::new(),
            "type": 3,
            "basePrice": 120.0,
            "price": 150.0,
            "hotelId": ObjectId::new(),
        };

        let room = Room::try_from(bson::from_document::<RoomDocument>(raw).unwrap()).unwrap();
        assert_eq!(room.room_type, RoomType::Deluxe);

        let unknown = RoomDocument {
            room_type: 9,
            ..RoomDocument::from(NewRoom {
                room_type: RoomType::Single,
                base_price: 1.0,
                price: 1.0,
                hotel_id: room.hotel_id,
            })
        };
        assert!(Room::try_from(unknown).is_err());
    }

    #[test]
    fn test_user_document_without_id_is_invalid() {
        let doc = UserDocument {
            id: None,
            first_name: "James".to_string(),
            last_name: "Foo".to_string(),
            email: "james@foo.com".to_string(),
            encrypted_password: "digest".to_string(),
            is_admin: false,
        };

        assert!(matches!(
            User::try_from(doc),
            Err(StoreError::InvalidDocument { collection: USERS, .. })
        ));
    }
}
