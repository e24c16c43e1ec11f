use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::domain::auth::errors::AuthError;
use crate::domain::booking::errors::BookingError;
use crate::domain::booking::models::Booking;
use crate::domain::errors::StoreError;
use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::Room;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;

pub mod authenticate;
pub mod book_room;
pub mod cancel_booking;
pub mod create_user;
pub mod delete_user;
pub mod get_booking;
pub mod get_hotel;
pub mod get_user;
pub mod list_bookings;
pub mod list_hotel_rooms;
pub mod list_hotels;
pub mod list_users;
pub mod update_user;

/// Successful response: status code plus a JSON body serialized as-is.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Every failure an HTTP handler can report. Each variant fixes both the
/// status code and the body shape clients already depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    GatewayTimeout(String),
    BadRequest(String),
    /// Per-field validation messages, keyed by JSON field name.
    Validation(BTreeMap<String, String>),
    InvalidCredentials,
    BookingRejected(String),
    NotFound(String),
    Unauthorized(String),
    NotOwner,
    Forbidden(String),
}

impl ApiError {
    pub fn invalid_id() -> Self {
        ApiError::BadRequest("Invalid ID".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::GatewayTimeout(msg) => {
                tracing::error!(error = %msg, "Store deadline exceeded");
                error_body(StatusCode::GATEWAY_TIMEOUT, msg)
            }
            ApiError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            ApiError::Validation(fields) => (StatusCode::BAD_REQUEST, Json(fields)).into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": 400, "msg": "Bad Request" })),
            )
                .into_response(),
            ApiError::BookingRejected(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "type": "error", "msg": msg })),
            )
                .into_response(),
            ApiError::NotFound(msg) => error_body(StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => error_body(StatusCode::UNAUTHORIZED, msg),
            ApiError::NotOwner => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "status": 401, "msg": "error" })),
            )
                .into_response(),
            ApiError::Forbidden(msg) => error_body(StatusCode::FORBIDDEN, msg),
        }
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout(_) => ApiError::GatewayTimeout(err.to_string()),
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Database(_) | StoreError::InvalidDocument { .. } => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        tracing::debug!(error = %err, "Rejected request body");
        ApiError::BadRequest("Invalid JSON Request".to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        tracing::debug!(error = %err, "Rejected query string");
        ApiError::BadRequest(err.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId(_) => ApiError::invalid_id(),
            UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::EmailAlreadyExists(_) => {
                ApiError::Validation(BTreeMap::from([("email".to_string(), err.to_string())]))
            }
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::PasswordHashing(_) => ApiError::InternalServerError(err.to_string()),
            UserError::Store(e) => e.into(),
        }
    }
}

impl From<HotelError> for ApiError {
    fn from(err: HotelError) -> Self {
        match err {
            HotelError::InvalidHotelId(_) | HotelError::InvalidRoomId(_) => ApiError::invalid_id(),
            HotelError::InvalidRoomType(_) => ApiError::BadRequest(err.to_string()),
            HotelError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            HotelError::Store(e) => e.into(),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidBookingId(_) => ApiError::invalid_id(),
            BookingError::InvalidStay(_) | BookingError::RoomAlreadyBooked => {
                ApiError::BookingRejected(err.to_string())
            }
            BookingError::RoomNotFound(_) | BookingError::NotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            BookingError::NotOwner => ApiError::NotOwner,
            BookingError::AdminOnly => ApiError::Forbidden("Forbidden".to_string()),
            BookingError::Store(e) => e.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::InvalidToken(_) | AuthError::TokenExpired | AuthError::UnknownUser(_) => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Password(_) | AuthError::Signing(_) => {
                ApiError::InternalServerError(err.to_string())
            }
            AuthError::Store(e) => e.into(),
        }
    }
}

/// Body of a lookup that keeps answering 200 when the record is absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    Missing { error: &'static str },
}

impl<T> Lookup<T> {
    pub fn missing() -> Self {
        Lookup::Missing {
            error: "not found!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
            email: user.email.to_string(),
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelData {
    pub id: String,
    pub name: String,
    pub location: String,
    pub rating: i32,
    pub rooms: Vec<String>,
}

impl From<&Hotel> for HotelData {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id.to_string(),
            name: hotel.name.clone(),
            location: hotel.location.clone(),
            rating: hotel.rating,
            rooms: hotel.rooms.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomData {
    pub id: String,
    #[serde(rename = "type")]
    pub room_type: i32,
    pub base_price: f64,
    pub price: f64,
    pub hotel_id: String,
}

impl From<&Room> for RoomData {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            room_type: room.room_type.code(),
            base_price: room.base_price,
            price: room.price,
            hotel_id: room.hotel_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "roomID")]
    pub room_id: String,
    pub num_persons: u32,
    pub from_date: DateTime<Utc>,
    pub till_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<&Booking> for BookingData {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            user_id: booking.user_id.to_string(),
            room_id: booking.room_id.to_string(),
            num_persons: booking.num_persons,
            from_date: booking.from_date,
            till_date: booking.till_date,
            cancelled_at: booking.cancelled_at,
        }
    }
}
