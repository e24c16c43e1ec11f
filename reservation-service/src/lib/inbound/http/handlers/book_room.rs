use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookingData;
use crate::domain::booking::errors::BookingError;
use crate::domain::booking::models::BookRoomCommand;
use crate::domain::booking::models::StayPeriod;
use crate::domain::hotel::models::RoomId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// `POST /room/{room_id}/book` for the authenticated user.
pub async fn book_room(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(room_id): Path<String>,
    body: Result<Json<BookRoomRequest>, JsonRejection>,
) -> Result<ApiSuccess<BookingData>, ApiError> {
    let Json(body) = body?;
    let room_id = RoomId::from_string(&room_id).map_err(|_| ApiError::invalid_id())?;
    let stay = StayPeriod::new(body.from_date, body.till_date).map_err(BookingError::from)?;

    let booking = state
        .booking_service
        .book_room(BookRoomCommand {
            room_id,
            user_id: user.id,
            num_persons: body.num_persons,
            stay,
        })
        .await?;

    Ok(ApiSuccess::ok((&booking).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRoomRequest {
    from_date: DateTime<Utc>,
    till_date: DateTime<Utc>,
    num_persons: u32,
}
