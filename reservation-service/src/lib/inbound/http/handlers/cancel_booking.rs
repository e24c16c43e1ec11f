use axum::extract::Path;
use axum::extract::State;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::booking::models::BookingId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn cancel_booking(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(booking_id): Path<String>,
) -> Result<ApiSuccess<CancelBookingResponseData>, ApiError> {
    let booking_id = BookingId::from_string(&booking_id).map_err(|_| ApiError::invalid_id())?;

    state
        .booking_service
        .cancel_booking(&booking_id, &user)
        .await?;

    Ok(ApiSuccess::ok(CancelBookingResponseData {
        msg: "updated".to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelBookingResponseData {
    pub msg: String,
}
