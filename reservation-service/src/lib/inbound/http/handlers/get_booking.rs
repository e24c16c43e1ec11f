use axum::extract::Path;
use axum::extract::State;

use super::ApiError;
use super::ApiSuccess;
use super::BookingData;
use crate::domain::booking::models::BookingId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Readable by the booking's owner and by admins.
pub async fn get_booking(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(booking_id): Path<String>,
) -> Result<ApiSuccess<BookingData>, ApiError> {
    let booking_id = BookingId::from_string(&booking_id).map_err(|_| ApiError::invalid_id())?;

    let booking = state
        .booking_service
        .get_booking(&booking_id, &user)
        .await?;

    Ok(ApiSuccess::ok((&booking).into()))
}
