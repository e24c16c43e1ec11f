use axum::extract::State;

use super::ApiError;
use super::ApiSuccess;
use super::BookingData;
use crate::domain::booking::models::BookingFilter;
use crate::inbound::http::router::AppState;

/// Admin listing of every booking, cancelled ones included.
pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<BookingData>>, ApiError> {
    let bookings = state
        .booking_service
        .list_bookings(&BookingFilter::default())
        .await?;

    Ok(ApiSuccess::ok(bookings.iter().map(BookingData::from).collect()))
}
