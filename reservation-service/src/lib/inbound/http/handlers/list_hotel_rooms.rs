use axum::extract::Path;
use axum::extract::State;

use super::ApiError;
use super::ApiSuccess;
use super::RoomData;
use crate::domain::hotel::models::HotelId;
use crate::inbound::http::router::AppState;

pub async fn list_hotel_rooms(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> Result<ApiSuccess<Vec<RoomData>>, ApiError> {
    let hotel_id = HotelId::from_string(&hotel_id).map_err(|_| ApiError::invalid_id())?;

    let rooms = state.hotel_service.list_rooms(&hotel_id).await?;

    Ok(ApiSuccess::ok(rooms.iter().map(RoomData::from).collect()))
}
