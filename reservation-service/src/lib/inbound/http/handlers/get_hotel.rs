use axum::extract::Path;
use axum::extract::State;

use super::ApiError;
use super::ApiSuccess;
use super::HotelData;
use super::Lookup;
use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::HotelId;
use crate::inbound::http::router::AppState;

/// A missing hotel answers 200 with `{"error":"not found!"}`.
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> Result<ApiSuccess<Lookup<HotelData>>, ApiError> {
    let hotel_id = HotelId::from_string(&hotel_id).map_err(|_| ApiError::invalid_id())?;

    match state.hotel_service.get_hotel(&hotel_id).await {
        Ok(ref hotel) => Ok(ApiSuccess::ok(Lookup::Found(hotel.into()))),
        Err(HotelError::NotFound { .. }) => Ok(ApiSuccess::ok(Lookup::missing())),
        Err(e) => Err(e.into()),
    }
}
