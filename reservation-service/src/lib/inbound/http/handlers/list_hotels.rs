use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::HotelData;
use crate::domain::hotel::models::HotelFilter;
use crate::domain::hotel::models::Pagination;
use crate::inbound::http::router::AppState;

/// `GET /hotels?rating=&page=&limit=`
pub async fn list_hotels(
    State(state): State<AppState>,
    query: Result<Query<HotelQueryParams>, QueryRejection>,
) -> Result<ApiSuccess<HotelPage>, ApiError> {
    let Query(params) = query?;
    let filter = HotelFilter {
        rating: params.rating,
    };
    let pagination = Pagination::new(params.page, params.limit);

    let hotels = state
        .hotel_service
        .list_hotels(&filter, &pagination)
        .await?;

    Ok(ApiSuccess::ok(HotelPage {
        results: hotels.len(),
        data: hotels.iter().map(HotelData::from).collect(),
        page: pagination.page(),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HotelQueryParams {
    rating: Option<i32>,
    page: Option<u64>,
    limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelPage {
    pub results: usize,
    pub data: Vec<HotelData>,
    pub page: u64,
}
