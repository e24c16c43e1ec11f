use axum::extract::Path;
use axum::extract::State;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<DeleteUserResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|_| ApiError::invalid_id())?;

    state.user_service.delete_user(&user_id).await?;

    Ok(ApiSuccess::ok(DeleteUserResponseData {
        deleted: user_id.to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteUserResponseData {
    #[serde(rename = "Deleted")]
    pub deleted: String,
}
