use axum::extract::Path;
use axum::extract::State;

use super::ApiError;
use super::ApiSuccess;
use super::Lookup;
use super::UserData;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// A missing user answers 200 with `{"error":"not found!"}`.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Lookup<UserData>>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|_| ApiError::invalid_id())?;

    match state.user_service.get_user(&user_id).await {
        Ok(ref user) => Ok(ApiSuccess::ok(Lookup::Found(user.into()))),
        Err(UserError::NotFound(_)) => Ok(ApiSuccess::ok(Lookup::missing())),
        Err(e) => Err(e.into()),
    }
}
