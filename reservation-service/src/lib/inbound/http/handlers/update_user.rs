use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Only non-empty `firstName`/`lastName` values are applied.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UpdateUserResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|_| ApiError::invalid_id())?;
    let Json(body) = body?;

    state
        .user_service
        .update_user(&user_id, body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::ok(UpdateUserResponseData {
        updated: user_id.to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, ApiError> {
        let mut errors = BTreeMap::new();
        let mut command = UpdateUserCommand::default();

        if !self.first_name.is_empty() {
            match PersonName::new(self.first_name) {
                Ok(name) => command.first_name = Some(name),
                Err(e) => {
                    errors.insert("firstName".to_string(), format!("firstName {e}"));
                }
            }
        }
        if !self.last_name.is_empty() {
            match PersonName::new(self.last_name) {
                Ok(name) => command.last_name = Some(name),
                Err(e) => {
                    errors.insert("lastName".to_string(), format!("lastName {e}"));
                }
            }
        }

        if errors.is_empty() {
            Ok(command)
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateUserResponseData {
    #[serde(rename = "Updated")]
    pub updated: String,
}
