use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PlainPassword;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// HTTP request body for creating a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl CreateUserRequest {
    /// Validate every field and report all failures at once.
    fn try_into_command(self) -> Result<CreateUserCommand, ApiError> {
        let mut errors = BTreeMap::new();

        let first_name = PersonName::new(self.first_name)
            .map_err(|e| errors.insert("firstName".to_string(), format!("firstName {e}")))
            .ok();
        let last_name = PersonName::new(self.last_name)
            .map_err(|e| errors.insert("lastName".to_string(), format!("lastName {e}")))
            .ok();
        let password = PlainPassword::new(self.password)
            .map_err(|e| errors.insert("password".to_string(), format!("password {e}")))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| errors.insert("email".to_string(), e.to_string()))
            .ok();

        match (first_name, last_name, email, password) {
            (Some(first_name), Some(last_name), Some(email), Some(password)) => Ok(
                CreateUserCommand::guest(first_name, last_name, email, password),
            ),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}
