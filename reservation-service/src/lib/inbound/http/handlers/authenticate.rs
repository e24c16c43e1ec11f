use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::auth::models::Credentials;
use crate::inbound::http::router::AppState;

/// `POST /api/auth`. Every failure, a malformed body included, answers
/// with the same 400 body.
pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::InvalidCredentials)?;

    let session = state
        .auth_service
        .authenticate(&Credentials {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(ApiSuccess::ok(AuthenticateResponseData {
        user: (&session.user).into(),
        token: session.token,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub user: UserData,
    pub token: String,
}
