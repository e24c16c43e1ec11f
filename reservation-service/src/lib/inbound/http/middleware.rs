use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Header carrying the bearer token.
pub const TOKEN_HEADER: &str = "X-Api-Token";

/// User resolved from the request token, stored in request extensions by
/// [`authenticate`] and extracted by handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| unauthorized("unauthorized"))
    }
}

/// Middleware that resolves the `X-Api-Token` header to a stored user.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?.to_owned();

    let user = state.auth_service.identify(&token).await.map_err(|e| {
        tracing::warn!(error = %e, "Token rejected");
        ApiError::from(e).into_response()
    })?;

    tracing::debug!(user_id = %user.id, is_admin = user.is_admin, "Request authenticated");
    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

/// Middleware for admin-only routes. Must run after [`authenticate`].
pub async fn require_admin(
    AuthenticatedUser(user): AuthenticatedUser,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    if !user.is_admin {
        tracing::warn!(user_id = %user.id, uri = %req.uri(), "Admin route refused");
        return Err(ApiError::Forbidden("Forbidden".to_string()).into_response());
    }

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let header = req
        .headers()
        .get(TOKEN_HEADER)
        .ok_or_else(|| unauthorized("unauthorized"))?;

    let token = header
        .to_str()
        .map_err(|_| unauthorized("Invalid X-Api-Token header"))?;

    if token.is_empty() {
        return Err(unauthorized("unauthorized"));
    }

    Ok(token)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}
