use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::book_room::book_room;
use super::handlers::cancel_booking::cancel_booking;
use super::handlers::create_user::create_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_booking::get_booking;
use super::handlers::get_hotel::get_hotel;
use super::handlers::get_user::get_user;
use super::handlers::list_bookings::list_bookings;
use super::handlers::list_hotel_rooms::list_hotel_rooms;
use super::handlers::list_hotels::list_hotels;
use super::handlers::list_users::list_users;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::service::AuthService;
use crate::domain::booking::ports::BookingRepository;
use crate::domain::booking::ports::BookingServicePort;
use crate::domain::booking::service::BookingService;
use crate::domain::hotel::ports::HotelRepository;
use crate::domain::hotel::ports::HotelServicePort;
use crate::domain::hotel::ports::RoomRepository;
use crate::domain::hotel::service::HotelService;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub hotel_service: Arc<dyn HotelServicePort>,
    pub booking_service: Arc<dyn BookingServicePort>,
}

impl AppState {
    /// Wire every domain service over the given record stores.
    pub fn from_repositories<UR, HR, RR, BR>(
        users: Arc<UR>,
        hotels: Arc<HR>,
        rooms: Arc<RR>,
        bookings: Arc<BR>,
        authenticator: Arc<Authenticator>,
    ) -> Self
    where
        UR: UserRepository,
        HR: HotelRepository,
        RR: RoomRepository,
        BR: BookingRepository,
    {
        Self {
            auth_service: Arc::new(AuthService::new(users.clone(), authenticator.clone())),
            user_service: Arc::new(UserService::new(users, authenticator)),
            hotel_service: Arc::new(HotelService::new(hotels, rooms.clone())),
            booking_service: Arc::new(BookingService::new(bookings, rooms)),
        }
    }
}

pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let public_routes = Router::new().route("/api/auth", post(authenticate));

    let admin_routes = Router::new()
        .route("/api/v1/admin/bookings", get(list_bookings))
        .route("/api/v1/admin/bookings/:booking_id", delete(cancel_booking))
        .route_layer(middleware::from_fn(require_admin));

    let protected_routes = Router::new()
        .route("/api/v1/users", get(list_users).post(create_user))
        .route(
            "/api/v1/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/v1/hotels", get(list_hotels))
        .route("/api/v1/hotels/:hotel_id", get(get_hotel))
        .route("/api/v1/hotels/:hotel_id/rooms", get(list_hotel_rooms))
        .route("/api/v1/room/:room_id/book", post(book_room))
        .route("/api/v1/bookings/:booking_id", get(get_booking))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::inbound::http::middleware::TOKEN_HEADER;
    use crate::outbound::repositories::InMemoryStore;

    fn router() -> Router {
        let store = Arc::new(InMemoryStore::new());
        let authenticator = Arc::new(Authenticator::new(
            b"router_test_secret_at_least_32_bytes",
            chrono::Duration::hours(3),
        ));
        let state = AppState::from_repositories(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            authenticator,
        );
        create_router(state, Duration::from_secs(5))
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_protected_routes_need_token() {
        for uri in ["/api/v1/users", "/api/v1/hotels", "/api/v1/admin/bookings"] {
            let response = router()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/hotels")
                    .header(TOKEN_HEADER, "not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_with_malformed_body() {
        let response = router()
            .oneshot(
                Request::post("/api/auth")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "status": 400, "msg": "Bad Request" })
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = router()
            .oneshot(Request::get("/api/v2/anything").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
