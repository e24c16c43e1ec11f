#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use chrono::DateTime;
use chrono::Utc;
use reservation_service::booking::models::Booking;
use reservation_service::booking::models::NewBooking;
use reservation_service::booking::models::StayPeriod;
use reservation_service::booking::ports::BookingRepository;
use reservation_service::hotel::models::Hotel;
use reservation_service::hotel::models::NewHotel;
use reservation_service::hotel::models::NewRoom;
use reservation_service::hotel::models::Room;
use reservation_service::hotel::models::RoomType;
use reservation_service::hotel::ports::HotelRepository;
use reservation_service::hotel::ports::RoomRepository;
use reservation_service::inbound::http::middleware::TOKEN_HEADER;
use reservation_service::inbound::http::router::create_router;
use reservation_service::inbound::http::router::AppState;
use reservation_service::outbound::repositories::InMemoryStore;
use reservation_service::user::models::EmailAddress;
use reservation_service::user::models::NewUser;
use reservation_service::user::models::PersonName;
use reservation_service::user::models::User;
use reservation_service::user::ports::UserRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryStore>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::new());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, chrono::Duration::hours(3)));

        let state = AppState::from_repositories(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            authenticator.clone(),
        );
        let router = create_router(state, Duration::from_secs(10));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with the token header
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(TOKEN_HEADER, token)
    }

    /// Helper to make POST request with the token header
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).header(TOKEN_HEADER, token)
    }

    /// Helper to make PUT request with the token header
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .header(TOKEN_HEADER, token)
    }

    /// Helper to make DELETE request with the token header
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .header(TOKEN_HEADER, token)
    }

    /// Store a user whose email is `first@last.com` and whose password is
    /// `first_last`, both lowercased.
    pub async fn add_user(&self, first_name: &str, last_name: &str, is_admin: bool) -> User {
        let password = Self::password_of(first_name, last_name);
        let email = format!(
            "{}@{}.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        );

        UserRepository::insert(
            &*self.store,
            NewUser {
                first_name: PersonName::new(first_name.to_string()).unwrap(),
                last_name: PersonName::new(last_name.to_string()).unwrap(),
                email: EmailAddress::new(email).unwrap(),
                password_hash: self.authenticator.hash_password(&password).unwrap(),
                is_admin,
            },
        )
        .await
        .expect("Failed to insert user")
    }

    pub fn password_of(first_name: &str, last_name: &str) -> String {
        format!("{first_name}_{last_name}").to_lowercase()
    }

    pub async fn add_hotel(&self, name: &str, location: &str, rating: i32) -> Hotel {
        HotelRepository::insert(
            &*self.store,
            NewHotel {
                name: name.to_string(),
                location: location.to_string(),
                rating,
            },
        )
        .await
        .expect("Failed to insert hotel")
    }

    pub async fn add_room(&self, hotel: &Hotel, room_type: RoomType, price: f64) -> Room {
        RoomRepository::insert(
            &*self.store,
            NewRoom {
                room_type,
                base_price: price,
                price,
                hotel_id: hotel.id,
            },
        )
        .await
        .expect("Failed to insert room")
    }

    pub async fn add_booking(
        &self,
        user: &User,
        room: &Room,
        from: DateTime<Utc>,
        till: DateTime<Utc>,
    ) -> Booking {
        BookingRepository::insert(
            &*self.store,
            NewBooking {
                user_id: user.id,
                room_id: room.id,
                num_persons: 2,
                stay: StayPeriod::new(from, till).expect("Invalid stay period"),
            },
        )
        .await
        .expect("Failed to insert booking")
    }

    /// Issue a valid token for a stored user.
    pub fn token_for(&self, user: &User) -> String {
        self.authenticator
            .issue_token(user.id, Some(user.email.to_string()))
            .expect("Failed to issue token")
            .token
    }
}
