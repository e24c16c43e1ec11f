//! Round trips against a live MongoDB. Run with
//! `MONGODB_URL=mongodb://127.0.0.1:27017 cargo test -- --ignored`.

use std::time::Duration;

use chrono::Utc;
use mongodb::Database;
use reservation_service::booking::models::BookingChanges;
use reservation_service::booking::models::BookingFilter;
use reservation_service::booking::models::NewBooking;
use reservation_service::booking::models::StayPeriod;
use reservation_service::booking::ports::BookingRepository;
use reservation_service::config::DatabaseConfig;
use reservation_service::domain::errors::StoreError;
use reservation_service::hotel::models::HotelFilter;
use reservation_service::hotel::models::NewHotel;
use reservation_service::hotel::models::NewRoom;
use reservation_service::hotel::models::Pagination;
use reservation_service::hotel::models::RoomFilter;
use reservation_service::hotel::models::RoomType;
use reservation_service::hotel::ports::HotelRepository;
use reservation_service::hotel::ports::RoomRepository;
use reservation_service::outbound::repositories::mongo;
use reservation_service::outbound::repositories::MongoRepositories;
use reservation_service::user::models::EmailAddress;
use reservation_service::user::models::NewUser;
use reservation_service::user::models::PersonName;
use reservation_service::user::models::UpdateUserCommand;
use reservation_service::user::ports::UserRepository;

const DEADLINE: Duration = Duration::from_secs(5);

/// Throwaway database with a unique name, dropped at the end of each test
struct TestDb {
    database: Database,
    repositories: MongoRepositories,
}

impl TestDb {
    async fn new() -> Self {
        let config = DatabaseConfig {
            url: std::env::var("MONGODB_URL")
                .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string()),
            name: format!("reservation_test_{}", uuid::Uuid::new_v4().simple()),
            timeout_ms: DEADLINE.as_millis() as u64,
            in_memory: false,
        };

        let database = mongo::connect(&config)
            .await
            .expect("Failed to configure MongoDB client");
        let repositories = MongoRepositories::new(&database, DEADLINE);

        Self {
            database,
            repositories,
        }
    }

    async fn cleanup(self) {
        mongo::drop_database(&self.database, DEADLINE)
            .await
            .expect("Failed to drop test database");
    }
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: PersonName::new("James".to_string()).unwrap(),
        last_name: PersonName::new("Foo".to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$stub".to_string(),
        is_admin: false,
    }
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_user_round_trip() {
    let db = TestDb::new().await;
    let users = &db.repositories.users;

    let user = users.insert(new_user("james@foo.com")).await.unwrap();
    assert_eq!(users.find_by_id(&user.id).await.unwrap(), user);

    let by_email = users
        .find_by_email(&EmailAddress::new("james@foo.com".to_string()).unwrap())
        .await
        .unwrap();
    assert_eq!(by_email, Some(user.clone()));

    users
        .update_by_id(
            &user.id,
            &UpdateUserCommand {
                first_name: Some(PersonName::new("Jimmy".to_string()).unwrap()),
                last_name: None,
            },
        )
        .await
        .unwrap();
    let updated = users.find_by_id(&user.id).await.unwrap();
    assert_eq!(updated.first_name.as_str(), "Jimmy");
    assert_eq!(updated.last_name.as_str(), "Foo");

    users.delete_by_id(&user.id).await.unwrap();
    assert!(matches!(
        users.find_by_id(&user.id).await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        users.delete_by_id(&user.id).await,
        Err(StoreError::NotFound { .. })
    ));

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_room_insert_links_hotel() {
    let db = TestDb::new().await;
    let hotels = &db.repositories.hotels;
    let rooms = &db.repositories.rooms;

    let hotel = hotels
        .insert(NewHotel {
            name: "Bellucia".to_string(),
            location: "France".to_string(),
            rating: 3,
        })
        .await
        .unwrap();
    let room = rooms
        .insert(NewRoom {
            room_type: RoomType::Double,
            base_price: 149.0,
            price: 149.0,
            hotel_id: hotel.id,
        })
        .await
        .unwrap();

    let stored = hotels.find_by_id(&hotel.id).await.unwrap();
    assert_eq!(stored.rooms, vec![room.id]);

    let listed = rooms.find_all(&RoomFilter::for_hotel(hotel.id)).await.unwrap();
    assert_eq!(listed, vec![room]);

    let page = hotels
        .find_all(&HotelFilter { rating: Some(3) }, &Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.len(), 1);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_booking_filters() {
    let db = TestDb::new().await;
    let users = &db.repositories.users;
    let hotels = &db.repositories.hotels;
    let rooms = &db.repositories.rooms;
    let bookings = &db.repositories.bookings;

    let user = users.insert(new_user("james@foo.com")).await.unwrap();
    let hotel = hotels
        .insert(NewHotel {
            name: "Bellucia".to_string(),
            location: "France".to_string(),
            rating: 3,
        })
        .await
        .unwrap();
    let room = rooms
        .insert(NewRoom {
            room_type: RoomType::Single,
            base_price: 99.99,
            price: 99.99,
            hotel_id: hotel.id,
        })
        .await
        .unwrap();

    let from = Utc::now() + chrono::Duration::days(1) + chrono::Duration::nanoseconds(777);
    let booking = bookings
        .insert(NewBooking {
            user_id: user.id,
            room_id: room.id,
            num_persons: 2,
            stay: StayPeriod::new(from, from + chrono::Duration::days(3)).unwrap(),
        })
        .await
        .unwrap();

    // Inserted value and stored document agree to the millisecond
    assert_eq!(bookings.find_by_id(&booking.id).await.unwrap(), booking);

    let active = bookings
        .find_all(&BookingFilter::for_room(room.id).active_only())
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, booking.id);

    bookings
        .update_by_id(
            &booking.id,
            &BookingChanges {
                cancelled_at: Some(Utc::now()),
            },
        )
        .await
        .unwrap();

    let active = bookings
        .find_all(&BookingFilter::for_room(room.id).active_only())
        .await
        .unwrap();
    assert!(active.is_empty());

    let all = bookings
        .find_all(&BookingFilter::for_user(user.id))
        .await
        .unwrap();
    assert!(all[0].is_cancelled());

    db.cleanup().await;
}
