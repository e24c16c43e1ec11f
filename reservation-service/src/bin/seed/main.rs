use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;
use reservation_service::booking::models::NewBooking;
use reservation_service::booking::models::StayPeriod;
use reservation_service::booking::ports::BookingRepository;
use reservation_service::config::Config;
use reservation_service::hotel::models::NewHotel;
use reservation_service::hotel::models::NewRoom;
use reservation_service::hotel::models::RoomType;
use reservation_service::hotel::ports::HotelServicePort;
use reservation_service::hotel::service::HotelService;
use reservation_service::outbound::repositories::mongo;
use reservation_service::outbound::repositories::MongoRepositories;
use reservation_service::user::models::CreateUserCommand;
use reservation_service::user::models::EmailAddress;
use reservation_service::user::models::PersonName;
use reservation_service::user::models::PlainPassword;
use reservation_service::user::models::User;
use reservation_service::user::ports::UserServicePort;
use reservation_service::user::service::UserService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Reset the configured database and load a small fixture set: one guest,
/// one admin, one hotel with a single room, and a booking for the guest.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reservation_service=info,seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let deadline = config.database.timeout();

    let database = mongo::connect(&config.database).await?;
    mongo::drop_database(&database, deadline).await?;

    let repositories = MongoRepositories::new(&database, deadline);
    let users = Arc::new(repositories.users);
    let rooms = Arc::new(repositories.rooms);
    let bookings = repositories.bookings;

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl(),
    ));
    let user_service = UserService::new(users, authenticator.clone());
    let hotel_service = HotelService::new(Arc::new(repositories.hotels), rooms);

    let james = add_user(&user_service, "James", "Foo", false).await?;
    let alice = add_user(&user_service, "Alice", "Mclain", true).await?;

    let hotel = hotel_service
        .create_hotel(NewHotel {
            name: "Bellucia".to_string(),
            location: "France".to_string(),
            rating: 3,
        })
        .await?;
    let room = hotel_service
        .add_room(NewRoom {
            room_type: RoomType::Single,
            base_price: 99.99,
            price: 99.99,
            hotel_id: hotel.id,
        })
        .await?;

    let from = Utc::now() + Duration::days(1);
    let booking = bookings
        .insert(NewBooking {
            user_id: james.id,
            room_id: room.id,
            num_persons: 2,
            stay: StayPeriod::new(from, from + Duration::days(5))?,
        })
        .await?;

    tracing::info!(
        hotel_id = %hotel.id,
        room_id = %room.id,
        booking_id = %booking.id,
        "Fixtures loaded"
    );

    for user in [&james, &alice] {
        let issued = authenticator.issue_token(user.id, Some(user.email.to_string()))?;
        println!("{} ({}) -> {}", user.email, role(user), issued.token);
    }

    Ok(())
}

async fn add_user(
    service: &impl UserServicePort,
    first_name: &str,
    last_name: &str,
    is_admin: bool,
) -> Result<User, anyhow::Error> {
    let email = format!(
        "{}@{}.com",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    );
    let command = CreateUserCommand::guest(
        PersonName::new(first_name.to_string())?,
        PersonName::new(last_name.to_string())?,
        EmailAddress::new(email)?,
        PlainPassword::new(format!("{first_name}_{last_name}").to_lowercase())?,
    );
    let command = if is_admin { command.admin() } else { command };

    Ok(service.create_user(command).await?)
}

fn role(user: &User) -> &'static str {
    if user.is_admin {
        "admin"
    } else {
        "guest"
    }
}
