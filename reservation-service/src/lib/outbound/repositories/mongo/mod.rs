mod booking;
mod documents;
mod hotel;
mod room;
mod user;

use std::future::Future;
use std::time::Duration;

use mongodb::options::ClientOptions;
use mongodb::Client;
use mongodb::Database;

pub use booking::MongoBookingRepository;
pub use hotel::MongoHotelRepository;
pub use room::MongoRoomRepository;
pub use user::MongoUserRepository;

use crate::config::DatabaseConfig;
use crate::domain::errors::StoreError;

/// Open a client for `config.url` and select `config.name`.
///
/// The client connects lazily; the first store operation reports an
/// unreachable server as a timeout or database error.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, StoreError> {
    let mut options = ClientOptions::parse(&config.url)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;
    options.app_name = Some("reservation-service".to_string());
    options.server_selection_timeout = Some(config.timeout());
    options.connect_timeout = Some(config.timeout());

    let client = Client::with_options(options).map_err(|e| StoreError::Database(e.to_string()))?;

    tracing::info!(database = %config.name, "MongoDB client configured");
    Ok(client.database(&config.name))
}

/// Run one driver call under `deadline`.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, StoreError>
where
    F: Future<Output = mongodb::error::Result<T>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result.map_err(|e| StoreError::Database(e.to_string())),
        Err(_) => Err(StoreError::Timeout(deadline)),
    }
}

/// The four MongoDB-backed record stores sharing one database handle.
pub struct MongoRepositories {
    pub users: MongoUserRepository,
    pub hotels: MongoHotelRepository,
    pub rooms: MongoRoomRepository,
    pub bookings: MongoBookingRepository,
}

impl MongoRepositories {
    pub fn new(database: &Database, deadline: Duration) -> Self {
        Self {
            users: MongoUserRepository::new(database, deadline),
            hotels: MongoHotelRepository::new(database, deadline),
            rooms: MongoRoomRepository::new(database, deadline),
            bookings: MongoBookingRepository::new(database, deadline),
        }
    }
}

/// Drop the whole database, every collection included.
pub async fn drop_database(database: &Database, deadline: Duration) -> Result<(), StoreError> {
    with_deadline(deadline, database.drop(None)).await?;
    tracing::info!(database = %database.name(), "Database dropped");
    Ok(())
}
