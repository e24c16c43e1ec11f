use std::sync::Arc;

use auth::Authenticator;
use reservation_service::config::Config;
use reservation_service::inbound::http::router::create_router;
use reservation_service::inbound::http::router::AppState;
use reservation_service::outbound::repositories::mongo;
use reservation_service::outbound::repositories::InMemoryStore;
use reservation_service::outbound::repositories::MongoRepositories;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reservation_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "reservation-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        database_name = %config.database.name,
        in_memory = config.database.in_memory,
        http_port = config.server.http_port,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl(),
    ));

    let state = if config.database.in_memory {
        let store = Arc::new(InMemoryStore::new());
        tracing::warn!("Using in-memory store, nothing will be persisted");
        AppState::from_repositories(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            authenticator,
        )
    } else {
        let database = mongo::connect(&config.database).await?;
        let repositories = MongoRepositories::new(&database, config.database.timeout());
        tracing::info!(
            database = "mongodb",
            timeout_ms = config.database.timeout_ms,
            "Record stores ready"
        );
        AppState::from_repositories(
            Arc::new(repositories.users),
            Arc::new(repositories.hotels),
            Arc::new(repositories.rooms),
            Arc::new(repositories.bookings),
            authenticator,
        )
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, config.server.request_timeout());
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");
    Ok(())
}
