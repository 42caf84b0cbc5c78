use std::sync::Arc;

use auth::Authenticator;
use event_service::config::Config;
use event_service::config::DatabaseDriver;
use event_service::domain::event::ports::EventServicePort;
use event_service::domain::event::service::EventService;
use event_service::domain::user::ports::UserServicePort;
use event_service::domain::user::service::UserService;
use event_service::inbound::http::router::create_router;
use event_service::outbound::repositories::postgres;
use event_service::outbound::repositories::sqlite;
use event_service::outbound::repositories::PostgresEventRepository;
use event_service::outbound::repositories::PostgresUserRepository;
use event_service::outbound::repositories::SqliteEventRepository;
use event_service::outbound::repositories::SqliteUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "event-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        driver = ?config.database.driver,
        http_port = config.server.http_port,
        query_timeout_secs = config.database.query_timeout_secs,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let timeout = config.database.query_timeout();
    let (user_service, event_service): (Arc<dyn UserServicePort>, Arc<dyn EventServicePort>) =
        match config.database.driver {
            DatabaseDriver::Postgres => {
                let pool = postgres::connect(&config.database).await?;
                let users = Arc::new(PostgresUserRepository::new(pool.clone(), timeout));
                let events = Arc::new(PostgresEventRepository::new(pool, timeout));
                (
                    Arc::new(UserService::new(Arc::clone(&users))),
                    Arc::new(EventService::new(events, users)),
                )
            }
            DatabaseDriver::Sqlite => {
                let pool = sqlite::connect(&config.database).await?;
                let users = Arc::new(SqliteUserRepository::new(pool.clone(), timeout));
                let events = Arc::new(SqliteEventRepository::new(pool, timeout));
                (
                    Arc::new(UserService::new(Arc::clone(&users))),
                    Arc::new(EventService::new(events, users)),
                )
            }
        };

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes())?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        event_service,
        authenticator,
        config.jwt.expiration_hours,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
