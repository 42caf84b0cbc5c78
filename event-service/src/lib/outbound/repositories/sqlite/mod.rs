use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;

mod event;
mod user;

pub use event::SqliteEventRepository;
pub use user::SqliteUserRepository;

/// Open the pool and bring the schema up to date.
///
/// An in-memory database lives only as long as its connection, so the pool
/// is pinned to a single connection that never expires.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, anyhow::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = config.url.contains(":memory:");
    let mut pool_options = SqlitePoolOptions::new().acquire_timeout(config.query_timeout());
    pool_options = if in_memory {
        pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!(in_memory, database = "sqlite", "Database connection pool created");

    sqlx::migrate!("./migrations/sqlite").run(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    Ok(pool)
}
