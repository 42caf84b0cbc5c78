use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

mod event;
mod user;

pub use event::PostgresEventRepository;
pub use user::PostgresUserRepository;

/// Open the pool and bring the schema up to date.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.query_timeout())
        .connect(&config.url)
        .await?;
    tracing::info!(
        max_connections = config.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations/postgres").run(&pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    Ok(pool)
}
