use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::domain::event::errors::EventError;
use crate::domain::user::errors::UserError;

mod event;
pub mod postgres;
mod rows;
pub mod sqlite;
mod user;

pub use postgres::PostgresEventRepository;
pub use postgres::PostgresUserRepository;
pub use sqlite::SqliteEventRepository;
pub use sqlite::SqliteUserRepository;

/// Failure of a single store call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store call exceeded {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Database(e) => e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation()),
            StoreError::Timeout(_) => false,
        }
    }
}

/// Run a store call, giving up after `limit`.
pub(crate) async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => {
            tracing::warn!(timeout = ?limit, "Store call timed out");
            Err(StoreError::Timeout(limit))
        }
    }
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        UserError::StoreUnavailable(err.to_string())
    }
}

impl From<StoreError> for EventError {
    fn from(err: StoreError) -> Self {
        EventError::StoreUnavailable(err.to_string())
    }
}
