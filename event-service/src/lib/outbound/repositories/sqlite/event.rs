use sqlx::SqlitePool;

use crate::outbound::repositories::event::event_repository;

event_repository!(SqliteEventRepository, SqlitePool);
