use sqlx::PgPool;

use crate::outbound::repositories::event::event_repository;

event_repository!(PostgresEventRepository, PgPool);
