use sqlx::SqlitePool;

use crate::outbound::repositories::user::user_repository;

user_repository!(SqliteUserRepository, SqlitePool);
