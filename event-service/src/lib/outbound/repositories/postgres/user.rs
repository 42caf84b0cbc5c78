use sqlx::PgPool;

use crate::outbound::repositories::user::user_repository;

user_repository!(PostgresUserRepository, PgPool);
