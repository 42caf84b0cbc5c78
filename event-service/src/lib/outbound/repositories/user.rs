//! User store shared by the SQL backends.
//!
//! Postgres and SQLite both accept `$n` placeholders, so a single body of
//! SQL serves each pool type.

/// Define a `UserRepository` named `$name` over the pool type `$pool`.
///
/// Expands to the imports the adapter needs, the struct and its trait impl.
macro_rules! user_repository {
    ($name:ident, $pool:ty) => {
        use ::chrono::Utc;

        use $crate::domain::user::errors::UserError;
        use $crate::domain::user::models::NewUser;
        use $crate::domain::user::models::User;
        use $crate::domain::user::models::UserChanges;
        use $crate::domain::user::models::UserId;
        use $crate::domain::user::models::Verification;
        use $crate::domain::user::ports::UserRepository;
        use $crate::outbound::repositories::rows::UserRow;
        use $crate::outbound::repositories::rows::USER_COLUMNS;
        use $crate::outbound::repositories::with_timeout;

        #[doc = concat!("Credential store backed by a [`", stringify!($pool), "`].")]
        pub struct $name {
            pool: $pool,
            timeout: ::std::time::Duration,
        }

        impl $name {
            pub fn new(pool: $pool, timeout: ::std::time::Duration) -> Self {
                Self { pool, timeout }
            }
        }

        #[::async_trait::async_trait]
        impl UserRepository for $name {
            async fn create(&self, user: NewUser) -> Result<User, UserError> {
                let verification = Verification::issue(Utc::now());
                let sql = format!(
                    r#"
                    INSERT INTO users (email, name, password_hash, role, verified, verify_token, verify_token_expires)
                    VALUES ($1, $2, $3, $4, FALSE, $5, $6)
                    RETURNING {}
                    "#,
                    USER_COLUMNS
                );

                let row = with_timeout(
                    self.timeout,
                    sqlx::query_as::<_, UserRow>(&sql)
                        .bind(user.email.as_str())
                        .bind(user.name.as_str())
                        .bind(&user.password_hash)
                        .bind(user.role.as_str())
                        .bind(&verification.token)
                        .bind(verification.expires_at)
                        .fetch_one(&self.pool),
                )
                .await
                .map_err(|e| {
                    if e.is_unique_violation() {
                        return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                    }
                    UserError::from(e)
                })?;

                User::try_from(row)
            }

            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
                let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

                with_timeout(
                    self.timeout,
                    sqlx::query_as::<_, UserRow>(&sql)
                        .bind(id.0)
                        .fetch_optional(&self.pool),
                )
                .await?
                .map(User::try_from)
                .transpose()
            }

            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
                let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

                with_timeout(
                    self.timeout,
                    sqlx::query_as::<_, UserRow>(&sql)
                        .bind(email)
                        .fetch_optional(&self.pool),
                )
                .await?
                .map(User::try_from)
                .transpose()
            }

            async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, UserError> {
                let sql = format!(
                    r#"
                    UPDATE users
                    SET name = COALESCE(NULLIF($1, ''), name),
                        password_hash = COALESCE(NULLIF($2, ''), password_hash)
                    WHERE id = $3
                    RETURNING {}
                    "#,
                    USER_COLUMNS
                );

                let row = with_timeout(
                    self.timeout,
                    sqlx::query_as::<_, UserRow>(&sql)
                        .bind(changes.name)
                        .bind(changes.password_hash)
                        .bind(id.0)
                        .fetch_optional(&self.pool),
                )
                .await?
                .ok_or(UserError::NotFound(id))?;

                User::try_from(row)
            }
        }
    };
}

pub(super) use user_repository;
