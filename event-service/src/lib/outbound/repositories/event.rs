//! Event and attendee store shared by the SQL backends.

/// Define an `EventRepository` named `$name` over the pool type `$pool`.
///
/// Expands to the imports the adapter needs, the struct and its trait impl.
macro_rules! event_repository {
    ($name:ident, $pool:ty) => {
        use $crate::domain::event::errors::EventError;
        use $crate::domain::event::models::Attendee;
        use $crate::domain::event::models::Event;
        use $crate::domain::event::models::EventDetails;
        use $crate::domain::event::models::EventId;
        use $crate::domain::event::models::NewEvent;
        use $crate::domain::event::ports::EventRepository;
        use $crate::domain::user::models::User;
        use $crate::domain::user::models::UserId;
        use $crate::outbound::repositories::rows::events_from_rows;
        use $crate::outbound::repositories::rows::users_from_rows;
        use $crate::outbound::repositories::rows::AttendeeRow;
        use $crate::outbound::repositories::rows::EventRow;
        use $crate::outbound::repositories::rows::UserRow;
        use $crate::outbound::repositories::rows::EVENT_SELECT;
        use $crate::outbound::repositories::with_timeout;

        #[doc = concat!("Event store backed by a [`", stringify!($pool), "`].")]
        pub struct $name {
            pool: $pool,
            timeout: ::std::time::Duration,
        }

        impl $name {
            pub fn new(pool: $pool, timeout: ::std::time::Duration) -> Self {
                Self { pool, timeout }
            }

            async fn fetch(&self, id: EventId) -> Result<Event, EventError> {
                self.find_by_id(id).await?.ok_or(EventError::NotFound(id))
            }
        }

        #[::async_trait::async_trait]
        impl EventRepository for $name {
            async fn create(&self, event: NewEvent) -> Result<Event, EventError> {
                let (id,) = with_timeout(
                    self.timeout,
                    sqlx::query_as::<_, (i64,)>(
                        r#"
                        INSERT INTO events (owner_id, name, description, date, location)
                        VALUES ($1, $2, $3, $4, $5)
                        RETURNING id
                        "#,
                    )
                    .bind(event.owner_id.0)
                    .bind(event.details.name())
                    .bind(event.details.description())
                    .bind(event.details.date())
                    .bind(event.details.location())
                    .fetch_one(&self.pool),
                )
                .await?;

                self.fetch(EventId(id)).await
            }

            async fn list_all(&self) -> Result<Vec<Event>, EventError> {
                let sql = format!("{} ORDER BY e.date, e.id", EVENT_SELECT);

                let rows = with_timeout(
                    self.timeout,
                    sqlx::query_as::<_, EventRow>(&sql).fetch_all(&self.pool),
                )
                .await?;

                events_from_rows(rows)
            }

            async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, EventError> {
                let sql = format!("{} WHERE e.id = $1", EVENT_SELECT);

                with_timeout(
                    self.timeout,
                    sqlx::query_as::<_, EventRow>(&sql)
                        .bind(id.0)
                        .fetch_optional(&self.pool),
                )
                .await?
                .map(Event::try_from)
                .transpose()
            }

            async fn update(&self, id: EventId, details: EventDetails) -> Result<Event, EventError> {
                let result = with_timeout(
                    self.timeout,
                    sqlx::query(
                        r#"
                        UPDATE events
                        SET name = $1, description = $2, date = $3, location = $4
                        WHERE id = $5
                        "#,
                    )
                    .bind(details.name())
                    .bind(details.description())
                    .bind(details.date())
                    .bind(details.location())
                    .bind(id.0)
                    .execute(&self.pool),
                )
                .await?;

                if result.rows_affected() == 0 {
                    return Err(EventError::NotFound(id));
                }

                self.fetch(id).await
            }

            async fn delete(&self, id: EventId) -> Result<(), EventError> {
                let result = with_timeout(
                    self.timeout,
                    sqlx::query("DELETE FROM events WHERE id = $1")
                        .bind(id.0)
                        .execute(&self.pool),
                )
                .await?;

                if result.rows_affected() == 0 {
                    return Err(EventError::NotFound(id));
                }

                Ok(())
            }

            async fn add_attendee(
                &self,
                event_id: EventId,
                user_id: UserId,
            ) -> Result<Attendee, EventError> {
                let row = with_timeout(
                    self.timeout,
                    sqlx::query_as::<_, AttendeeRow>(
                        r#"
                        INSERT INTO attendees (user_id, event_id)
                        VALUES ($1, $2)
                        RETURNING id, user_id, event_id
                        "#,
                    )
                    .bind(user_id.0)
                    .bind(event_id.0)
                    .fetch_one(&self.pool),
                )
                .await
                .map_err(|e| {
                    if e.is_unique_violation() {
                        return EventError::AttendeeAlreadyExists { user_id, event_id };
                    }
                    EventError::from(e)
                })?;

                Ok(Attendee::from(row))
            }

            async fn remove_attendee(
                &self,
                event_id: EventId,
                user_id: UserId,
            ) -> Result<(), EventError> {
                with_timeout(
                    self.timeout,
                    sqlx::query("DELETE FROM attendees WHERE event_id = $1 AND user_id = $2")
                        .bind(event_id.0)
                        .bind(user_id.0)
                        .execute(&self.pool),
                )
                .await?;

                Ok(())
            }

            async fn list_attendees(&self, event_id: EventId) -> Result<Vec<User>, EventError> {
                let rows = with_timeout(
                    self.timeout,
                    sqlx::query_as::<_, UserRow>(
                        r#"
                        SELECT u.id, u.email, u.name, u.password_hash, u.role, u.verified,
                               u.verify_token, u.verify_token_expires
                        FROM users u
                        JOIN attendees a ON a.user_id = u.id
                        WHERE a.event_id = $1
                        ORDER BY a.id
                        "#,
                    )
                    .bind(event_id.0)
                    .fetch_all(&self.pool),
                )
                .await?;

                Ok(users_from_rows(rows)?)
            }

            async fn list_events_by_attendee(&self, user_id: UserId) -> Result<Vec<Event>, EventError> {
                let sql = format!(
                    "{} JOIN attendees a ON a.event_id = e.id WHERE a.user_id = $1 ORDER BY e.date, e.id",
                    EVENT_SELECT
                );

                let rows = with_timeout(
                    self.timeout,
                    sqlx::query_as::<_, EventRow>(&sql)
                        .bind(user_id.0)
                        .fetch_all(&self.pool),
                )
                .await?;

                events_from_rows(rows)
            }
        }
    };
}

pub(super) use event_repository;
