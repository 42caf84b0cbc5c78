use chrono::DateTime;
use chrono::Utc;

use crate::domain::event::errors::EventError;
use crate::domain::event::models::Attendee;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventDetails;
use crate::domain::event::models::EventId;
use crate::domain::event::models::EventOwner;
use crate::domain::user::errors::RoleError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Verification;

/// Columns selected for every user read. Both backends accept `$n` placeholders.
pub(super) const USER_COLUMNS: &str =
    "id, email, name, password_hash, role, verified, verify_token, verify_token_expires";

pub(super) const EVENT_SELECT: &str = r#"
    SELECT e.id, e.owner_id, e.name, e.description, e.date, e.location,
           u.email AS owner_email, u.name AS owner_name, u.role AS owner_role
    FROM events e
    JOIN users u ON u.id = e.owner_id
"#;

#[derive(Debug, sqlx::FromRow)]
pub(super) struct UserRow {
    id: i64,
    email: String,
    name: String,
    password_hash: String,
    role: String,
    verified: bool,
    verify_token: Option<String>,
    verify_token_expires: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let verification = match (row.verify_token, row.verify_token_expires) {
            (Some(token), Some(expires_at)) => Some(Verification { token, expires_at }),
            _ => None,
        };

        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            name: DisplayName::new(row.name)?,
            password_hash: row.password_hash,
            role: row.role.parse()?,
            verified: row.verified,
            verification,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct EventRow {
    id: i64,
    owner_id: i64,
    name: String,
    description: String,
    date: DateTime<Utc>,
    location: String,
    owner_email: String,
    owner_name: String,
    owner_role: String,
}

impl TryFrom<EventRow> for Event {
    type Error = EventError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let role = row
            .owner_role
            .parse()
            .map_err(|e: RoleError| EventError::Unknown(e.to_string()))?;

        Ok(Event {
            id: EventId(row.id),
            owner_id: UserId(row.owner_id),
            details: EventDetails::new(row.name, row.description, row.date, row.location)?,
            owner: Some(EventOwner {
                id: UserId(row.owner_id),
                email: row.owner_email,
                name: row.owner_name,
                role,
            }),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct AttendeeRow {
    id: i64,
    user_id: i64,
    event_id: i64,
}

impl From<AttendeeRow> for Attendee {
    fn from(row: AttendeeRow) -> Self {
        Attendee {
            id: row.id,
            user_id: UserId(row.user_id),
            event_id: EventId(row.event_id),
        }
    }
}

pub(super) fn users_from_rows(rows: Vec<UserRow>) -> Result<Vec<User>, UserError> {
    rows.into_iter().map(User::try_from).collect()
}

pub(super) fn events_from_rows(rows: Vec<EventRow>) -> Result<Vec<Event>, EventError> {
    rows.into_iter().map(Event::try_from).collect()
}
