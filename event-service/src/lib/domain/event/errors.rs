use thiserror::Error;

use crate::domain::event::models::EventId;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;

/// Error type for EventId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventIdError {
    #[error("Invalid event id: {0}")]
    InvalidFormat(String),
}

/// Error type for event field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventDetailsError {
    #[error("Event name too short: minimum {min} characters")]
    NameTooShort { min: usize },

    #[error("Event description too short: minimum {min} characters")]
    DescriptionTooShort { min: usize },

    #[error("Event location too short: minimum {min} characters")]
    LocationTooShort { min: usize },
}

/// Top-level error type for all event and attendee operations
#[derive(Debug, Clone, Error)]
pub enum EventError {
    #[error("Invalid event ID: {0}")]
    InvalidEventId(#[from] EventIdError),

    #[error("Invalid event: {0}")]
    InvalidDetails(#[from] EventDetailsError),

    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("User {user_id} does not own event {event_id}")]
    NotOwner { user_id: UserId, event_id: EventId },

    #[error("User {user_id} already attends event {event_id}")]
    AttendeeAlreadyExists { user_id: UserId, event_id: EventId },

    // Infrastructure errors
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for EventError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => EventError::UserNotFound(id),
            UserError::StoreUnavailable(msg) => EventError::StoreUnavailable(msg),
            other => EventError::Unknown(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for EventError {
    fn from(err: anyhow::Error) -> Self {
        EventError::Unknown(err.to_string())
    }
}
