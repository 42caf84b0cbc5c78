use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::event::errors::EventDetailsError;
use crate::domain::event::errors::EventIdError;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Event aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub owner_id: UserId,
    pub details: EventDetails,
    pub owner: Option<EventOwner>,
}

impl Event {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// Event unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(pub i64);

impl EventId {
    pub fn from_string(s: &str) -> Result<Self, EventIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(EventId(id)),
            _ => Err(EventIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public summary of an event's owner, joined from the users table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOwner {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Validated, owner-editable fields of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    name: String,
    description: String,
    date: DateTime<Utc>,
    location: String,
}

impl EventDetails {
    const MIN_NAME_LENGTH: usize = 3;
    const MIN_DESCRIPTION_LENGTH: usize = 10;
    const MIN_LOCATION_LENGTH: usize = 3;

    /// Validate event fields.
    ///
    /// # Errors
    /// * `NameTooShort` - Name shorter than 3 characters
    /// * `DescriptionTooShort` - Description shorter than 10 characters
    /// * `LocationTooShort` - Location shorter than 3 characters
    pub fn new(
        name: String,
        description: String,
        date: DateTime<Utc>,
        location: String,
    ) -> Result<Self, EventDetailsError> {
        if name.chars().count() < Self::MIN_NAME_LENGTH {
            return Err(EventDetailsError::NameTooShort {
                min: Self::MIN_NAME_LENGTH,
            });
        }
        if description.chars().count() < Self::MIN_DESCRIPTION_LENGTH {
            return Err(EventDetailsError::DescriptionTooShort {
                min: Self::MIN_DESCRIPTION_LENGTH,
            });
        }
        if location.chars().count() < Self::MIN_LOCATION_LENGTH {
            return Err(EventDetailsError::LocationTooShort {
                min: Self::MIN_LOCATION_LENGTH,
            });
        }

        Ok(Self {
            name,
            description,
            date,
            location,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Event draft handed to the store.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub owner_id: UserId,
    pub details: EventDetails,
}

/// A user's registration for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attendee {
    pub id: i64,
    pub user_id: UserId,
    pub event_id: EventId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> DateTime<Utc> {
        DateTime::from_timestamp(1_800_000_000, 0).unwrap()
    }

    #[test]
    fn test_event_details_valid() {
        let details = EventDetails::new(
            "RustConf".to_string(),
            "A conference about Rust".to_string(),
            date(),
            "Montreal".to_string(),
        )
        .unwrap();

        assert_eq!(details.name(), "RustConf");
        assert_eq!(details.date(), date());
    }

    #[test]
    fn test_event_details_rejects_short_fields() {
        assert_eq!(
            EventDetails::new("ab".into(), "long enough text".into(), date(), "Paris".into()),
            Err(EventDetailsError::NameTooShort { min: 3 })
        );
        assert_eq!(
            EventDetails::new("Meetup".into(), "short".into(), date(), "Paris".into()),
            Err(EventDetailsError::DescriptionTooShort { min: 10 })
        );
        assert_eq!(
            EventDetails::new("Meetup".into(), "long enough text".into(), date(), "NY".into()),
            Err(EventDetailsError::LocationTooShort { min: 3 })
        );
    }

    #[test]
    fn test_event_id_from_string() {
        assert_eq!(EventId::from_string("12"), Ok(EventId(12)));
        assert!(EventId::from_string("x").is_err());
        assert!(EventId::from_string("0").is_err());
    }
}
