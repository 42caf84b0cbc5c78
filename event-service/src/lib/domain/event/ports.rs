use async_trait::async_trait;

use crate::domain::event::errors::EventError;
use crate::domain::event::models::Attendee;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventDetails;
use crate::domain::event::models::EventId;
use crate::domain::event::models::NewEvent;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for event and attendee operations.
///
/// Mutating operations take the caller's id and enforce ownership.
#[async_trait]
pub trait EventServicePort: Send + Sync + 'static {
    async fn create_event(&self, owner: UserId, details: EventDetails)
        -> Result<Event, EventError>;

    async fn list_events(&self) -> Result<Vec<Event>, EventError>;

    /// # Errors
    /// * `NotFound` - Event does not exist
    async fn get_event(&self, id: EventId) -> Result<Event, EventError>;

    /// # Errors
    /// * `NotFound` - Event does not exist
    /// * `NotOwner` - Caller does not own the event
    async fn update_event(
        &self,
        id: EventId,
        caller: UserId,
        details: EventDetails,
    ) -> Result<Event, EventError>;

    /// # Errors
    /// * `NotFound` - Event does not exist
    /// * `NotOwner` - Caller does not own the event
    async fn delete_event(&self, id: EventId, caller: UserId) -> Result<(), EventError>;

    /// # Errors
    /// * `NotFound` - Event does not exist
    /// * `UserNotFound` - Attendee user does not exist
    /// * `NotOwner` - Caller does not own the event
    /// * `AttendeeAlreadyExists` - User already attends the event
    async fn add_attendee(
        &self,
        event_id: EventId,
        user_id: UserId,
        caller: UserId,
    ) -> Result<Attendee, EventError>;

    /// # Errors
    /// * `NotFound` - Event does not exist
    /// * `NotOwner` - Caller does not own the event
    async fn remove_attendee(
        &self,
        event_id: EventId,
        user_id: UserId,
        caller: UserId,
    ) -> Result<(), EventError>;

    /// # Errors
    /// * `NotFound` - Event does not exist
    async fn list_attendees(&self, event_id: EventId) -> Result<Vec<User>, EventError>;

    async fn list_events_for_attendee(&self, user_id: UserId) -> Result<Vec<Event>, EventError>;
}

/// Persistence operations for events and their attendees.
///
/// Implementations bound every call with a timeout and report expiry as
/// `StoreUnavailable`.
#[async_trait]
pub trait EventRepository: Send + Sync + 'static {
    async fn create(&self, event: NewEvent) -> Result<Event, EventError>;

    async fn list_all(&self) -> Result<Vec<Event>, EventError>;

    /// # Returns
    /// Optional event (None if not found)
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, EventError>;

    /// # Errors
    /// * `NotFound` - Event does not exist
    async fn update(&self, id: EventId, details: EventDetails) -> Result<Event, EventError>;

    /// # Errors
    /// * `NotFound` - Event does not exist
    async fn delete(&self, id: EventId) -> Result<(), EventError>;

    /// # Errors
    /// * `AttendeeAlreadyExists` - Pair already registered
    async fn add_attendee(&self, event_id: EventId, user_id: UserId)
        -> Result<Attendee, EventError>;

    /// Removing a user who does not attend is not an error.
    async fn remove_attendee(&self, event_id: EventId, user_id: UserId)
        -> Result<(), EventError>;

    async fn list_attendees(&self, event_id: EventId) -> Result<Vec<User>, EventError>;

    async fn list_events_by_attendee(&self, user_id: UserId) -> Result<Vec<Event>, EventError>;
}
