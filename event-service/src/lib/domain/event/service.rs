use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::event::errors::EventError;
use crate::domain::event::models::Attendee;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventDetails;
use crate::domain::event::models::EventId;
use crate::domain::event::models::NewEvent;
use crate::domain::event::ports::EventRepository;
use crate::domain::event::ports::EventServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service for events and attendee lists.
///
/// Only the owner of an event may change it or manage its attendees.
pub struct EventService<ER, UR>
where
    ER: EventRepository,
    UR: UserRepository,
{
    events: Arc<ER>,
    users: Arc<UR>,
}

impl<ER, UR> EventService<ER, UR>
where
    ER: EventRepository,
    UR: UserRepository,
{
    pub fn new(events: Arc<ER>, users: Arc<UR>) -> Self {
        Self { events, users }
    }

    async fn owned_event(&self, id: EventId, caller: UserId) -> Result<Event, EventError> {
        let event = self
            .events
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))?;

        if !event.is_owned_by(caller) {
            tracing::warn!(event_id = %id, user_id = %caller, "Rejected change by non-owner");
            return Err(EventError::NotOwner {
                user_id: caller,
                event_id: id,
            });
        }

        Ok(event)
    }
}

#[async_trait]
impl<ER, UR> EventServicePort for EventService<ER, UR>
where
    ER: EventRepository,
    UR: UserRepository,
{
    async fn create_event(
        &self,
        owner: UserId,
        details: EventDetails,
    ) -> Result<Event, EventError> {
        let event = self
            .events
            .create(NewEvent {
                owner_id: owner,
                details,
            })
            .await?;
        tracing::info!(event_id = %event.id, owner_id = %owner, "Event created");

        Ok(event)
    }

    async fn list_events(&self) -> Result<Vec<Event>, EventError> {
        self.events.list_all().await
    }

    async fn get_event(&self, id: EventId) -> Result<Event, EventError> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    async fn update_event(
        &self,
        id: EventId,
        caller: UserId,
        details: EventDetails,
    ) -> Result<Event, EventError> {
        self.owned_event(id, caller).await?;

        let event = self.events.update(id, details).await?;
        tracing::info!(event_id = %id, "Event updated");

        Ok(event)
    }

    async fn delete_event(&self, id: EventId, caller: UserId) -> Result<(), EventError> {
        self.owned_event(id, caller).await?;

        self.events.delete(id).await?;
        tracing::info!(event_id = %id, "Event deleted");

        Ok(())
    }

    async fn add_attendee(
        &self,
        event_id: EventId,
        user_id: UserId,
        caller: UserId,
    ) -> Result<Attendee, EventError> {
        self.owned_event(event_id, caller).await?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(EventError::UserNotFound(user_id))?;

        let attendee = self.events.add_attendee(event_id, user_id).await?;
        tracing::info!(event_id = %event_id, user_id = %user_id, "Attendee added");

        Ok(attendee)
    }

    async fn remove_attendee(
        &self,
        event_id: EventId,
        user_id: UserId,
        caller: UserId,
    ) -> Result<(), EventError> {
        self.owned_event(event_id, caller).await?;

        self.events.remove_attendee(event_id, user_id).await?;
        tracing::info!(event_id = %event_id, user_id = %user_id, "Attendee removed");

        Ok(())
    }

    async fn list_attendees(&self, event_id: EventId) -> Result<Vec<User>, EventError> {
        self.get_event(event_id).await?;
        self.events.list_attendees(event_id).await
    }

    async fn list_events_for_attendee(&self, user_id: UserId) -> Result<Vec<Event>, EventError> {
        self.events.list_events_by_attendee(user_id).await
    }
}
