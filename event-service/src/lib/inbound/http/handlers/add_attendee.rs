use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::Attendee;
use crate::domain::event::models::EventId;
use crate::domain::event::ports::EventServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Register `user_id` for an event. Only the event owner may do this.
pub async fn add_attendee(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<ApiSuccess<AttendeeData>, ApiError> {
    let event_id = EventId::from_string(&id).map_err(EventError::from)?;
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    state
        .event_service
        .add_attendee(event_id, user_id, current.user.id)
        .await
        .map_err(ApiError::from)
        .map(|ref attendee| ApiSuccess::new(StatusCode::CREATED, attendee.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendeeData {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
}

impl From<&Attendee> for AttendeeData {
    fn from(attendee: &Attendee) -> Self {
        Self {
            id: attendee.id,
            user_id: attendee.user_id.0,
            event_id: attendee.event_id.0,
        }
    }
}
