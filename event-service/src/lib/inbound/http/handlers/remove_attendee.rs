use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::EventId;
use crate::domain::event::ports::EventServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn remove_attendee(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let event_id = EventId::from_string(&id).map_err(EventError::from)?;
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    state
        .event_service
        .remove_attendee(event_id, user_id, current.user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
