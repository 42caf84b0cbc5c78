use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::EventId;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_event(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let event_id = EventId::from_string(&id).map_err(EventError::from)?;

    state
        .event_service
        .delete_event(event_id, current.user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
