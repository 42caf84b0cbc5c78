use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::EventId;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::router::AppState;

/// Users attending an event, as public identity views.
pub async fn list_attendees(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let event_id = EventId::from_string(&id).map_err(EventError::from)?;

    let users = state.event_service.list_attendees(event_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        users.iter().map(UserData::from).collect(),
    ))
}
