use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::EventData;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::EventId;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<EventData>, ApiError> {
    let event_id = EventId::from_string(&id).map_err(EventError::from)?;

    state
        .event_service
        .get_event(event_id)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::OK, event.into()))
}
