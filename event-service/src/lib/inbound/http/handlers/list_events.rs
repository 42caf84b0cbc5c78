use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::EventData;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_events(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<EventData>>, ApiError> {
    let events = state.event_service.list_events().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        events.iter().map(EventData::from).collect(),
    ))
}
