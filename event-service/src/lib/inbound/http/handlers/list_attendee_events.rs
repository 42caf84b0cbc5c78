use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::EventData;
use crate::domain::event::ports::EventServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn list_attendee_events(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<EventData>>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    let events = state.event_service.list_events_for_attendee(user_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        events.iter().map(EventData::from).collect(),
    ))
}
