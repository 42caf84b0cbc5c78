use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::create_event::EventRequest;
use super::ApiError;
use super::ApiSuccess;
use super::EventData;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::EventId;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Replace an event's details. Only the owner may do this.
pub async fn update_event(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<ApiSuccess<EventData>, ApiError> {
    let event_id = EventId::from_string(&id).map_err(EventError::from)?;
    let Json(body) = payload?;
    let details = body.try_into_details()?;

    state
        .event_service
        .update_event(event_id, current.user.id, details)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::OK, event.into()))
}
