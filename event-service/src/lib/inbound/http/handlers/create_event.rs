use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::EventData;
use crate::domain::event::errors::EventDetailsError;
use crate::domain::event::models::EventDetails;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_event(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<ApiSuccess<EventData>, ApiError> {
    let Json(body) = payload?;
    let details = body.try_into_details()?;

    state
        .event_service
        .create_event(current.user.id, details)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::CREATED, event.into()))
}

/// HTTP request body shared by event creation and replacement (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRequest {
    name: String,
    description: String,
    date: DateTime<Utc>,
    location: String,
}

impl EventRequest {
    pub(super) fn try_into_details(self) -> Result<EventDetails, EventDetailsError> {
        EventDetails::new(self.name, self.description, self.date, self.location)
    }
}

impl From<EventDetailsError> for ApiError {
    fn from(err: EventDetailsError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
