use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::event::errors::EventError;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventOwner;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod add_attendee;
pub mod create_event;
pub mod delete_event;
pub mod get_event;
pub mod list_attendee_events;
pub mod list_attendees;
pub mod list_events;
pub mod login;
pub mod register;
pub mod remove_attendee;
pub mod update_event;
pub mod update_user;

/// Message returned for every failure whose detail stays server-side.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    /// Log `detail` and hide it behind the generic message.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed");
        ApiError::InternalServerError(GENERIC_ERROR_MESSAGE.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidUserId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::HashingFailed(_) | UserError::StoreUnavailable(_) | UserError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(_) | EventError::UserNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            EventError::NotOwner { .. } => ApiError::Forbidden(err.to_string()),
            EventError::AttendeeAlreadyExists { .. } => ApiError::Conflict(err.to_string()),
            EventError::InvalidEventId(_) | EventError::InvalidDetails(_) => {
                ApiError::BadRequest(err.to_string())
            }
            EventError::StoreUnavailable(_) | EventError::Unknown(_) => ApiError::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public identity view. Never carries the password hash or the
/// verification token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub verified: bool,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            role: user.role.to_string(),
            verified: user.verified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventOwnerData {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&EventOwner> for EventOwnerData {
    fn from(owner: &EventOwner) -> Self {
        Self {
            id: owner.id.0,
            email: owner.email.clone(),
            name: owner.name.clone(),
            role: owner.role.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventData {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<EventOwnerData>,
}

impl From<&Event> for EventData {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.0,
            owner_id: event.owner_id.0,
            name: event.details.name().to_string(),
            description: event.details.description().to_string(),
            date: event.details.date(),
            location: event.details.location().to_string(),
            owner: event.owner.as_ref().map(EventOwnerData::from),
        }
    }
}
