use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::DisplayName;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// HTTP request body for updating the caller's account (raw JSON)
///
/// `email` is accepted for compatibility but never applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        // Empty strings mean "keep the stored value".
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .map(DisplayName::new)
            .transpose()?;

        let password = self
            .password
            .filter(|password| !password.is_empty())
            .map(Password::new)
            .transpose()?;

        Ok(UpdateUserCommand { name, password })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(req) = payload?;

    if req.email.is_some() {
        tracing::debug!(user_id = %current.user.id, "Ignoring email in account update");
    }
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(current.user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_treated_as_absent() {
        let request = UpdateUserRequest {
            email: Some("other@example.com".to_string()),
            name: Some(String::new()),
            password: Some(String::new()),
        };

        let command = request.try_into_command().unwrap();
        assert!(command.name.is_none());
        assert!(command.password.is_none());
    }

    #[test]
    fn test_provided_fields_are_validated() {
        let request = UpdateUserRequest {
            password: Some("short".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            request.try_into_command(),
            Err(UserError::InvalidPassword(_))
        ));

        let request = UpdateUserRequest {
            name: Some("X".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            request.try_into_command(),
            Err(UserError::InvalidName(_))
        ));
    }
}
