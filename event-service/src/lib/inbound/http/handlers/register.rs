use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = payload?;

    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    name: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let name = DisplayName::new(self.name)?;
        Ok(RegisterUserCommand::new(email, name, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str, name: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(request("a@b.com", "longenough1", "Al")
            .try_into_command()
            .is_ok());
        assert!(matches!(
            request("not-an-email", "longenough1", "Al").try_into_command(),
            Err(UserError::InvalidEmail(_))
        ));
        assert!(matches!(
            request("a@b.com", "short", "Al").try_into_command(),
            Err(UserError::InvalidPassword(_))
        ));
        assert!(matches!(
            request("a@b.com", "longenough1", "A").try_into_command(),
            Err(UserError::InvalidName(_))
        ));
    }
}
