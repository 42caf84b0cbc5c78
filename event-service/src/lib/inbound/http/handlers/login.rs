use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Exchange email and password for a session token.
///
/// Unknown email and wrong password produce the same response, and both
/// paths run one password verification.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;

    let Some(user) = state.user_service.find_user_by_email(&body.email).await? else {
        state.authenticator.reject_unknown_account(&body.password);
        tracing::debug!("Login rejected: unknown account");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let result = state
        .authenticator
        .authenticate(
            &body.password,
            &user.password_hash,
            user.id.0,
            Duration::hours(state.jwt_expiration_hours),
        )
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            auth::AuthenticationError::JwtError(err) => ApiError::internal(err),
        })?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: result.access_token,
            expires_at: result.expires_at,
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: UserData,
}
