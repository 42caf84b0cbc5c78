use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Identity resolved from a session token, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

/// Resolve the caller from the `Authorization: Bearer` header.
///
/// Every rejection is a 401; the internal reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Session token rejected");
        ApiError::Unauthorized("Invalid token".to_string())
    })?;

    let user_id = UserId(claims.user_id);
    let user = state
        .user_service
        .get_user(user_id)
        .await
        .map_err(|e| {
            match &e {
                UserError::NotFound(_) => {
                    tracing::warn!(user_id = %user_id, "Session token for unknown user")
                }
                _ => tracing::error!(user_id = %user_id, error = %e, "Identity lookup failed"),
            }
            ApiError::Unauthorized("Unauthorized access".to_string())
        })?;

    req.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(req).await)
}

/// Only let verified accounts through. Must run after `authenticate`.
pub async fn require_verified(req: Request, next: Next) -> Result<Response, ApiError> {
    let Some(current) = req.extensions().get::<AuthenticatedUser>() else {
        return Err(ApiError::Unauthorized("Unauthorized".to_string()));
    };

    if !current.user.verified {
        tracing::debug!(user_id = %current.user.id, "Unverified account denied");
        return Err(ApiError::Forbidden("Email not verified".to_string()));
    }

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;

    value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Bearer token missing".to_string()))
}
