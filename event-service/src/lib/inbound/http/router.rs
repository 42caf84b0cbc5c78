use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_attendee::add_attendee;
use super::handlers::create_event::create_event;
use super::handlers::delete_event::delete_event;
use super::handlers::get_event::get_event;
use super::handlers::list_attendee_events::list_attendee_events;
use super::handlers::list_attendees::list_attendees;
use super::handlers::list_events::list_events;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::remove_attendee::remove_attendee;
use super::handlers::update_event::update_event;
use super::handlers::update_user::update_user;
use super::middleware::authenticate;
use super::middleware::require_verified;
use crate::domain::event::ports::EventServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub event_service: Arc<dyn EventServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub jwt_expiration_hours: i64,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    event_service: Arc<dyn EventServicePort>,
    authenticator: Arc<Authenticator>,
    jwt_expiration_hours: i64,
) -> Router {
    let state = AppState {
        user_service,
        event_service,
        authenticator,
        jwt_expiration_hours,
    };

    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/events", get(list_events))
        .route("/events/:id", get(get_event))
        .route("/events/:id/attendees", get(list_attendees))
        .route("/attendees/:user_id/events", get(list_attendee_events));

    let session_routes = Router::new()
        .route("/auth/user", put(update_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Layers run bottom-up: identity is resolved before the verified gate.
    let verified_routes = Router::new()
        .route("/events", post(create_event))
        .route("/events/:id", put(update_event).delete(delete_event))
        .route(
            "/events/:id/attendees/:user_id",
            post(add_attendee).delete(remove_attendee),
        )
        .route_layer(middleware::from_fn(require_verified))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let api_routes = Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(verified_routes);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::header;
    use axum::http::Method;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::event::service::EventService;
    use crate::domain::user::service::UserService;
    use crate::outbound::repositories::sqlite::testing;
    use crate::outbound::repositories::SqliteEventRepository;
    use crate::outbound::repositories::SqliteUserRepository;

    async fn router() -> Router {
        let pool = testing::memory_pool().await;
        let users = Arc::new(SqliteUserRepository::new(pool.clone(), testing::TIMEOUT));
        let events = Arc::new(SqliteEventRepository::new(pool, testing::TIMEOUT));

        create_router(
            Arc::new(UserService::new(Arc::clone(&users))),
            Arc::new(EventService::new(events, users)),
            Arc::new(Authenticator::new(b"router-test-secret").unwrap()),
            72,
        )
    }

    async fn message(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["data"]["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_session_route_without_header() {
        let response = router()
            .await
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri("/api/v1/auth/user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, "Unauthorized");
    }

    #[tokio::test]
    async fn test_verified_route_with_garbage_token() {
        let response = router()
            .await
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/events")
                    .header(header::AUTHORIZATION, "Bearer not-a-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, "Invalid token");
    }

    #[tokio::test]
    async fn test_public_routes_need_no_token() {
        let response = router()
            .await
            .oneshot(
                Request::builder()
                    .uri("/api/v1/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
