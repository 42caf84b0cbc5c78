#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use event_service::config::DatabaseConfig;
use event_service::config::DatabaseDriver;
use event_service::domain::event::service::EventService;
use event_service::domain::user::service::UserService;
use event_service::inbound::http::router::create_router;
use event_service::outbound::repositories::sqlite;
use event_service::outbound::repositories::SqliteEventRepository;
use event_service::outbound::repositories::SqliteUserRepository;
use serde_json::json;
use serde_json::Value;
use sqlx::SqlitePool;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server on an in-memory database
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub pool: SqlitePool,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// Account created through the public API, with a session token.
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let database = DatabaseConfig {
            driver: DatabaseDriver::Sqlite,
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            query_timeout_secs: 3,
        };
        let pool = sqlite::connect(&database)
            .await
            .expect("Failed to open test database");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let timeout = database.query_timeout();
        let users = Arc::new(SqliteUserRepository::new(pool.clone(), timeout));
        let events = Arc::new(SqliteEventRepository::new(pool.clone(), timeout));

        let router = create_router(
            Arc::new(UserService::new(Arc::clone(&users))),
            Arc::new(EventService::new(events, users)),
            Arc::new(Authenticator::new(JWT_SECRET).expect("Failed to build authenticator")),
            72,
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            pool,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).bearer_auth(token)
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&json!({ "email": email, "password": password, "name": name }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in a fresh account.
    pub async fn create_user(&self, email: &str) -> TestUser {
        let password = "longenough1".to_string();

        let response = self.register(email, &password, "Tester").await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = self.login(email, &password).await.json().await.unwrap();
        TestUser {
            id: body["data"]["user"]["id"].as_i64().unwrap(),
            email: email.to_string(),
            password,
            token: body["data"]["token"].as_str().unwrap().to_string(),
        }
    }

    /// Register, verify and log in a fresh account.
    pub async fn create_verified_user(&self, email: &str) -> TestUser {
        let user = self.create_user(email).await;
        self.verify_user(user.id).await;
        user
    }

    /// Mark an account verified directly in the store.
    pub async fn verify_user(&self, id: i64) {
        sqlx::query(
            "UPDATE users SET verified = TRUE, verify_token = NULL, verify_token_expires = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .expect("Failed to verify user");
    }

    pub async fn stored_password_hash(&self, id: i64) -> String {
        let (hash,): (String,) = sqlx::query_as("SELECT password_hash FROM users WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to read user");
        hash
    }
}

pub fn event_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "An evening of lightning talks",
        "date": "2030-05-01T18:00:00Z",
        "location": "Berlin"
    })
}
