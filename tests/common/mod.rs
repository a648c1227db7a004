#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use lms_api::config::AppConfig;
use lms_api::database::in_memory_pool;
use lms_api::errors::Result;
use lms_api::routes::build_router;
use lms_api::services::notifier::Notifier;
use lms_api::state::AppState;

// ─── Test helpers ───────────────────────────────────────────────────────

/// Lowest cost bcrypt accepts.
pub const TEST_COST: u32 = 4;

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        jwt_secret: "test-secret-key".to_string(),
        jwt_expiration_secs: 3600,
        bcrypt_cost: TEST_COST,
        port: 0,
        host: "127.0.0.1".to_string(),
    }
}

/// Keeps every secret it is asked to deliver.
#[derive(Default)]
pub struct CapturingNotifier {
    pub otps: Mutex<Vec<(String, String)>>,
    pub reset_tokens: Mutex<Vec<(String, String)>>,
}

impl CapturingNotifier {
    pub fn last_otp(&self, email: &str) -> Option<String> {
        self.otps
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub fn last_reset_token(&self, email: &str) -> Option<String> {
        self.reset_tokens
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl Notifier for CapturingNotifier {
    async fn send_otp(&self, email: &str, otp: &str) -> Result<()> {
        self.otps
            .lock()
            .unwrap()
            .push((email.to_string(), otp.to_string()));
        Ok(())
    }

    async fn send_reset_token(&self, email: &str, token: &str) -> Result<()> {
        self.reset_tokens
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub notifier: Arc<CapturingNotifier>,
}

pub async fn test_state() -> AppState {
    let pool = in_memory_pool().await.unwrap();
    AppState::new(pool, &test_config())
}

pub async fn spawn_app() -> TestApp {
    let notifier = Arc::new(CapturingNotifier::default());
    let state = test_state().await.with_notifier(notifier.clone());
    TestApp {
        router: build_router(state.clone()),
        state,
        notifier,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), body).await
    }

    /// Registers a user and returns its id.
    pub async fn register(&self, username: &str, role: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                json!({
                    "username": username,
                    "password": "password123",
                    "email": format!("{}@example.com", username),
                    "role": role,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register {}: {}", username, body);
        body["userId"].as_i64().unwrap()
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.post(
            "/api/auth/login",
            None,
            json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Registers and logs in, returning `(user_id, token)`.
    pub async fn user_with_token(&self, username: &str, role: &str) -> (i64, String) {
        let user_id = self.register(username, role).await;
        let (status, body) = self.login(username, "password123").await;
        assert_eq!(status, StatusCode::OK);
        (user_id, body["accessToken"].as_str().unwrap().to_string())
    }

    /// Creates a course as `instructor_token` and returns its id.
    pub async fn create_course(&self, instructor_token: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/instructor/courses",
                Some(instructor_token),
                json!({ "courseName": name, "description": "An introduction" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create course: {}", body);
        body["courseId"].as_i64().unwrap()
    }
}
