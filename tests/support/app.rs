//! In-process API harness: a migrated temporary database behind the real
//! router, driven with `tower::ServiceExt::oneshot`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use learnhub::adapter::inbound::http::{router, AppState};
use learnhub::adapter::outbound::mailer::MemoryMailer;
use learnhub::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use learnhub::adapter::outbound::sqlite::SqliteStore;
use learnhub::application::auth::AuthPolicy;
use learnhub::application::seed::{SeedReport, SeedService};
use learnhub::application::tutor::config::TutorConfig;
use learnhub::domain::activity::ChatMessage;
use learnhub::domain::profile::Role;
use learnhub::error::{Error, Result};
use learnhub::port::outbound::llm::Llm;

pub const PASSWORD: &str = "correct-horse-1";

pub struct TestApp {
    _dir: TempDir,
    pub state: AppState,
    pub store: Arc<SqliteStore>,
    pub mailer: MemoryMailer,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_llm(None)
    }

    pub fn with_llm(llm: Option<Arc<dyn Llm>>) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = dir.path().join("api.db").display().to_string();
        let pool = create_pool(&url, 4).expect("pool");
        run_migrations(&pool).expect("migrations");
        let store = Arc::new(SqliteStore::new(pool));

        let mailer = MemoryMailer::new();
        let state = AppState::new(
            store.clone(),
            Arc::new(mailer.clone()),
            llm,
            AuthPolicy::default(),
            TutorConfig::default(),
        );
        Self {
            _dir: dir,
            router: router(state.clone(), &[]),
            state,
            store,
            mailer,
        }
    }

    /// Send one request and decode the JSON body (`Value::Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/auth/signin",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Register through the API and return a bearer token.
    pub async fn user(&self, email: &str, role: Role) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/auth/signup",
                None,
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "full_name": "Test User",
                    "role": role.as_str(),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "sign-up failed: {body}");
        self.token(email).await
    }

    /// Admins cannot sign up; create one through the service.
    pub async fn admin(&self, email: &str) -> String {
        self.state
            .auth
            .create_account(email, PASSWORD, "Site Admin", Role::Admin)
            .await
            .expect("admin account");
        self.token(email).await
    }

    async fn token(&self, email: &str) -> String {
        let (status, body) = self.sign_in(email, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "sign-in failed: {body}");
        body["token"].as_str().expect("token").to_string()
    }

    /// Load the demo data set.
    pub async fn seed(&self) -> SeedReport {
        let store = &self.store;
        SeedService::new(
            self.state.auth.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        )
        .run()
        .await
        .expect("seed")
    }

    /// Create a course as `token` and return its id.
    pub async fn course(&self, token: &str, title: &str, category: &str) -> String {
        let (status, body) = self
            .post(
                "/courses",
                token,
                json!({
                    "title": title,
                    "description": format!("An introduction to {title}."),
                    "category": category,
                    "difficulty": "beginner",
                    "duration_hours": 12.0,
                    "tags": [category.to_lowercase()],
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "course creation failed: {body}");
        body["id"].as_str().expect("course id").to_string()
    }

    /// Enroll as `token` and return the enrollment id.
    pub async fn enroll(&self, token: &str, course_id: &str) -> String {
        let (status, body) = self
            .post("/enrollments", token, json!({ "course_id": course_id }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "enrollment failed: {body}");
        body["id"].as_str().expect("enrollment id").to_string()
    }
}

/// Answers every chat with a fixed reply and remembers what it was sent.
#[derive(Default)]
pub struct ScriptedLlm {
    reply: String,
    pub calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl ScriptedLlm {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Mutex::default(),
        }
    }
}

#[async_trait]
impl Llm for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn chat(&self, system: &str, messages: &[ChatMessage]) -> Result<String> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((system.to_string(), messages.to_vec()));
        Ok(self.reply.clone())
    }
}

/// Fails every call, as an unreachable provider would.
pub struct DownLlm;

#[async_trait]
impl Llm for DownLlm {
    fn name(&self) -> &'static str {
        "down"
    }

    async fn chat(&self, _system: &str, _messages: &[ChatMessage]) -> Result<String> {
        Err(Error::Llm("connection refused".into()))
    }
}
