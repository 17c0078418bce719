//! Shared helpers for the HTTP-level tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use notes_server::core::auth::password::MIN_BCRYPT_COST;
use notes_server::core::config::{AppState, ServerConfig};
use notes_server::core::models::{Note, User};
use notes_server::core::router;
use notes_server::core::store::{CredentialStore, SqliteStore, StoreError};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-test-secret-0123456789";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        jwt_secret: SECRET.to_vec(),
        bcrypt_cost: MIN_BCRYPT_COST,
        ..ServerConfig::default()
    }
}

/// Store whose every call fails as if the database were gone.
pub struct FailingStore;

#[async_trait]
impl CredentialStore for FailingStore {
    async fn create_user(&self, _login: &str, _password_hash: &str) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }

    async fn get_user_by_login(&self, _login: &str) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }

    async fn create_note(&self, _name: &str, _user_id: i64) -> Result<Note, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }

    async fn get_notes_by_user_id(&self, _user_id: i64) -> Result<Vec<Note>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }
}

/// Store wrapper that counts every call reaching the database.
pub struct CountingStore {
    inner: Arc<dyn CredentialStore>,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CredentialStore for CountingStore {
    async fn create_user(&self, login: &str, password_hash: &str) -> Result<User, StoreError> {
        self.hit();
        self.inner.create_user(login, password_hash).await
    }

    async fn get_user_by_login(&self, login: &str) -> Result<User, StoreError> {
        self.hit();
        self.inner.get_user_by_login(login).await
    }

    async fn create_note(&self, name: &str, user_id: i64) -> Result<Note, StoreError> {
        self.hit();
        self.inner.create_note(name, user_id).await
    }

    async fn get_notes_by_user_id(&self, user_id: i64) -> Result<Vec<Note>, StoreError> {
        self.hit();
        self.inner.get_notes_by_user_id(user_id).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<CountingStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_store(Arc::new(SqliteStore::in_memory().await.unwrap()))
    }

    /// App whose store rejects every call.
    pub fn failing() -> Self {
        Self::with_store(Arc::new(FailingStore))
    }

    pub fn with_store(inner: Arc<dyn CredentialStore>) -> Self {
        let store = Arc::new(CountingStore {
            inner,
            calls: AtomicUsize::new(0),
        });
        let state = AppState::new(&test_config(), store.clone());
        Self {
            router: router(state),
            store,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, json)
    }

    pub async fn register(&self, login: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/register",
            None,
            Some(serde_json::json!({ "login": login, "password": password })),
        )
        .await
    }

    pub async fn login(&self, login: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/login",
            None,
            Some(serde_json::json!({ "login": login, "password": password })),
        )
        .await
    }

    /// Register and log in, returning a ready-to-use `Authorization` value.
    pub async fn bearer_for(&self, login: &str, password: &str) -> String {
        let (status, _) = self.register(login, password).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = self.login(login, password).await;
        assert_eq!(status, StatusCode::OK);
        format!("Bearer {}", body["token"].as_str().unwrap())
    }
}
