#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use club_site::{
    auth::hash_password, config::Config, create_app, db::ContentStore, db::MemoryStore, serve,
    state::AppState,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub async fn test_state(require_write_auth: bool) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let hash = hash_password(ADMIN_PASSWORD, 4).unwrap();
    store.upsert_admin(ADMIN_USER, &hash).await.unwrap();

    let mut config = Config::local(JWT_SECRET);
    config.require_write_auth = require_write_auth;

    (AppState::new(store.clone(), config), store)
}

pub async fn test_app() -> (Router, Arc<MemoryStore>) {
    let (state, store) = test_state(false).await;
    (create_app(state), store)
}

/// Starts a real listener on an ephemeral port; returns the gateway URL.
pub async fn spawn_app(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        serve(listener, state).await.unwrap();
    });
    format!("http://{}/", addr)
}

pub async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
