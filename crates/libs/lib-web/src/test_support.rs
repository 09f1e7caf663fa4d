//! Shared helpers for handler tests.

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use lib_core::{Config, Environment};
use tower::ServiceExt;

use crate::server::{create_app_with_config, App};

/// Development config backed by an in-memory database.
pub fn test_config() -> Config {
    Config {
        environment: Environment::Development,
        secret_key: "test-secret-key".to_string(),
        debug: true,
        database_url: "sqlite::memory:".to_string(),
        migrations_dir: "migrations".to_string(),
    }
}

/// Application built by the real factory from [`test_config`].
pub async fn test_app() -> App {
    create_app_with_config(test_config())
        .await
        .expect("Test app should build")
}

pub async fn send_get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
