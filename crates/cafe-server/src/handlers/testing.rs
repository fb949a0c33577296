//! Test helpers: an in-memory app and request shortcuts

use crate::services::CafeDirectory;
use crate::storage::Database;
use crate::{build_router, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const API_KEY: &str = "test-api-key";

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::in_memory()
            .await
            .expect("in-memory database should open");
        let state = AppState {
            directory: Arc::new(CafeDirectory::new(Arc::new(db), API_KEY.to_string())),
        };
        Self {
            router: build_router(state),
        }
    }

    pub async fn raw(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Sends the request and parses the body as JSON (`Null` if it isn't).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.raw(request).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

pub async fn get(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    app.send(request).await
}

pub async fn send_form(app: &TestApp, method: Method, uri: &str, form: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("valid request");
    app.send(request).await
}

/// Adds a cafe and fails the test if the server refuses it.
pub async fn add_cafe(app: &TestApp, form: &str) {
    let (status, body) = send_form(app, Method::POST, "/add", form).await;
    assert_eq!(status, StatusCode::OK, "add failed: {body}");
}

/// Sends the fields as a `multipart/form-data` body.
pub async fn send_multipart(
    app: &TestApp,
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
) -> (StatusCode, Value) {
    const BOUNDARY: &str = "cafe-test-boundary";

    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid request");
    app.send(request).await
}

/// Sends a request with no body and no Content-Type.
pub async fn send_empty(app: &TestApp, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    app.send(request).await
}
