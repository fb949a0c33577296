//! HTTP handlers

pub mod cafes;
pub mod error;
pub mod extract;
pub mod manage;

#[cfg(test)]
mod testing;

use axum::{response::Html, Json};
use serde_json::{json, Value};

pub use error::ApiError;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// Landing page with the API documentation.
pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::testing::{get, TestApp};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };

    #[tokio::test]
    async fn test_home_is_html() {
        let app = TestApp::new().await;
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.raw(request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new().await;
        let (status, body) = get(&app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
