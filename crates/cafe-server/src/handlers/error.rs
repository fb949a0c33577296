//! Error responses for the HTTP layer

use axum::{
    extract::rejection::{BytesRejection, FormRejection, PathRejection, QueryRejection},
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cafe_core::CafeError;
use serde_json::json;

/// Anything a handler can fail with, rendered as a JSON body.
#[derive(Debug)]
pub enum ApiError {
    MissingParameter(&'static str),
    /// The request could not be extracted (bad path, query or form).
    Rejected { status: StatusCode, message: String },
    Cafe(CafeError),
}

impl From<CafeError> for ApiError {
    fn from(e: CafeError) -> Self {
        ApiError::Cafe(e)
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    ApiError::Rejected {
                        status: rejection.status(),
                        message: rejection.body_text(),
                    }
                }
            }
        )*
    };
}

impl_from_rejection!(
    PathRejection,
    QueryRejection,
    FormRejection,
    MultipartRejection,
    BytesRejection,
);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Cafe(e) = &self {
            if !e.is_client_error() {
                tracing::error!("Storage failure: {}", e);
            }
        }

        let (status, body) = match self {
            ApiError::MissingParameter(name) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Missing query parameter: {}", name) }),
            ),
            ApiError::Rejected { status, message } => (status, json!({ "error": message })),
            ApiError::Cafe(CafeError::ConstraintViolation(detail)) => (
                StatusCode::BAD_REQUEST,
                json!({ "response": { "error": detail } }),
            ),
            ApiError::Cafe(CafeError::AuthorizationFailure) => (
                StatusCode::FORBIDDEN,
                json!({ "response": { "apikey_error": "API key is wrong!" } }),
            ),
            ApiError::Cafe(e @ (CafeError::EmptyCollection | CafeError::NotFound(_))) => {
                (StatusCode::NOT_FOUND, json!({ "error": e.to_string() }))
            }
            ApiError::Cafe(CafeError::Database(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
