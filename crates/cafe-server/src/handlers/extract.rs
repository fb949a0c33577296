//! Extractors that reject with JSON bodies
//!
//! Thin wrappers over axum's `Path`, `Query` and form extraction whose
//! rejection is [`ApiError`], so a malformed request gets the same body
//! shape as every other error.

use super::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Multipart, Path, Query, Request},
    http::{header, request::Parts, StatusCode},
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}

pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(value))
    }
}

/// Form fields from either a url-encoded or a multipart body.
///
/// A request without a body and without a Content-Type reads as an empty
/// form. For multipart bodies the first value of a repeated field wins.
pub struct FormData<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormData<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase());

        match content_type.as_deref() {
            Some(ct) if ct.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state).await?;
                let fields = read_multipart(multipart).await?;
                Ok(FormData(from_fields(fields)?))
            }
            Some(_) => {
                let Form(value) = Form::<T>::from_request(req, state).await?;
                Ok(FormData(value))
            }
            None => {
                let body = Bytes::from_request(req, state).await?;
                if !body.is_empty() {
                    return Err(ApiError::Rejected {
                        status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        message: "Form requests must have Content-Type: \
                                  application/x-www-form-urlencoded or multipart/form-data"
                            .to_string(),
                    });
                }
                Ok(FormData(from_fields(Map::new())?))
            }
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<Map<String, Value>, ApiError> {
    let mut fields = Map::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field.text().await.map_err(multipart_error)?;
        fields.entry(name).or_insert(Value::String(value));
    }
    Ok(fields)
}

fn from_fields<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| ApiError::Rejected {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: format!("Failed to deserialize form: {}", e),
    })
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Rejected {
        status: StatusCode::BAD_REQUEST,
        message: format!("Invalid multipart body: {}", e),
    }
}
