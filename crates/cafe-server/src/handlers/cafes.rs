//! Read-only cafe handlers

use super::extract::ApiQuery;
use super::ApiError;
use crate::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use cafe_core::Cafe;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize)]
pub struct CafeListResponse {
    cafes: Vec<Cafe>,
}

#[derive(Debug, Serialize)]
pub struct CafeResponse {
    cafe: Cafe,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    loc: Option<String>,
}

pub async fn random(State(state): State<AppState>) -> Result<Json<CafeResponse>, ApiError> {
    let cafe = state.directory.random().await?;
    Ok(Json(CafeResponse { cafe }))
}

pub async fn all(State(state): State<AppState>) -> Result<Json<CafeListResponse>, ApiError> {
    let cafes = state.directory.all().await?;
    Ok(Json(CafeListResponse { cafes }))
}

pub async fn search(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Response, ApiError> {
    let loc = params.loc.ok_or(ApiError::MissingParameter("loc"))?;

    let cafes = state.directory.search(&loc).await?;
    if cafes.is_empty() {
        return Ok(Json(json!({ "error": "Nothing_found" })).into_response());
    }
    Ok(Json(CafeListResponse { cafes }).into_response())
}
