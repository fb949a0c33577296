//! Handlers that change stored cafes

use super::extract::{ApiPath, ApiQuery, FormData};
use super::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use cafe_core::{CafeError, NewCafe};
use serde::Deserialize;
use serde_json::{json, Value};

/// Form submitted to `/add`. Field names follow the public form, not the
/// column names.
#[derive(Debug, Default, Deserialize)]
pub struct AddCafeForm {
    name: Option<String>,
    map_url: Option<String>,
    img_url: Option<String>,
    loc: Option<String>,
    seats: Option<String>,
    sockets: Option<String>,
    toilet: Option<String>,
    wifi: Option<String>,
    calls: Option<String>,
    coffee_price: Option<String>,
}

impl From<AddCafeForm> for NewCafe {
    fn from(form: AddCafeForm) -> Self {
        NewCafe {
            has_sockets: parse_flag(form.sockets.as_deref()),
            has_toilet: parse_flag(form.toilet.as_deref()),
            has_wifi: parse_flag(form.wifi.as_deref()),
            can_take_calls: parse_flag(form.calls.as_deref()),
            name: form.name,
            map_url: form.map_url,
            img_url: form.img_url,
            location: form.loc,
            seats: form.seats,
            coffee_price: form.coffee_price,
        }
    }
}

/// Reads an amenity checkbox. Absent, empty and the usual "off" spellings
/// are false; any other value counts as ticked.
pub fn parse_flag(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => false,
        Some(v) => !matches!(v.as_str(), "" | "false" | "0" | "off" | "no"),
    }
}

#[derive(Debug, Deserialize)]
pub struct PriceForm {
    new_price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiKeyParams {
    apikey: Option<String>,
}

pub async fn add(
    State(state): State<AppState>,
    FormData(form): FormData<AddCafeForm>,
) -> Result<Json<Value>, ApiError> {
    state.directory.add(form.into()).await?;
    Ok(Json(json!({
        "response": { "success": "Successfully added the new cafe." }
    })))
}

pub async fn update_price(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    FormData(form): FormData<PriceForm>,
) -> Result<Json<Value>, ApiError> {
    match state.directory.update_price(id, form.new_price).await {
        Ok(()) => Ok(Json(json!({
            "response": { "success": "Successfully updated the new price." }
        }))),
        Err(CafeError::NotFound(_)) => Ok(Json(json!({
            "response": { "error": "No cafe exists with the given id." }
        }))),
        Err(e) => Err(e.into()),
    }
}

pub async fn report_closed(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<ApiKeyParams>,
) -> Result<Json<Value>, ApiError> {
    match state
        .directory
        .report_closed(id, params.apikey.as_deref())
        .await
    {
        Ok(()) => Ok(Json(json!({ "response": { "delete": "Record deleted." } }))),
        Err(CafeError::NotFound(_)) => Ok(Json(json!({
            "response": { "no_record": "Record not found." }
        }))),
        Err(e) => Err(e.into()),
    }
}
