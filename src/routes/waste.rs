//! Food-waste API routes: scale submissions and report queries.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::services::scale;
use crate::services::waste::{self, CO2_REPORT_LIMIT, FilteredSummary, Submission, Summary, WasteError};
use crate::state::AppState;

/// Error response: status plus a `{ "message": ... }` body.
pub type ApiError = (StatusCode, Json<Value>);

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    pub start_date: String,
    pub end_date: String,
    pub reason_id: Option<i64>,
}

/// `POST /submit` — record a weighing using the latest scale reading.
pub async fn submit(
    State(state): State<AppState>,
    body: Result<Json<Submission>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|e| waste_error_to_response(WasteError::InvalidRequest(e.body_text())))?;
    let latest = state.scale.get().await;
    let weight = scale::reading_to_weight(latest.as_deref(), state.fallback_weight);

    let row = waste::record_transaction(&state.pool, &body, weight, waste::now_utc())
        .await
        .map_err(waste_error_to_response)?;

    info!(
        transaction_id = row.transaction_id,
        food_id = row.food_id,
        reason_id = row.reason_id,
        weight,
        "transaction recorded"
    );
    state.publish(format!("New reading: {weight:?}"));

    Ok(Json(json!({ "message": "record created" })))
}

/// `GET /food-waste/summary` — totals over every transaction.
pub async fn summary(State(state): State<AppState>) -> Result<Json<Summary>, ApiError> {
    let summary = waste::summary(&state.pool).await.map_err(waste_error_to_response)?;
    Ok(Json(summary))
}

/// `GET /food-waste/graph-data` — wasted cost per food and reason.
pub async fn graph_data(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let data = waste::graph_data(&state.pool).await.map_err(waste_error_to_response)?;
    Ok(Json(json!({ "data": data })))
}

/// `GET /food-waste/co2_emission` — top CO₂-emitting wasted foods.
pub async fn co2_emission(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let data = waste::top_co2_emitters(&state.pool, CO2_REPORT_LIMIT)
        .await
        .map_err(waste_error_to_response)?;
    Ok(Json(json!({ "data": data })))
}

/// `GET /food-waste/reasons` — reason name to id.
pub async fn reasons(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let reasons = waste::reasons(&state.pool).await.map_err(waste_error_to_response)?;
    Ok(Json(json!({ "reasons": reasons })))
}

/// `GET /food-waste/foods` — the food catalog.
pub async fn foods(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let foods = waste::foods(&state.pool).await.map_err(waste_error_to_response)?;
    Ok(Json(json!({ "foods": foods })))
}

/// `GET /food-waste/filter-by-date-and-reason` — totals within a date window.
pub async fn filter_by_date_and_reason(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<FilteredSummary>, ApiError> {
    let Query(params) = params.map_err(|e| waste_error_to_response(WasteError::InvalidRequest(e.body_text())))?;
    let start = waste::parse_query_datetime(&params.start_date).map_err(waste_error_to_response)?;
    let end = waste::parse_query_datetime(&params.end_date).map_err(waste_error_to_response)?;

    let result = waste::filter_by_date_and_reason(&state.pool, start, end, params.reason_id)
        .await
        .map_err(waste_error_to_response)?;
    Ok(Json(result))
}

pub(crate) fn waste_error_to_response(err: WasteError) -> ApiError {
    let status = match &err {
        WasteError::ReasonNotFound(_)
        | WasteError::InvalidRange
        | WasteError::InvalidDate(_)
        | WasteError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        WasteError::FoodNameTaken(_) => StatusCode::CONFLICT,
        WasteError::Database(e) => {
            error!(error = %e, "food-waste query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "message": err.to_string() })))
}

#[cfg(test)]
#[path = "waste_test.rs"]
mod tests;
