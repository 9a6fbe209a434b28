use serde_json::{Value, json};

use super::*;
use crate::state::test_helpers::{spawn_app, test_app_state};

async fn get_json(url: String) -> (reqwest::StatusCode, Value) {
    let res = reqwest::get(url).await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn post_submit(addr: std::net::SocketAddr, body: Value) -> (reqwest::StatusCode, Value) {
    let res = reqwest::Client::new()
        .post(format!("http://{addr}/submit"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[test]
fn waste_error_to_response_maps_client_errors() {
    let (status, Json(body)) = waste_error_to_response(WasteError::ReasonNotFound(9));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "reason not found" }));

    let (status, _) = waste_error_to_response(WasteError::InvalidRange);
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = waste_error_to_response(WasteError::InvalidDate("x".into()));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, Json(body)) = waste_error_to_response(WasteError::InvalidRequest("missing field".into()));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "invalid request: missing field" }));

    let (status, _) = waste_error_to_response(WasteError::FoodNameTaken("Arroz".into()));
    assert_eq!(status, StatusCode::CONFLICT);
}

#[test]
fn waste_error_to_response_maps_database_errors() {
    let (status, _) = waste_error_to_response(WasteError::Database(sqlx::Error::RowNotFound));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn submit_records_with_fallback_weight() {
    let addr = spawn_app(test_app_state().await).await;
    let (status, body) = post_submit(addr, json!({ "foodId": 1, "foodPrice": 20.0, "motivoId": 1 })).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, json!({ "message": "record created" }));

    let (_, summary) = get_json(format!("http://{addr}/food-waste/summary")).await;
    assert_eq!(summary["total_transactions"], 1);
    assert_eq!(summary["total_weight"], 10.0);
    assert_eq!(summary["total_value"], 200.0);
}

#[tokio::test]
async fn submit_uses_latest_scale_reading() {
    let state = test_app_state().await;
    state.scale.set("00250".into()).await;
    let addr = spawn_app(state).await;

    post_submit(addr, json!({ "foodId": 3, "foodPrice": 7.0, "motivoId": 2 })).await;

    let (_, summary) = get_json(format!("http://{addr}/food-waste/summary")).await;
    assert_eq!(summary["total_weight"], 2.5);
    assert_eq!(summary["total_value"], 17.5);
}

#[tokio::test]
async fn submit_with_unknown_reason_is_bad_request() {
    let addr = spawn_app(test_app_state().await).await;
    let (status, body) = post_submit(addr, json!({ "foodId": 1, "foodPrice": 20.0, "motivoId": 42 })).await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "reason not found");
}

#[tokio::test]
async fn reasons_and_foods_list_catalog() {
    let addr = spawn_app(test_app_state().await).await;

    let (status, reasons) = get_json(format!("http://{addr}/food-waste/reasons")).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(reasons, json!({ "reasons": { "Resto": 3, "Sobra": 2, "Validade": 1 } }));

    let (_, foods) = get_json(format!("http://{addr}/food-waste/foods")).await;
    let list = foods["foods"].as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["food_name"], "Frango");
    assert_eq!(list[0]["image"], "frango.jpg");
}

#[tokio::test]
async fn graph_and_co2_reports_wrap_data() {
    let addr = spawn_app(test_app_state().await).await;
    post_submit(addr, json!({ "foodId": 2, "foodPrice": 35.0, "motivoId": 3 })).await;

    let (_, graph) = get_json(format!("http://{addr}/food-waste/graph-data")).await;
    assert_eq!(graph, json!({ "data": [{ "food_name": "Carne", "label": "Resto", "total_cost": 350.0 }] }));

    let (_, co2) = get_json(format!("http://{addr}/food-waste/co2_emission")).await;
    assert_eq!(co2, json!({ "data": [{ "food_name": "Carne", "total_co2_emission": 60.0 }] }));
}

#[tokio::test]
async fn filter_counts_todays_submissions() {
    let addr = spawn_app(test_app_state().await).await;
    post_submit(addr, json!({ "foodId": 1, "foodPrice": 20.0, "motivoId": 1 })).await;
    post_submit(addr, json!({ "foodId": 1, "foodPrice": 20.0, "motivoId": 2 })).await;

    let (status, all) = get_json(format!(
        "http://{addr}/food-waste/filter-by-date-and-reason?start_date=2000-01-01&end_date=2999-12-31"
    ))
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(all["total_transactions"], 2);
    assert!(all.get("message").is_none());

    let (_, sobra) = get_json(format!(
        "http://{addr}/food-waste/filter-by-date-and-reason?start_date=2000-01-01T00:00:00&end_date=2999-12-31T00:00:00&reason_id=2"
    ))
    .await;
    assert_eq!(sobra["total_transactions"], 1);
    assert_eq!(sobra["total_weight"], 10.0);
}

#[tokio::test]
async fn filter_with_no_matches_reports_message() {
    let addr = spawn_app(test_app_state().await).await;
    let (status, body) = get_json(format!(
        "http://{addr}/food-waste/filter-by-date-and-reason?start_date=2000-01-01&end_date=2000-01-02"
    ))
    .await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["total_transactions"], 0);
    assert_eq!(body["message"], crate::services::waste::NO_RECORDS_MESSAGE);
}

#[tokio::test]
async fn filter_rejects_inverted_range_and_bad_dates() {
    let addr = spawn_app(test_app_state().await).await;

    let (status, body) = get_json(format!(
        "http://{addr}/food-waste/filter-by-date-and-reason?start_date=2024-02-01&end_date=2024-01-01"
    ))
    .await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "start date cannot be after end date");

    let (status, _) = get_json(format!(
        "http://{addr}/food-waste/filter-by-date-and-reason?start_date=soon&end_date=2024-01-01"
    ))
    .await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn filter_requires_both_dates() {
    let addr = spawn_app(test_app_state().await).await;
    let (status, body) =
        get_json(format!("http://{addr}/food-waste/filter-by-date-and-reason?start_date=2024-01-01")).await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("invalid request:"));
    assert!(body["message"].as_str().unwrap().contains("end_date"));
}

#[tokio::test]
async fn filter_rejects_non_numeric_reason_with_json_message() {
    let addr = spawn_app(test_app_state().await).await;
    let (status, body) = get_json(format!(
        "http://{addr}/food-waste/filter-by-date-and-reason?start_date=2024-01-01&end_date=2024-01-02&reason_id=abc"
    ))
    .await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("invalid request:"));
}

#[tokio::test]
async fn submit_without_reason_reports_json_message() {
    let addr = spawn_app(test_app_state().await).await;
    let (status, body) = post_submit(addr, json!({ "foodId": 1, "foodPrice": 20.0 })).await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("invalid request:"));
    assert!(message.contains("motivoId"));

    let (_, summary) = get_json(format!("http://{addr}/food-waste/summary")).await;
    assert_eq!(summary["total_transactions"], 0);
}

#[tokio::test]
async fn submit_with_non_json_body_reports_json_message() {
    let addr = spawn_app(test_app_state().await).await;
    let res = reqwest::Client::new()
        .post(format!("http://{addr}/submit"))
        .body("foodId=1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().starts_with("invalid request:"));
}

#[tokio::test]
async fn submit_new_food_with_taken_name_is_conflict() {
    let addr = spawn_app(test_app_state().await).await;
    let (status, body) =
        post_submit(addr, json!({ "foodId": 70, "foodPrice": 2.0, "motivoId": 1, "foodName": "Arroz" })).await;
    assert_eq!(status, reqwest::StatusCode::CONFLICT);
    assert_eq!(body["message"], "food name already in use: Arroz");
}
