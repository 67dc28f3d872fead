//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use institute_api::error::AppError;
use institute_db::store::StoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn unauthorized_returns_401() {
    let (status, json) = error_to_response(AppError::Unauthorized).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json, serde_json::json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn not_found_returns_404() {
    let (status, json) = error_to_response(AppError::NotFound).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, serde_json::json!({ "error": "Not found" }));
}

#[tokio::test]
async fn timeout_returns_408_with_json_body() {
    let (status, json) = error_to_response(AppError::Timeout).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(json, serde_json::json!({ "error": "Request timed out" }));
}

#[tokio::test]
async fn constraint_violation_returns_500_with_message() {
    let err = AppError::Store(StoreError::Constraint(
        "null value in column \"exam_name\" violates not-null constraint".into(),
    ));
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["error"],
        "null value in column \"exam_name\" violates not-null constraint"
    );
}

#[tokio::test]
async fn body_parse_error_returns_500_with_parser_message() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    let expected = parse_err.to_string();

    let (status, json) = error_to_response(AppError::from(parse_err)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], expected);
}

#[tokio::test]
async fn internal_returns_500() {
    let (status, json) = error_to_response(AppError::Internal("boom".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "boom");
}
