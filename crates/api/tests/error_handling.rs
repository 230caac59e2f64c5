//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use mintpress_api::error::AppError;
use mintpress_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("name must not be empty".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name must not be empty");
}

#[tokio::test]
async fn invalid_batch_size_returns_400() {
    let err = AppError::Core(CoreError::InvalidBatchSize {
        batch_size: 0,
        reason: "must be at least 1".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_BATCH_SIZE");
    assert_eq!(json["error"], "batch size 0: must be at least 1");
}

#[tokio::test]
async fn storage_failure_returns_502_with_message() {
    let err = AppError::Core(CoreError::Storage {
        message: "connection reset by peer".into(),
        cleanup: None,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "STORAGE_FAILURE");
    assert_eq!(json["error"], "connection reset by peer");
}

#[tokio::test]
async fn staging_failure_hides_local_paths() {
    let err = AppError::Core(CoreError::Staging("cannot create file in /var/secret".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STORAGE_FAILURE");
    assert!(!json["error"].as_str().unwrap().contains("/var/secret"));
}

#[tokio::test]
async fn cleanup_failure_reports_stored_locator() {
    let err = AppError::Core(CoreError::Cleanup {
        path: "/tmp/mintpress-x.png".into(),
        message: "permission denied".into(),
        locator: Some("ipfs://bafyabc/metadata.json".into()),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "CLEANUP_FAILURE");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("ipfs://bafyabc/metadata.json"));
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}
