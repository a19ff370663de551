// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for POST /predict
//!
//! These tests drive the full router with a stub inference backend, so the
//! multipart handling, error mapping, and threshold behavior are exercised
//! without a model artifact on disk:
//! - valid upload returns a label from class_names with confidence in [0,1]
//! - missing "file" field and empty filename are 400s
//! - corrupted image bytes and inference failures are 500s
//! - below-threshold confidence maps to "Unknown" / is_confident=false

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use fruit_classifier_node::{
    api::{build_router, AppState, ErrorResponse, PredictResponse},
    classifier::{ClassLabels, ClassifierService, InferenceBackend},
};
use ndarray::Array4;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

// 1x1 red PNG image (base64)
const TINY_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

const BOUNDARY: &str = "fruit-test-boundary-7MA4YWxkTrZu0gW";

struct StubBackend {
    probabilities: Vec<f32>,
}

impl InferenceBackend for StubBackend {
    fn run(&self, _input: &Array4<f32>) -> anyhow::Result<Vec<f32>> {
        Ok(self.probabilities.clone())
    }
}

struct FailingBackend;

impl InferenceBackend for FailingBackend {
    fn run(&self, _input: &Array4<f32>) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("inference backend unavailable")
    }
}

/// Helper: router with a stub backend over ["apple", "banana", "cherry"]
fn setup_app(probabilities: Vec<f32>) -> Router {
    let labels = ClassLabels::from_vec(vec![
        "apple".to_string(),
        "banana".to_string(),
        "cherry".to_string(),
    ])
    .unwrap();
    let classifier = ClassifierService::new(
        Arc::new(StubBackend { probabilities }),
        labels,
        0.5,
    );
    build_router(AppState {
        classifier: Arc::new(classifier),
    })
}

/// Helper: multipart/form-data body with a single field
fn multipart_request(field_name: &str, file_name: Option<&str>, bytes: &[u8]) -> Request<Body> {
    let disposition = match file_name {
        Some(name) => format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
            field_name, name
        ),
        None => format!("Content-Disposition: form-data; name=\"{}\"", field_name),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(disposition.as_bytes());
    body.extend_from_slice(b"\r\nContent-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn tiny_png() -> Vec<u8> {
    STANDARD.decode(TINY_PNG_BASE64).unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_valid_upload_returns_prediction() {
    let app = setup_app(vec![0.05, 0.9, 0.05]);

    let request = multipart_request("file", Some("fruit.png"), &tiny_png());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let prediction: PredictResponse = read_json(response).await;
    assert_eq!(prediction.predicted_class, "banana");
    assert!((0.0..=1.0).contains(&prediction.confidence));
    assert!(prediction.is_confident);
    assert_eq!(
        prediction.class_names,
        vec!["apple".to_string(), "banana".to_string(), "cherry".to_string()]
    );
    assert!(prediction
        .class_names
        .contains(&prediction.predicted_class));
}

#[tokio::test]
async fn test_below_threshold_is_unknown() {
    let app = setup_app(vec![0.3, 0.4, 0.3]);

    let request = multipart_request("file", Some("fruit.png"), &tiny_png());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let prediction: PredictResponse = read_json(response).await;
    assert_eq!(prediction.predicted_class, "Unknown");
    assert!(!prediction.is_confident);
    assert!((prediction.confidence - 0.4).abs() < 1e-6);
    // The label list is still reported in full
    assert_eq!(prediction.class_names.len(), 3);
}

#[tokio::test]
async fn test_missing_file_field_is_400() {
    let app = setup_app(vec![1.0, 0.0, 0.0]);

    // Field present, but not named "file"
    let request = multipart_request("image", Some("fruit.png"), &tiny_png());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert!(error.error.contains("file"));
}

#[tokio::test]
async fn test_empty_filename_is_400() {
    let app = setup_app(vec![1.0, 0.0, 0.0]);

    let request = multipart_request("file", Some(""), &tiny_png());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "No file selected.");
}

#[tokio::test]
async fn test_corrupted_image_is_500() {
    let app = setup_app(vec![1.0, 0.0, 0.0]);

    // PNG magic bytes followed by garbage
    let request = multipart_request(
        "file",
        Some("broken.png"),
        &[0x89, 0x50, 0x4E, 0x47, 0xDE, 0xAD, 0xBE, 0xEF],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = read_json(response).await;
    assert!(!error.error.is_empty());
}

#[tokio::test]
async fn test_non_image_bytes_is_500() {
    let app = setup_app(vec![1.0, 0.0, 0.0]);

    let request = multipart_request("file", Some("notes.txt"), b"just some text");
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_inference_failure_is_500_with_message() {
    let labels = ClassLabels::from_vec(vec!["apple".to_string()]).unwrap();
    let classifier = ClassifierService::new(Arc::new(FailingBackend), labels, 0.5);
    let app = build_router(AppState {
        classifier: Arc::new(classifier),
    });

    let request = multipart_request("file", Some("fruit.png"), &tiny_png());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = read_json(response).await;
    assert!(error.error.contains("inference backend unavailable"));
}

#[tokio::test]
async fn test_non_multipart_body_is_rejected() {
    let app = setup_app(vec![1.0, 0.0, 0.0]);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"file": "nope"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_predict_rejects_get() {
    let app = setup_app(vec![1.0, 0.0, 0.0]);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/predict")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
