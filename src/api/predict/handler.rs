// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction endpoint handler

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use tracing::{info, warn};

use super::response::PredictResponse;
use crate::api::errors::{ApiError, ApiErrorResponse};
use crate::api::http_server::AppState;

/// POST /predict - Classify an uploaded image
///
/// Accepts a multipart form upload under field name "file" and returns the
/// predicted class with a confidence score.
///
/// # Response
/// - `predicted_class`: Top label, or "Unknown" below the confidence threshold
/// - `confidence`: Probability at the predicted class's index (0.0-1.0)
/// - `class_names`: The full ordered label list
/// - `is_confident`: Whether the confidence met the threshold
///
/// # Errors
/// - 400 Bad Request: missing "file" field, empty filename, malformed multipart body
/// - 500 Internal Server Error: image decoding or inference failed
pub async fn predict_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiErrorResponse> {
    let mut file_bytes: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Malformed multipart body: {}", e);
        ApiError::InvalidRequest(format!("Malformed multipart body: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        if matches!(field.file_name(), Some("")) {
            warn!("Upload rejected: empty filename");
            return Err(ApiError::InvalidRequest("No file selected.".to_string()).into());
        }

        let bytes = field.bytes().await.map_err(|e| {
            warn!("Failed to read uploaded file: {}", e);
            ApiError::InvalidRequest(format!("Failed to read uploaded file: {}", e))
        })?;

        file_bytes = Some(bytes);
        break;
    }

    let bytes = file_bytes.ok_or_else(|| {
        warn!("Upload rejected: no 'file' field in request");
        ApiErrorResponse(ApiError::InvalidRequest(
            "No file part in the request. Use multipart field name 'file'.".to_string(),
        ))
    })?;

    let prediction = state.classifier.classify(&bytes).map_err(|e| {
        warn!("Classification failed: {}", e);
        ApiError::ProcessingFailed(e.to_string())
    })?;

    info!(
        "Prediction complete: {} ({:.4} confidence, confident: {})",
        prediction.label, prediction.confidence, prediction.is_confident
    );

    let class_names = state.classifier.class_names().to_vec();
    Ok(Json(PredictResponse::new(prediction, class_names)))
}
