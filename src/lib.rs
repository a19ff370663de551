// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classifier;
pub mod config;
pub mod version;
pub mod vision;

// Re-export main types
pub use api::{build_router, start_server, ApiError, AppState, ErrorResponse, PredictResponse};
pub use classifier::{
    ClassLabels, ClassifierService, ClassifyError, InferenceBackend, OnnxClassifierModel,
    Prediction,
};
pub use config::ServiceConfig;
pub use vision::{decode_image_bytes, preprocess_image, ImageError};
