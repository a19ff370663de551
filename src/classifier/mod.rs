// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image classification: labels, ONNX model wrapper, and the
//! decode-preprocess-infer-threshold pipeline behind POST /predict.

pub mod labels;
pub mod onnx_model;
pub mod service;

use anyhow::Result;
use ndarray::Array4;

pub use labels::{ClassLabels, LabelsError};
pub use onnx_model::OnnxClassifierModel;
pub use service::{
    ClassifierService, ClassifyError, Prediction, DEFAULT_CONFIDENCE_THRESHOLD, UNKNOWN_LABEL,
};

/// Forward-pass seam between the classification pipeline and the model runtime.
///
/// `OnnxClassifierModel` is the production implementation; tests substitute
/// stub backends with fixed probability vectors.
pub trait InferenceBackend: Send + Sync {
    /// Run the model on a preprocessed [1, H, W, 3] tensor and return the
    /// probability vector over classes for the single batch row.
    fn run(&self, input: &Array4<f32>) -> Result<Vec<f32>>;
}
