// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classification pipeline: decode, preprocess, infer, threshold
//!
//! `ClassifierService` is the single per-request code path behind
//! POST /predict. It owns the inference backend, the label list, and the
//! confidence threshold, all immutable after startup.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::classifier::{ClassLabels, InferenceBackend};
use crate::vision::{decode_image_bytes, preprocess_image, ImageError};

/// Label reported when the top probability falls below the threshold
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Default confidence cutoff
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Errors raised while classifying an uploaded image
///
/// All of these surface as 500 responses; the message is passed through to
/// the client as-is.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("{0}")]
    InvalidImage(#[from] ImageError),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Model returned an empty probability vector")]
    EmptyOutput,

    #[error("Model returned class index {index} outside the label list ({num_labels} labels)")]
    LabelMismatch { index: usize, num_labels: usize },
}

/// A single classification result
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Predicted class label, or [`UNKNOWN_LABEL`] below the threshold
    pub label: String,
    /// Probability at the argmax index
    pub confidence: f32,
    /// Whether the confidence met the threshold
    pub is_confident: bool,
}

/// Classifier pipeline shared across requests
pub struct ClassifierService {
    backend: Arc<dyn InferenceBackend>,
    labels: ClassLabels,
    threshold: f32,
}

impl ClassifierService {
    pub fn new(backend: Arc<dyn InferenceBackend>, labels: ClassLabels, threshold: f32) -> Self {
        Self {
            backend,
            labels,
            threshold,
        }
    }

    /// Classify raw uploaded image bytes
    ///
    /// Decodes the bytes, preprocesses into the model's input tensor, runs
    /// the forward pass, and maps the argmax index (first occurrence wins
    /// ties) to a label. Confidence below the threshold overrides the label
    /// to [`UNKNOWN_LABEL`] and clears `is_confident`.
    pub fn classify(&self, bytes: &[u8]) -> Result<Prediction, ClassifyError> {
        let (image, info) = decode_image_bytes(bytes)?;
        debug!(
            "Decoded image: {}x{}, {} bytes",
            info.width, info.height, info.size_bytes
        );

        let tensor = preprocess_image(&image);

        let probabilities = self
            .backend
            .run(&tensor)
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;

        let (index, confidence) = argmax(&probabilities).ok_or(ClassifyError::EmptyOutput)?;

        let label = self
            .labels
            .get(index)
            .ok_or(ClassifyError::LabelMismatch {
                index,
                num_labels: self.labels.len(),
            })?
            .to_string();

        if confidence < self.threshold {
            Ok(Prediction {
                label: UNKNOWN_LABEL.to_string(),
                confidence,
                is_confident: false,
            })
        } else {
            Ok(Prediction {
                label,
                confidence,
                is_confident: true,
            })
        }
    }

    /// The ordered class label list, as returned in every response
    pub fn class_names(&self) -> &[String] {
        self.labels.as_slice()
    }

    /// The configured confidence cutoff
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

/// Index and value of the maximum entry; ties broken by first occurrence
fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    let mut best_index = 0;
    let mut best_value = *values.first()?;

    for (index, &value) in values.iter().enumerate().skip(1) {
        if value > best_value {
            best_index = index;
            best_value = value;
        }
    }

    Some((best_index, best_value))
}
