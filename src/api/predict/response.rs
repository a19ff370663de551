// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! PredictResponse type for POST /predict

use serde::{Deserialize, Serialize};

use crate::classifier::Prediction;

/// Response body for POST /predict
///
/// # Example
/// ```json
/// {
///   "predicted_class": "banana",
///   "confidence": 0.93,
///   "class_names": ["apple", "banana", "cherry"],
///   "is_confident": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Predicted class label, or "Unknown" below the confidence threshold
    pub predicted_class: String,

    /// Probability at the predicted class's index
    pub confidence: f32,

    /// The full ordered class label list
    pub class_names: Vec<String>,

    /// Whether the confidence met the threshold
    pub is_confident: bool,
}

impl PredictResponse {
    pub fn new(prediction: Prediction, class_names: Vec<String>) -> Self {
        Self {
            predicted_class: prediction.label,
            confidence: prediction.confidence,
            class_names,
            is_confident: prediction.is_confident,
        }
    }
}
