// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration from environment variables
//!
//! Every setting has a default; unparseable values fall back rather than
//! abort, so a bare `cargo run` with model files in ./models works.

use std::env;
use std::path::PathBuf;

use crate::classifier::DEFAULT_CONFIDENCE_THRESHOLD;

/// Startup configuration for the classifier node
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP listen port (API_PORT)
    pub api_port: u16,
    /// Path to the ONNX model artifact (MODEL_PATH)
    pub model_path: PathBuf,
    /// Path to the class names JSON file (CLASS_NAMES_PATH)
    pub class_names_path: PathBuf,
    /// Confidence cutoff for the "Unknown" override (CONFIDENCE_THRESHOLD)
    pub confidence_threshold: f32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_port: 8080,
            model_path: PathBuf::from("./models/fruit_mobilenetv2.onnx"),
            class_names_path: PathBuf::from("./models/class_names.json"),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl ServiceConfig {
    /// Read configuration from environment variables, falling back to
    /// defaults for missing or unparseable values
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults.api_port);

        let model_path = env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        let class_names_path = env::var("CLASS_NAMES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.class_names_path);

        let confidence_threshold = env::var("CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(defaults.confidence_threshold);

        Self {
            api_port,
            model_path,
            class_names_path,
            confidence_threshold,
        }
    }
}
