// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX classifier model wrapper
//!
//! This module provides a wrapper around ONNX Runtime for running the
//! MobileNetV2 fruit classifier exported to ONNX.
//!
//! Features:
//! - ONNX model loading from disk (CPU execution)
//! - Load-time validation of the output width against the class count
//! - Single-image inference returning the probability vector

use anyhow::{Context, Result};
use ndarray::Array4;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::vision::IMG_SIZE;

/// ONNX-based image classifier (MobileNetV2)
///
/// The model takes a [1, 224, 224, 3] NHWC float tensor with values in
/// [0,1] and outputs a softmax probability vector over the class list.
///
/// # Thread Safety
/// The session is wrapped in `Arc<Mutex>` for thread-safe shared access;
/// concurrent requests serialize at the session.
#[derive(Clone)]
pub struct OnnxClassifierModel {
    /// ONNX Runtime session (wrapped in Arc<Mutex> for thread-safe shared access)
    session: Arc<Mutex<Session>>,

    /// Model input name, read from the graph at load time
    input_name: String,

    /// Model name (e.g., "fruit-mobilenetv2")
    model_name: String,

    /// Number of output classes, fixed by the label list
    num_classes: usize,
}

impl std::fmt::Debug for OnnxClassifierModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifierModel")
            .field("model_name", &self.model_name)
            .field("input_name", &self.input_name)
            .field("num_classes", &self.num_classes)
            .finish_non_exhaustive()
    }
}

impl OnnxClassifierModel {
    /// Creates a new ONNX classifier model from a disk path
    ///
    /// # Arguments
    /// - `model_name`: Human-readable model name for logging
    /// - `model_path`: Path to the ONNX model file
    /// - `num_classes`: Expected output width (length of the class list)
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - A validation inference does not produce `num_classes` values
    pub async fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        num_classes: usize,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }

        info!("Loading classifier model from {}", model_path.display());

        // CPU-only execution; the service runs one inference at a time
        let mut session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(1)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load ONNX model from {}",
                model_path.display()
            ))?;

        // Input name varies between exporters, so read it from the graph
        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "input_1".to_string());

        debug!("Classifier input name: {}", input_name);

        // Validate output width by running a test inference with a zeroed image.
        // Wrap in a block to ensure outputs are dropped before moving session.
        {
            let size = IMG_SIZE as usize;
            let test_input = Array4::<f32>::zeros((1, size, size, 3));

            let outputs = session
                .run(ort::inputs![input_name.as_str() => Value::from_array(test_input)?])
                .context("Validation inference failed")?;

            let output_tensor = outputs[0]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;

            if output_tensor.len() != num_classes {
                anyhow::bail!(
                    "Model outputs {} values per image (expected {} to match the class list)",
                    output_tensor.len(),
                    num_classes
                );
            }
        } // outputs dropped here

        info!(
            "✅ Classifier model '{}' loaded ({} classes)",
            model_name, num_classes
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            model_name,
            num_classes,
        })
    }

    /// Runs the forward pass on a preprocessed image tensor
    ///
    /// # Arguments
    /// - `input`: NHWC tensor of shape [1, 224, 224, 3], values in [0,1]
    ///
    /// # Returns
    /// - `Result<Vec<f32>>`: probability vector of length `num_classes`
    pub fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
        let shape = input.shape();
        if shape.len() != 4 || shape[0] != 1 || shape[3] != 3 {
            anyhow::bail!("Invalid input shape: {:?}, expected [1, H, W, 3]", shape);
        }

        // Lock session for thread-safe access
        let mut session = self.session.lock().unwrap();

        let input_value =
            Value::from_array(input.to_owned()).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_value])
            .context("Classifier inference failed")?;

        // Use index [0] instead of name since different exporters name outputs differently
        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let probabilities: Vec<f32> = output_tensor.iter().copied().collect();

        if probabilities.len() != self.num_classes {
            anyhow::bail!(
                "Unexpected output width: {} (expected {})",
                probabilities.len(),
                self.num_classes
            );
        }

        Ok(probabilities)
    }

    /// Returns the number of output classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Returns the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl crate::classifier::InferenceBackend for OnnxClassifierModel {
    fn run(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
        self.predict(input)
    }
}
