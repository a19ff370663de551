// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Class label list loaded at startup
//!
//! The labels file is a flat JSON array of strings. Index i names the class
//! at position i of the model's output vector, so order matters and the list
//! is immutable for the process lifetime.

use std::path::Path;
use thiserror::Error;

/// Errors raised while loading the class label list
#[derive(Debug, Error)]
pub enum LabelsError {
    #[error("Class names file not found: {0}")]
    NotFound(String),

    #[error("Failed to read class names file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse class names JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Class names file contains no labels")]
    Empty,
}

/// Ordered, index-addressed class label list
#[derive(Debug, Clone)]
pub struct ClassLabels {
    labels: Vec<String>,
}

impl ClassLabels {
    /// Load labels from a JSON file containing an array of strings
    ///
    /// # Errors
    /// Returns error if the file is missing, unreadable, not a JSON string
    /// array, or empty.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LabelsError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LabelsError::NotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let labels: Vec<String> = serde_json::from_str(&contents)?;

        Self::from_vec(labels)
    }

    /// Build a label list from an already-parsed vector
    pub fn from_vec(labels: Vec<String>) -> Result<Self, LabelsError> {
        if labels.is_empty() {
            return Err(LabelsError::Empty);
        }
        Ok(Self { labels })
    }

    /// Label at a model output index, if in range
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The full ordered list, as returned in prediction responses
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}
