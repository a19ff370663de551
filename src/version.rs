// Version information for the Fruit Classifier Node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-onnx-classifier-2026-08-06";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-06";

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fruit Classifier Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
