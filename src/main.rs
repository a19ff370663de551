// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use fruit_classifier_node::{
    api::{start_server, AppState},
    classifier::{ClassLabels, ClassifierService, OnnxClassifierModel},
    config::ServiceConfig,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("{}", fruit_classifier_node::version::get_version_string());

    let config = ServiceConfig::from_env();

    tracing::info!(
        "Loading class names from {}",
        config.class_names_path.display()
    );
    let labels = ClassLabels::load(&config.class_names_path)
        .context("Failed to load class names")?;
    tracing::info!("Loaded {} class names", labels.len());

    let model = OnnxClassifierModel::new("fruit-mobilenetv2", &config.model_path, labels.len())
        .await
        .context("Failed to load classifier model")?;

    let classifier = ClassifierService::new(
        Arc::new(model),
        labels,
        config.confidence_threshold,
    );

    let state = AppState {
        classifier: Arc::new(classifier),
    };

    start_server(config.api_port, state)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {}", e))?;

    Ok(())
}
