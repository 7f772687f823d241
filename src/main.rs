// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! WanderSnap API Server
//!
//! Suggests nearby activities for the user's mood and available time using
//! a hosted Gemini model or a local Ollama server.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wandersnap::{config::Config, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting WanderSnap API");

    if config.google_api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; hosted suggestions and images will fail");
    }
    tracing::info!(
        gemini_model = %config.gemini_model,
        ollama_url = %config.ollama_url,
        ollama_model = %config.ollama_model,
        "AI providers configured"
    );

    // Build shared state
    let state = Arc::new(
        AppState::from_config(config.clone()).expect("Failed to initialize services"),
    );

    // Build router
    let app = wandersnap::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wandersnap=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
