// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The Google AI key is the only credential. It is optional so the service
//! can run against the local provider alone; hosted calls then fail upstream.

use std::env;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
/// Image generation requires an image-capable model.
pub const DEFAULT_GEMINI_IMAGE_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "mistral";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,

    // --- Hosted provider ---
    /// Google AI API key (GOOGLE_API_KEY or GEMINI_API_KEY)
    pub google_api_key: Option<String>,
    pub gemini_base_url: String,
    /// Model for suggestions and summaries
    pub gemini_model: String,
    pub gemini_image_model: String,

    // --- Local provider ---
    pub ollama_url: String,
    pub ollama_model: String,

    // --- Geocoding ---
    pub nominatim_url: String,

    // --- Limits ---
    /// Timeout for suggestion/summary generation calls
    pub request_timeout: Duration,
    /// Timeout for image generation calls
    pub image_timeout: Duration,
    /// Timeout for reverse geocoding
    pub geocode_timeout: Duration,
    /// Idle sessions older than this are pruned
    pub session_ttl: chrono::Duration,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let google_api_key = env::var("GOOGLE_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:9002".to_string()),
            port: parse_var("PORT", 8080)?,
            google_api_key,
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_image_model: env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_IMAGE_MODEL.to_string()),
            ollama_url: env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string()),
            ollama_model: env::var("OLLAMA_MODEL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.to_string()),
            nominatim_url: env::var("NOMINATIM_URL")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_string()),
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 60)?),
            image_timeout: Duration::from_secs(parse_var("IMAGE_TIMEOUT_SECS", 90)?),
            geocode_timeout: Duration::from_secs(10),
            session_ttl: chrono::Duration::minutes(parse_var("SESSION_TTL_MINUTES", 120)?),
        })
    }

    /// Config for tests: every upstream points at an unroutable local port.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:9002".to_string(),
            port: 8080,
            google_api_key: Some("test_api_key".to_string()),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_image_model: DEFAULT_GEMINI_IMAGE_MODEL.to_string(),
            ollama_url: "http://127.0.0.1:9".to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            nominatim_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_secs(5),
            image_timeout: Duration::from_secs(5),
            geocode_timeout: Duration::from_secs(5),
            session_ttl: chrono::Duration::minutes(120),
        }
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
