// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::models::AiProvider;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Network failure or non-2xx status from a provider.
    #[error("{provider} transport error: {message}")]
    Transport {
        provider: AiProvider,
        message: String,
    },

    /// Provider answered but the envelope lacks the expected field.
    #[error("{provider} protocol error: {message}")]
    Protocol {
        provider: AiProvider,
        message: String,
    },

    /// Payload is not JSON, even after one cleanup pass.
    #[error("{provider} returned malformed output: {message}")]
    MalformedOutput {
        provider: AiProvider,
        message: String,
    },

    /// Payload is JSON but does not match the suggestion schema.
    #[error("{provider} output violates schema: {message}")]
    SchemaViolation {
        provider: AiProvider,
        message: String,
    },

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Build a transport error with status and body, as reported by a provider.
    pub fn http_status(provider: AiProvider, status: reqwest::StatusCode, body: &str) -> Self {
        AppError::Transport {
            provider,
            message: format!("HTTP {}: {}", status, body),
        }
    }

    /// Provider that produced the error, if any.
    pub fn provider(&self) -> Option<AiProvider> {
        match self {
            AppError::Transport { provider, .. }
            | AppError::Protocol { provider, .. }
            | AppError::MalformedOutput { provider, .. }
            | AppError::SchemaViolation { provider, .. } => Some(*provider),
            _ => None,
        }
    }

    /// Single user-facing message for a failed suggestion fetch.
    pub fn user_message(&self) -> String {
        let Some(provider) = self.provider() else {
            return "Could not get suggestions from the AI. Please try again.".to_string();
        };

        let mut message = match self {
            AppError::Transport { .. } => {
                format!("Could not reach {}.", provider.label())
            }
            _ => format!(
                "{} returned a response we could not understand.",
                provider.label()
            ),
        };
        if provider == AiProvider::Local && matches!(self, AppError::Transport { .. }) {
            message.push_str(" Is the local Ollama server running?");
        }
        message.push_str(" Please try again.");
        message
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Transport { provider, message } => {
                tracing::warn!(%provider, error = %message, "Provider transport error");
                (
                    StatusCode::BAD_GATEWAY,
                    "provider_unavailable",
                    Some(self.user_message()),
                )
            }
            AppError::Protocol { provider, message } => {
                tracing::warn!(%provider, error = %message, "Provider protocol error");
                (
                    StatusCode::BAD_GATEWAY,
                    "provider_protocol_error",
                    Some(self.user_message()),
                )
            }
            AppError::MalformedOutput { provider, message } => {
                tracing::warn!(%provider, error = %message, "Malformed provider output");
                (
                    StatusCode::BAD_GATEWAY,
                    "malformed_output",
                    Some(self.user_message()),
                )
            }
            AppError::SchemaViolation { provider, message } => {
                tracing::warn!(%provider, error = %message, "Provider output violates schema");
                (
                    StatusCode::BAD_GATEWAY,
                    "schema_violation",
                    Some(self.user_message()),
                )
            }
            AppError::Upstream(msg) => {
                (StatusCode::BAD_GATEWAY, "upstream_error", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
