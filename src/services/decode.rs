// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Decoding of untrusted model text into a validated `SuggestionResponse`.
//!
//! Steps:
//! 1. Parse the text as JSON
//! 2. On failure, strip one layer of markdown code fences and reparse once
//! 3. Validate the parsed value against the response schema
//!
//! Each failure maps to exactly one error variant.

use crate::error::AppError;
use crate::models::{AiProvider, SuggestionResponse};
use serde_json::Value;
use std::borrow::Cow;

enum DecodeState<'a> {
    /// Parse `text`; `repaired` is set once the cleanup pass has run.
    Parse { text: Cow<'a, str>, repaired: bool },
    Validate(Value),
}

/// Decode model output produced by `provider`.
pub fn decode_generation(provider: AiProvider, text: &str) -> Result<SuggestionResponse, AppError> {
    let mut state = DecodeState::Parse {
        text: Cow::Borrowed(text),
        repaired: false,
    };

    loop {
        state = match state {
            DecodeState::Parse { text, repaired } => match serde_json::from_str::<Value>(&text) {
                Ok(value) => DecodeState::Validate(value),
                Err(e) if !repaired => {
                    tracing::debug!(%provider, error = %e, "Output is not JSON, stripping code fences");
                    DecodeState::Parse {
                        text: Cow::Owned(strip_code_fences(&text).to_string()),
                        repaired: true,
                    }
                }
                Err(e) => {
                    return Err(AppError::MalformedOutput {
                        provider,
                        message: format!("{} (output: {})", e, preview(text.as_ref())),
                    })
                }
            },
            DecodeState::Validate(value) => {
                return SuggestionResponse::from_value(value)
                    .map_err(|message| AppError::SchemaViolation { provider, message })
            }
        };
    }
}

/// Remove a leading ```` ``` ````/```` ```json ```` marker and a trailing ```` ``` ````.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        // Drop an optional language tag on the fence line
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        body = rest[tag_len..].trim_start();
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest.trim_end();
    }

    body
}

/// First part of the output, for error messages.
fn preview(text: &str) -> String {
    const MAX_PREVIEW_CHARS: usize = 120;
    let mut preview: String = text.chars().take(MAX_PREVIEW_CHARS).collect();
    if text.chars().count() > MAX_PREVIEW_CHARS {
        preview.push('…');
    }
    preview
}
