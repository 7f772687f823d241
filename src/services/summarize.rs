// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity summaries tailored to mood, time and preferences.

use crate::error::{AppError, Result};
use crate::models::AiProvider;
use crate::services::decode::strip_code_fences;
use crate::services::hosted::GeminiClient;
use crate::services::prompt::{build_summary_prompt, SummaryPromptInput};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[validate(length(min = 1, max = 4000))]
    pub activity_description: String,
    #[validate(length(min = 1, max = 100))]
    pub mood: String,
    #[validate(length(min = 1, max = 100))]
    pub time_available: String,
    #[validate(length(max = 500))]
    pub preferences: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SummaryResponse {
    pub summary: String,
}

fn summary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A concise and engaging summary of the activity tailored to the user's mood, time constraints, and preferences."
            }
        },
        "required": ["summary"]
    })
}

/// Summarizes activity descriptions with the hosted model.
#[derive(Clone)]
pub struct SummaryService {
    client: GeminiClient,
    model: String,
}

impl SummaryService {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse> {
        request.validate()?;

        let prompt = build_summary_prompt(&SummaryPromptInput {
            activity_description: &request.activity_description,
            mood: &request.mood,
            time_available: &request.time_available,
            preferences: request.preferences.as_deref(),
        });

        let text = self
            .client
            .generate_structured(&self.model, &prompt, summary_schema())
            .await?
            .ok_or_else(|| AppError::Protocol {
                provider: AiProvider::Hosted,
                message: "model returned no summary".to_string(),
            })?;

        parse_summary(&text)
    }
}

fn parse_summary(text: &str) -> Result<SummaryResponse> {
    let value: Value = serde_json::from_str(strip_code_fences(text)).map_err(|e| {
        AppError::MalformedOutput {
            provider: AiProvider::Hosted,
            message: e.to_string(),
        }
    })?;

    let response: SummaryResponse =
        serde_json::from_value(value).map_err(|e| AppError::SchemaViolation {
            provider: AiProvider::Hosted,
            message: e.to_string(),
        })?;

    if response.summary.trim().is_empty() {
        return Err(AppError::SchemaViolation {
            provider: AiProvider::Hosted,
            message: "summary is empty".to_string(),
        });
    }
    Ok(response)
}
