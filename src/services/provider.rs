// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Capability shared by suggestion backends.

use crate::error::Result;
use crate::models::{AiProvider, SuggestionRequest, SuggestionResponse};
use async_trait::async_trait;

/// A backend that turns a rendered prompt into validated suggestions.
///
/// Implementors own transport and decoding. The returned response has
/// already passed schema validation.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Which `AiProvider` tag this backend serves.
    fn kind(&self) -> AiProvider;

    async fn fetch_suggestions(
        &self,
        request: &SuggestionRequest,
        prompt: &str,
    ) -> Result<SuggestionResponse>;
}
