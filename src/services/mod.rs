// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod decode;
pub mod geocode;
pub mod hosted;
pub mod image;
pub mod local;
pub mod maps;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod suggestion;
pub mod summarize;

pub use geocode::GeocodingService;
pub use hosted::{GeminiClient, HostedSuggestionProvider};
pub use image::ImageService;
pub use local::LocalSuggestionProvider;
pub use provider::SuggestionProvider;
pub use session::SessionStore;
pub use suggestion::SuggestionService;
pub use summarize::SummaryService;
