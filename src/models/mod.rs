// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod session;
pub mod suggestion;

pub use activity::{Activity, CategoryIcon, Coordinates};
pub use session::{Notification, NotificationVariant, SearchStatus, Session};
pub use suggestion::{AiProvider, ActivitySuggestion, Category, SuggestionRequest, SuggestionResponse};
