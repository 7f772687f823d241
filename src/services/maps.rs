// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound map/search links for activity cards.

use crate::models::Activity;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";
const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1";
const WEB_SEARCH_URL: &str = "https://www.google.com/search";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Route to the user's coordinates
    Directions,
    /// Search for the activity near the user's named area
    MapSearch,
    /// Web search with the activity's location hint
    WebSearch,
    /// Nothing to link to
    None,
}

/// The card's single call-to-action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CardAction {
    pub kind: ActionKind,
    pub label: String,
    /// `None` means the button is disabled.
    pub url: Option<String>,
}

/// Choose the action for a card, in order: coordinates, name near the
/// named area, name plus location hint.
pub fn card_action(activity: &Activity, location_display_name: Option<&str>) -> CardAction {
    if let Some(location) = activity.location {
        return CardAction {
            kind: ActionKind::Directions,
            label: "Get Directions".to_string(),
            url: Some(format!(
                "{}&destination={},{}",
                DIRECTIONS_URL, location.lat, location.lng
            )),
        };
    }

    let name = activity.name.trim();
    let display_name = location_display_name.map(str::trim).filter(|s| !s.is_empty());
    let hint = activity
        .location_hint
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if !name.is_empty() {
        if let Some(area) = display_name {
            return CardAction {
                kind: ActionKind::MapSearch,
                label: "Find on Map / Search".to_string(),
                url: Some(format!(
                    "{}&query={}+near+{}",
                    MAP_SEARCH_URL,
                    urlencoding::encode(name),
                    urlencoding::encode(area)
                )),
            };
        }
        if let Some(hint) = hint {
            return CardAction {
                kind: ActionKind::WebSearch,
                label: "Find on Map / Search".to_string(),
                url: Some(format!(
                    "{}?q={}+{}",
                    WEB_SEARCH_URL,
                    urlencoding::encode(name),
                    urlencoding::encode(hint)
                )),
            };
        }
    }

    CardAction {
        kind: ActionKind::None,
        label: "More Info".to_string(),
        url: None,
    }
}
