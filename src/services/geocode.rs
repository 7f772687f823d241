// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reverse geocoding via Nominatim.

use crate::error::{AppError, Result};
use crate::models::Coordinates;
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

/// Name used when the response carries nothing usable.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Nominatim requires an identifying agent.
const USER_AGENT: &str = concat!("wandersnap/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default, Deserialize)]
pub struct ReverseResponse {
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub county: Option<String>,
}

impl ReverseResponse {
    /// City, town, village, county, then first segment of display name.
    pub fn place_name(&self) -> String {
        let from_address = self.address.as_ref().and_then(|a| {
            [&a.city, &a.town, &a.village, &a.county]
                .into_iter()
                .flatten()
                .map(|s| s.trim())
                .find(|s| !s.is_empty())
        });

        let from_display = || {
            self.display_name
                .as_deref()
                .and_then(|d| d.split(',').next())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        from_address
            .or_else(from_display)
            .unwrap_or(UNKNOWN_LOCATION)
            .to_string()
    }
}

/// Nominatim reverse-geocoding client.
#[derive(Clone)]
pub struct GeocodingService {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("failed building geocoding HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve coordinates to a short place name.
    pub async fn reverse(&self, coordinates: Coordinates) -> Result<String> {
        let url = format!("{}/reverse", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lng.to_string()),
                ("accept-language", "en".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, "Nominatim returned an error status");
            return Err(AppError::Upstream(format!("Geocoding HTTP {}", status)));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Geocoding JSON parse error: {}", e)))?;

        let name = body.place_name();
        tracing::debug!(name = %name, "Location identified");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ReverseResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_prefers_city_over_town() {
        let r = parse(json!({ "address": { "town": "Smallville", "city": "Metropolis" } }));
        assert_eq!(r.place_name(), "Metropolis");
    }

    #[test]
    fn test_falls_through_address_fields() {
        let r = parse(json!({ "address": { "county": "Santa Clara County" } }));
        assert_eq!(r.place_name(), "Santa Clara County");

        let r = parse(json!({ "address": { "village": "Woodside", "county": "San Mateo" } }));
        assert_eq!(r.place_name(), "Woodside");
    }

    #[test]
    fn test_falls_back_to_display_name_segment() {
        let r = parse(json!({
            "address": { "road": "Main St" },
            "display_name": " Rancho San Antonio , Cupertino, California"
        }));
        assert_eq!(r.place_name(), "Rancho San Antonio");
    }

    #[test]
    fn test_unknown_location_when_empty() {
        assert_eq!(parse(json!({})).place_name(), UNKNOWN_LOCATION);
        assert_eq!(
            parse(json!({ "display_name": "" })).place_name(),
            UNKNOWN_LOCATION
        );
    }
}
