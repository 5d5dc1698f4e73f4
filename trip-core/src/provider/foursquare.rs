use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    model::PlaceQuery,
    provider::{ProviderId, http_client},
};

use super::PlaceProvider;

const PLACE_SEARCH_URL: &str = "https://api.foursquare.com/v3/places/search";

/// Category filter: sights & landmarks, food & drink, arts & entertainment.
const CATEGORIES: &str = "16000,13000,12000";

/// Sentinel returned when no Foursquare API key is configured.
pub const UNAVAILABLE: &str = "Foursquare data not available.";
/// Sentinel returned when a successful response contains no usable places.
pub const NO_PLACES: &str = "No popular places found.";

#[derive(Debug, Clone)]
pub struct FoursquareClient {
    api_key: Option<String>,
    http: Client,
}

impl FoursquareClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key, http: http_client() }
    }

    async fn fetch(&self, query: &PlaceQuery, api_key: &str) -> Result<String> {
        let limit = query.limit.to_string();

        // Foursquare v3 carries the API key in the Authorization header
        // rather than a query parameter.
        let res = self
            .http
            .get(PLACE_SEARCH_URL)
            .header("Accept", "application/json")
            .header("Authorization", api_key)
            .query(&[
                ("near", query.city.as_str()),
                ("limit", limit.as_str()),
                ("sort", "RELEVANCE"),
                ("categories", CATEGORIES),
            ])
            .send()
            .await
            .context("Failed to send request to Foursquare")?;

        let status = res.status();
        if !status.is_success() {
            return Ok(api_error(status));
        }

        let parsed: FsqResponse =
            res.json().await.context("Failed to parse Foursquare response JSON")?;

        Ok(render_places(&parsed.results))
    }
}

#[derive(Debug, Deserialize)]
struct FsqResponse {
    #[serde(default)]
    results: Vec<FsqPlace>,
}

#[derive(Debug, Deserialize)]
struct FsqPlace {
    name: Option<String>,
    #[serde(default)]
    location: FsqLocation,
}

#[derive(Debug, Deserialize, Default)]
struct FsqLocation {
    formatted_address: Option<String>,
}

/// Sentinel for a non-success response status.
fn api_error(status: reqwest::StatusCode) -> String {
    format!("Foursquare API error: {}", status.as_u16())
}

/// One `"<name> - <address>"` line per named place; unnamed entries are
/// skipped.
fn render_places(results: &[FsqPlace]) -> String {
    let places: Vec<String> = results
        .iter()
        .filter_map(|place| {
            let name = place.name.as_deref()?;
            if name.is_empty() {
                return None;
            }
            let address = place.location.formatted_address.as_deref().unwrap_or("");
            Some(format!("{name} - {address}"))
        })
        .collect();

    if places.is_empty() { NO_PLACES.to_string() } else { places.join("\n") }
}

#[async_trait]
impl PlaceProvider for FoursquareClient {
    fn id(&self) -> ProviderId {
        ProviderId::Foursquare
    }

    async fn fetch_places(&self, query: &PlaceQuery) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return UNAVAILABLE.to_string();
        };

        match self.fetch(query, api_key).await {
            Ok(text) => text,
            // Transport/parse failures are absorbed like an error status.
            Err(err) => format!("Foursquare API error: {err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_yields_unavailable_sentinel() {
        let client = FoursquareClient::new(None);
        let text = client.fetch_places(&PlaceQuery::new("Paris")).await;
        assert_eq!(text, UNAVAILABLE);
    }

    #[test]
    fn error_status_sentinel_names_provider_and_status() {
        assert_eq!(
            api_error(reqwest::StatusCode::TOO_MANY_REQUESTS),
            "Foursquare API error: 429"
        );
    }

    #[test]
    fn render_formats_name_and_address() {
        let parsed: FsqResponse = serde_json::from_str(
            r#"{
                "results": [
                    {"name": "Café de Flore", "location": {"formatted_address": "172 Bd Saint-Germain, Paris"}},
                    {"name": "Le Marais"}
                ]
            }"#,
        )
        .expect("valid JSON");

        let text = render_places(&parsed.results);
        assert_eq!(text, "Café de Flore - 172 Bd Saint-Germain, Paris\nLe Marais - ");
    }

    #[test]
    fn unnamed_entries_are_skipped() {
        let parsed: FsqResponse = serde_json::from_str(
            r#"{"results": [{"location": {"formatted_address": "nowhere"}}]}"#,
        )
        .expect("valid JSON");

        assert_eq!(render_places(&parsed.results), NO_PLACES);
    }

    #[test]
    fn empty_results_yield_no_places_sentinel() {
        let parsed: FsqResponse = serde_json::from_str(r#"{"results": []}"#).expect("valid JSON");
        assert_eq!(render_places(&parsed.results), NO_PLACES);
    }
}
