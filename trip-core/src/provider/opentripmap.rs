use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    model::PlaceQuery,
    provider::{ProviderId, http_client},
};

use super::PlaceProvider;

const TEXT_SEARCH_URL: &str = "https://api.opentripmap.com/0.1/en/places/text";

/// Sentinel returned when no OpenTripMap API key is configured.
pub const UNAVAILABLE: &str = "OpenTripMap data not available.";
/// Sentinel returned when a successful response contains no usable places.
pub const NO_PLACES: &str = "No interesting places found in OpenTripMap.";

#[derive(Debug, Clone)]
pub struct OpenTripMapClient {
    api_key: Option<String>,
    http: Client,
}

impl OpenTripMapClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key, http: http_client() }
    }

    async fn fetch(&self, query: &PlaceQuery, api_key: &str) -> Result<String> {
        let limit = query.limit.to_string();

        let res = self
            .http
            .get(TEXT_SEARCH_URL)
            .query(&[
                ("name", query.city.as_str()),
                ("apikey", api_key),
                ("limit", limit.as_str()),
                ("lang", "en"),
            ])
            .send()
            .await
            .context("Failed to send request to OpenTripMap")?;

        let status = res.status();
        if !status.is_success() {
            return Ok(api_error(status));
        }

        let parsed: OtmResponse =
            res.json().await.context("Failed to parse OpenTripMap response JSON")?;

        Ok(render_places(&parsed.features))
    }
}

#[derive(Debug, Deserialize)]
struct OtmResponse {
    #[serde(default)]
    features: Vec<OtmFeature>,
}

#[derive(Debug, Deserialize)]
struct OtmFeature {
    properties: OtmProperties,
}

#[derive(Debug, Deserialize)]
struct OtmProperties {
    name: Option<String>,
    #[serde(rename = "wikidataDescription")]
    wikidata_description: Option<String>,
}

/// Sentinel for a non-success response status.
fn api_error(status: reqwest::StatusCode) -> String {
    format!("OpenTripMap API error: {}", status.as_u16())
}

/// One `"<name>: <description>"` line per named place; unnamed entries are
/// skipped.
fn render_places(features: &[OtmFeature]) -> String {
    let places: Vec<String> = features
        .iter()
        .filter_map(|feature| {
            let name = feature.properties.name.as_deref()?;
            if name.is_empty() {
                return None;
            }
            let description = feature
                .properties
                .wikidata_description
                .as_deref()
                .unwrap_or("No description available.");
            Some(format!("{name}: {description}"))
        })
        .collect();

    if places.is_empty() { NO_PLACES.to_string() } else { places.join("\n") }
}

#[async_trait]
impl PlaceProvider for OpenTripMapClient {
    fn id(&self) -> ProviderId {
        ProviderId::OpenTripMap
    }

    async fn fetch_places(&self, query: &PlaceQuery) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return UNAVAILABLE.to_string();
        };

        match self.fetch(query, api_key).await {
            Ok(text) => text,
            // Transport/parse failures are absorbed like an error status.
            Err(err) => format!("OpenTripMap API error: {err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_yields_unavailable_sentinel() {
        let client = OpenTripMapClient::new(None);
        let text = client.fetch_places(&PlaceQuery::new("Paris")).await;
        assert_eq!(text, UNAVAILABLE);
    }

    #[test]
    fn error_status_sentinel_names_provider_and_status() {
        assert_eq!(
            api_error(reqwest::StatusCode::SERVICE_UNAVAILABLE),
            "OpenTripMap API error: 503"
        );
    }

    #[test]
    fn render_formats_name_and_description() {
        let parsed: OtmResponse = serde_json::from_str(
            r#"{
                "features": [
                    {"properties": {"name": "Louvre", "wikidataDescription": "art museum in Paris"}},
                    {"properties": {"name": "Pont Neuf"}}
                ]
            }"#,
        )
        .expect("valid JSON");

        let text = render_places(&parsed.features);
        assert_eq!(text, "Louvre: art museum in Paris\nPont Neuf: No description available.");
    }

    #[test]
    fn unnamed_entries_are_skipped() {
        let parsed: OtmResponse = serde_json::from_str(
            r#"{
                "features": [
                    {"properties": {"wikidataDescription": "orphan description"}},
                    {"properties": {"name": "Sacré-Cœur"}}
                ]
            }"#,
        )
        .expect("valid JSON");

        let text = render_places(&parsed.features);
        assert_eq!(text, "Sacré-Cœur: No description available.");
    }

    #[test]
    fn empty_feature_list_yields_no_places_sentinel() {
        let parsed: OtmResponse = serde_json::from_str(r#"{"features": []}"#).expect("valid JSON");
        assert_eq!(render_places(&parsed.features), NO_PLACES);
    }

    #[test]
    fn missing_feature_list_yields_no_places_sentinel() {
        let parsed: OtmResponse = serde_json::from_str("{}").expect("valid JSON");
        assert_eq!(render_places(&parsed.features), NO_PLACES);
    }
}
