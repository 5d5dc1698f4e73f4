use crate::model::PlaceQuery;
use async_trait::async_trait;
use reqwest::Client;
use std::{convert::TryFrom, fmt::Debug, time::Duration};

pub mod foursquare;
pub mod opentripmap;
pub mod openweather;

/// Bounded per-request timeout for every outbound client, so one slow
/// provider cannot stall the whole pipeline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    OpenTripMap,
    Foursquare,
    Gemini,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::OpenTripMap => "opentripmap",
            ProviderId::Foursquare => "foursquare",
            ProviderId::Gemini => "gemini",
        }
    }

    /// Environment variable that overrides the stored API key for this provider.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "WEATHER_API_KEY",
            ProviderId::OpenTripMap => "OPENTRIPMAP_API_KEY",
            ProviderId::Foursquare => "FOURSQUARE_API_KEY",
            ProviderId::Gemini => "GEMINI_API_KEY",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[
            ProviderId::OpenWeather,
            ProviderId::OpenTripMap,
            ProviderId::Foursquare,
            ProviderId::Gemini,
        ]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "opentripmap" => Ok(ProviderId::OpenTripMap),
            "foursquare" => Ok(ProviderId::Foursquare),
            "gemini" => Ok(ProviderId::Gemini),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, opentripmap, foursquare, gemini."
            )),
        }
    }
}

/// A points-of-interest source. The contract is total: every failure is
/// absorbed into a human-readable sentinel string, so a broken or
/// unconfigured provider degrades the prompt instead of failing the request.
#[async_trait]
pub trait PlaceProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    /// Fetch up to `query.limit` places near `query.city`, formatted as one
    /// line per place. Never fails: missing credentials, transport errors,
    /// error statuses and empty result sets all yield sentinel text.
    async fn fetch_places(&self, query: &PlaceQuery) -> String;
}

/// Current-conditions source with the same absorbing contract as
/// [`PlaceProvider`]: the result is either `"<description>, <temp>°C"` or a
/// sentinel explaining why weather data is missing.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn provider_id_parse_is_case_insensitive() {
        let parsed = ProviderId::try_from("OpenTripMap").expect("mixed case should parse");
        assert_eq!(parsed, ProviderId::OpenTripMap);
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn env_vars_are_distinct() {
        let mut vars: Vec<&str> = ProviderId::all().iter().map(ProviderId::env_var).collect();
        vars.sort_unstable();
        vars.dedup();
        assert_eq!(vars.len(), ProviderId::all().len());
    }
}
