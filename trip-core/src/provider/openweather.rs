use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::provider::http_client;

use super::WeatherProvider;

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Sentinel returned when no OpenWeather API key is configured.
pub const UNAVAILABLE: &str = "Weather data not available";
/// Sentinel returned when the request or the response handling fails.
pub const RETRIEVAL_FAILED: &str = "Weather data could not be retrieved";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: Option<String>,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key, http: http_client() }
    }

    async fn fetch_current(&self, city: &str, api_key: &str) -> Result<String> {
        let res = self
            .http
            .get(CURRENT_WEATHER_URL)
            .query(&[("q", city), ("appid", api_key), ("units", "metric"), ("lang", "en")])
            .send()
            .await
            .context("Failed to send request to OpenWeather (current weather)")?;

        if !res.status().is_success() {
            return Ok(RETRIEVAL_FAILED.to_string());
        }

        let parsed: OwCurrentResponse =
            res.json().await.context("Failed to parse OpenWeather current JSON")?;

        let description = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(format!("{}, {}°C", description, parsed.main.temp))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return UNAVAILABLE.to_string();
        };

        // Transport and parse failures fold into the same sentinel as an
        // error status: the provider layer never fails its caller.
        match self.fetch_current(city, api_key).await {
            Ok(text) => text,
            Err(_) => RETRIEVAL_FAILED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_yields_unavailable_sentinel() {
        let client = OpenWeatherClient::new(None);
        let text = client.current_weather("Paris").await;
        assert_eq!(text, UNAVAILABLE);
    }

    #[test]
    fn current_response_formats_description_and_temp() {
        let body = r#"{
            "weather": [{"description": "clear sky"}],
            "main": {"temp": 18.0}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("valid JSON");
        let description = parsed.weather.first().map(|w| w.description.clone()).unwrap();
        let text = format!("{}, {}°C", description, parsed.main.temp);

        assert_eq!(text, "clear sky, 18°C");
    }

    #[test]
    fn fractional_temperature_is_kept() {
        let parsed: OwCurrentResponse = serde_json::from_str(
            r#"{"weather": [{"description": "light rain"}], "main": {"temp": 7.5}}"#,
        )
        .expect("valid JSON");

        let text = format!("{}, {}°C", parsed.weather[0].description, parsed.main.temp);
        assert_eq!(text, "light rain, 7.5°C");
    }
}
