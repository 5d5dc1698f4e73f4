//! The planner sequences one request end to end: validate the inputs, fan
//! out to the three data providers, assemble the prompt, call the generation
//! backend.
//!
//! Data providers absorb their own failures (sentinel text ends up in the
//! prompt); only input validation and the generation backend can fail the
//! request.

use thiserror::Error;

use crate::{
    config::Config,
    generation::{GeminiClient, GenerationError, SuggestionBackend},
    model::PlaceQuery,
    prompt::{self, PromptContext},
    provider::{
        PlaceProvider, ProviderId, WeatherProvider, foursquare::FoursquareClient,
        opentripmap::OpenTripMapClient, openweather::OpenWeatherClient,
    },
};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Stateless across requests: each `plan` call is an independent one-shot
/// aggregation.
#[derive(Debug)]
pub struct TripPlanner {
    weather: Box<dyn WeatherProvider>,
    opentripmap: Box<dyn PlaceProvider>,
    foursquare: Box<dyn PlaceProvider>,
    backend: Box<dyn SuggestionBackend>,
}

impl TripPlanner {
    pub fn new(
        weather: Box<dyn WeatherProvider>,
        opentripmap: Box<dyn PlaceProvider>,
        foursquare: Box<dyn PlaceProvider>,
        backend: Box<dyn SuggestionBackend>,
    ) -> Self {
        Self { weather, opentripmap, foursquare, backend }
    }

    /// Wire up the real clients. A missing key is passed through as `None`
    /// and surfaces as that provider's sentinel (or, for Gemini, as
    /// [`GenerationError::MissingCredential`]).
    pub fn from_config(config: &Config) -> Self {
        let key = |id: ProviderId| config.provider_api_key(id).map(str::to_owned);

        Self::new(
            Box::new(OpenWeatherClient::new(key(ProviderId::OpenWeather))),
            Box::new(OpenTripMapClient::new(key(ProviderId::OpenTripMap))),
            Box::new(FoursquareClient::new(key(ProviderId::Foursquare))),
            Box::new(GeminiClient::new(key(ProviderId::Gemini))),
        )
    }

    /// Produce a personalized day plan for `city`.
    pub async fn plan(&self, city: &str, preferences: &str) -> Result<String, PlanError> {
        if city.trim().is_empty() || preferences.trim().is_empty() {
            return Err(PlanError::InvalidInput {
                message: "preferences and city fields are required".to_string(),
            });
        }

        let query = PlaceQuery::new(city);

        // The three fetches are independent; run them concurrently and join
        // before assembly. Each absorbs its own failure, so the join always
        // yields three usable text blocks.
        let (weather, foursquare, opentripmap) = tokio::join!(
            self.weather.current_weather(city),
            self.foursquare.fetch_places(&query),
            self.opentripmap.fetch_places(&query),
        );

        let ctx = PromptContext {
            preferences: preferences.to_string(),
            city: city.to_string(),
            weather,
            foursquare,
            opentripmap,
        };

        let full_prompt = prompt::assemble(&ctx);

        Ok(self.backend.generate(&full_prompt).await?)
    }
}
