//! Deterministic prompt assembly.
//!
//! The section order and labels are part of the observable contract: the
//! generation backend's output quality depends on the prompt structure, so
//! the template is fixed and snapshot-tested.

/// Everything the prompt needs, fully populated before assembly. Provider
/// fields hold either real data or a sentinel string; there is no partial
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub preferences: String,
    pub city: String,
    pub weather: String,
    pub foursquare: String,
    pub opentripmap: String,
}

/// Pure function of the context: identical input yields byte-identical
/// output.
#[must_use]
pub fn assemble(ctx: &PromptContext) -> String {
    format!(
        "User Preferences: {preferences}\n\
         \n\
         Current weather in {city}:\n\
         - {weather}\n\
         \n\
         Popular places to visit:\n\
         - From Foursquare:\n\
         {foursquare}\n\
         \n\
         - From OpenTripMap:\n\
         {opentripmap}\n\
         \n\
         Now, based on the user's travel preferences, local weather, popular attractions, \
         and nearby flight opportunities, create a personalized day travel plan for {city}. \
         Include both indoor and outdoor suggestions. Also consider whether the user might \
         want to explore nearby destinations or stay local.\n",
        preferences = ctx.preferences,
        city = ctx.city,
        weather = ctx.weather,
        foursquare = ctx.foursquare,
        opentripmap = ctx.opentripmap,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> PromptContext {
        PromptContext {
            preferences: "museums and quiet cafés".to_string(),
            city: "Paris".to_string(),
            weather: "clear sky, 18°C".to_string(),
            foursquare: "Café de Flore - 172 Bd Saint-Germain, Paris".to_string(),
            opentripmap: "Louvre: art museum in Paris".to_string(),
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        let ctx = sample_context();
        assert_eq!(assemble(&ctx), assemble(&ctx));
    }

    #[test]
    fn golden_prompt() {
        let expected = "User Preferences: museums and quiet cafés\n\
            \n\
            Current weather in Paris:\n\
            - clear sky, 18°C\n\
            \n\
            Popular places to visit:\n\
            - From Foursquare:\n\
            Café de Flore - 172 Bd Saint-Germain, Paris\n\
            \n\
            - From OpenTripMap:\n\
            Louvre: art museum in Paris\n\
            \n\
            Now, based on the user's travel preferences, local weather, popular attractions, \
            and nearby flight opportunities, create a personalized day travel plan for Paris. \
            Include both indoor and outdoor suggestions. Also consider whether the user might \
            want to explore nearby destinations or stay local.\n";

        assert_eq!(assemble(&sample_context()), expected);
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let prompt = assemble(&sample_context());

        let preferences = prompt.find("User Preferences:").expect("preferences section");
        let weather = prompt.find("Current weather in").expect("weather section");
        let foursquare = prompt.find("- From Foursquare:").expect("foursquare section");
        let opentripmap = prompt.find("- From OpenTripMap:").expect("opentripmap section");
        let instruction = prompt.find("create a personalized day travel plan").expect("instruction");

        assert!(preferences < weather);
        assert!(weather < foursquare);
        assert!(foursquare < opentripmap);
        assert!(opentripmap < instruction);
    }

    #[test]
    fn sentinel_text_is_embedded_verbatim() {
        let mut ctx = sample_context();
        ctx.foursquare = "No popular places found.".to_string();

        let prompt = assemble(&ctx);
        assert!(prompt.contains("No popular places found."));
    }
}
