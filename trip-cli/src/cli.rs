use anyhow::Context;
use clap::{Parser, Subcommand};
use trip_core::{Config, ProviderId, TripPlanner};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "trip", version, about = "Travel day-plan CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name: "openweather", "opentripmap", "foursquare" or "gemini".
        provider: String,
    },

    /// Generate a personalized day plan for a city.
    Plan {
        /// Destination city, e.g. "Paris".
        city: String,

        /// Free-text traveler preferences, e.g. "museums and quiet cafés".
        #[arg(long)]
        preferences: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => {
                let id = ProviderId::try_from(provider.as_str())?;
                configure(id)
            }
            Command::Plan { city, preferences } => {
                let config = Config::load().context("Failed to load configuration")?;
                let planner = TripPlanner::from_config(&config);

                let suggestion = planner.plan(&city, &preferences).await?;
                println!("{suggestion}");

                Ok(())
            }
        }
    }
}

/// Prompt for the provider's API key and persist it.
fn configure(id: ProviderId) -> anyhow::Result<()> {
    let api_key = inquire::Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    // File-only load: env-sourced keys must not end up in the saved file.
    let mut config = Config::load_file().context("Failed to load configuration")?;
    config.upsert_provider_api_key(id, api_key.trim().to_string());
    config.save().context("Failed to save configuration")?;

    println!("Saved API key for '{id}' to {}", Config::config_file_path()?.display());
    println!("Tip: the {} environment variable overrides the stored key.", id.env_var());

    Ok(())
}
