use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clima_core::{
    Config, LocationMode, Outcome, Resolver, ScreenModel,
    location::{FixedLocation, LocationSource, location_from_config},
    model::Coordinates,
    provider_from_config,
};
use inquire::{InquireError, Password, Select, Text, validator::Validation};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "clima",
    version,
    about = "Current weather for your location or a searched city"
)]
pub struct Cli {
    /// Read configuration from this file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the API key, language and location mode.
    Configure,

    /// Fetch once, draw the screen and exit.
    Show {
        /// City name to search for; uses the device location when absent.
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        city: Option<String>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = match &self.config {
            Some(path) => path.clone(),
            None => Config::config_file_path()?,
        };
        tracing::debug!(path = %config_path.display(), "Loading configuration");
        let mut config = Config::load_from(&config_path)?;

        match self.command {
            Some(Command::Configure) => configure(config, self.config),
            Some(Command::Show { city, lat, lon }) => {
                config.apply_env();
                let location = match (lat, lon) {
                    (Some(lat), Some(lon)) => {
                        Box::new(FixedLocation(Coordinates::new(lat, lon))) as Box<dyn LocationSource>
                    }
                    _ => location_from_config(&config),
                };
                let resolver = Resolver::new(provider_from_config(&config)?, location);

                let outcome = match city {
                    Some(city) => resolver.resolve_by_name(&city).await,
                    None => resolver.resolve_by_device().await,
                };
                tracing::debug!(outcome = outcome_label(&outcome), "Show finished");

                render::print_screen(&ScreenModel::from_state(&resolver.snapshot()))?;
                Ok(())
            }
            None => {
                config.apply_env();
                let resolver =
                    Resolver::new(provider_from_config(&config)?, location_from_config(&config));
                interactive(resolver).await
            }
        }
    }
}

/// Startup resolves the device position, then every submitted city replaces
/// the screen. Esc or Ctrl-C leaves.
async fn interactive(resolver: Resolver) -> anyhow::Result<()> {
    let outcome = resolver.resolve_by_device().await;
    tracing::debug!(outcome = outcome_label(&outcome), "Startup resolution finished");
    render::print_screen(&ScreenModel::from_state(&resolver.snapshot()))?;

    loop {
        let city = match Text::new("Cidade")
            .with_help_message("Enter para buscar, Esc para sair")
            .prompt()
        {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        let outcome = resolver.resolve_by_name(&city).await;
        tracing::debug!(%city, outcome = outcome_label(&outcome), "Search finished");
        render::print_screen(&ScreenModel::from_state(&resolver.snapshot()))?;
    }

    Ok(())
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Applied(_) => "applied",
        Outcome::Stale => "stale",
        Outcome::Skipped => "skipped",
        Outcome::Failed => "failed",
    }
}

fn configure(mut config: Config, path: Option<PathBuf>) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_validator(|input: &str| {
            Ok(if input.trim().is_empty() {
                Validation::Invalid("API key cannot be empty".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let lang = Text::new("Language tag sent to the API:")
        .with_default(config.lang())
        .prompt()
        .context("Failed to read language")?;
    config.lang = Some(lang.trim().to_string());

    let mode = Select::new("Location source:", LocationMode::all().to_vec())
        .prompt()
        .context("Failed to read location mode")?;

    if mode == LocationMode::Fixed {
        let latitude = prompt_degrees("Latitude:", 90.0)?;
        let longitude = prompt_degrees("Longitude:", 180.0)?;
        config.set_fixed_location(Coordinates::new(latitude, longitude));
    } else {
        config.location.mode = mode;
    }

    let saved_to = match path {
        Some(path) => {
            config.save_to(&path)?;
            path
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}

fn prompt_degrees(label: &str, limit: f64) -> anyhow::Result<f64> {
    let raw = Text::new(label)
        .with_validator(move |input: &str| {
            Ok(match input.trim().parse::<f64>() {
                Ok(v) if v.abs() <= limit => Validation::Valid,
                Ok(_) => Validation::Invalid(format!("Must be between -{limit} and {limit}").into()),
                Err(_) => Validation::Invalid("Not a number".into()),
            })
        })
        .prompt()
        .with_context(|| format!("Failed to read {label}"))?;

    raw.trim()
        .parse()
        .with_context(|| format!("Invalid value for {label}"))
}
