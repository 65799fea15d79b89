use crate::{
    Config,
    error::FetchError,
    model::{WeatherQuery, WeatherRecord},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather records.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherRecord, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `clima configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    Ok(Box::new(
        OpenWeatherProvider::new(api_key.to_owned())
            .with_base_url(config.base_url())
            .with_lang(config.lang()),
    ))
}
