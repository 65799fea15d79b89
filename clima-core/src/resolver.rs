//! Turns a user trigger (startup or a city search) into one weather request and
//! stores the result.
//!
//! Failures never reach the screen. The infallible `resolve_*` methods log
//! them and leave the displayed state as it was.

use crate::{
    error::ResolveError,
    location::LocationSource,
    model::{WeatherQuery, WeatherRecord},
    provider::WeatherProvider,
    state::{ApplyResult, DisplayState, Ticket, WeatherStore},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The record is now displayed.
    Applied(WeatherRecord),
    /// Fetched fine, but a newer request had already been applied.
    Stale,
    /// Nothing to do (empty search).
    Skipped,
    /// The request failed; the error was logged.
    Failed,
}

#[derive(Debug)]
pub struct Resolver {
    provider: Box<dyn WeatherProvider>,
    location: Box<dyn LocationSource>,
    store: WeatherStore,
}

impl Resolver {
    pub fn new(provider: Box<dyn WeatherProvider>, location: Box<dyn LocationSource>) -> Self {
        Self {
            provider,
            location,
            store: WeatherStore::new(),
        }
    }

    pub fn snapshot(&self) -> DisplayState {
        self.store.snapshot()
    }

    pub async fn resolve_by_device(&self) -> Outcome {
        swallow("device location", self.try_resolve_by_device().await)
    }

    pub async fn resolve_by_name(&self, city: &str) -> Outcome {
        swallow("city search", self.try_resolve_by_name(city).await)
    }

    pub async fn try_resolve_by_device(&self) -> Result<Outcome, ResolveError> {
        let ticket = self.store.issue();

        let coords = self.location.current_position().await?;
        tracing::debug!(%coords, ticket = ticket.sequence(), "Resolved device position");

        self.fetch_and_apply(ticket, WeatherQuery::Coordinates(coords))
            .await
    }

    /// Empty input is not an error; it simply declines to act. Anything else is
    /// sent exactly as typed.
    pub async fn try_resolve_by_name(&self, city: &str) -> Result<Outcome, ResolveError> {
        if city.is_empty() {
            tracing::debug!("Empty city query, skipping request");
            return Ok(Outcome::Skipped);
        }

        let ticket = self.store.issue();
        self.fetch_and_apply(ticket, WeatherQuery::City(city.to_string()))
            .await
    }

    async fn fetch_and_apply(
        &self,
        ticket: Ticket,
        query: WeatherQuery,
    ) -> Result<Outcome, ResolveError> {
        let record = self.provider.current(&query).await?;

        match self.store.apply(ticket, record.clone()) {
            ApplyResult::Applied => {
                tracing::info!(
                    location = %record.location_name,
                    temp = record.temperature.current,
                    ticket = ticket.sequence(),
                    "Weather updated"
                );
                Ok(Outcome::Applied(record))
            }
            ApplyResult::Stale => {
                tracing::debug!(%query, ticket = ticket.sequence(), "Discarding stale response");
                Ok(Outcome::Stale)
            }
        }
    }
}

fn swallow(operation: &str, result: Result<Outcome, ResolveError>) -> Outcome {
    result.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "{operation} failed");
        Outcome::Failed
    })
}
