use reqwest::StatusCode;

/// Failures while determining the device position.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location is disabled")]
    Disabled,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
    #[error("Location lookup failed: {0}")]
    Network(#[source] reqwest::Error),
}

/// Failures while fetching a weather record.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Weather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Anything that can stop a resolve operation from producing a record.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
