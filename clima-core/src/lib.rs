//! Core library for the `clima` weather screen.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over weather providers and device location
//! - The display state and the resolver that fills it
//! - Pure presentation mapping (palette, condition image, view model)
//!
//! It is used by `clima-cli`, but can also back other front-ends.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod resolver;
pub mod state;

pub use config::{Config, LocationMode};
pub use error::{FetchError, LocationError, ResolveError};
pub use location::{LocationSource, location_from_config};
pub use model::{Coordinates, WeatherQuery, WeatherRecord};
pub use presentation::{Asset, Palette, ScreenModel, select_gradient, select_image};
pub use provider::{WeatherProvider, provider_from_config};
pub use resolver::{Outcome, Resolver};
pub use state::{DisplayState, WeatherStore};
