//! Core library for the city weather lookup.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The fetch-parse-validate lookup pipeline and its failure taxonomy
//! - The OpenWeather wire client
//! - A generation-checked state holder for host UIs
//!
//! It is used by `weather-cli`, but can also be reused by other frontends.

pub mod config;
pub mod model;
pub mod provider;
pub mod service;
pub mod state;

pub use config::{Config, ProviderSettings};
pub use model::{LookupFailure, WeatherViewModel};
pub use provider::WeatherProvider;
pub use provider::openweather::{OpenWeatherProvider, icon_display_url};
pub use service::WeatherQueryService;
pub use state::{Generation, LookupState, LookupTracker};
