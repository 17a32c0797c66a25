use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized result of one successful lookup.
///
/// Built in one piece from a success payload and never patched afterwards;
/// the next lookup replaces it entirely or clears it on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherViewModel {
    /// Display name the provider returned for the query.
    pub city: String,
    /// Two-letter country code.
    pub country_code: String,
    pub temperature_c: f64,
    pub temperature_max_c: f64,
    pub temperature_min_c: f64,
    /// Free-text condition label in the fixed response language.
    pub description: String,
    /// Opaque provider icon token, only ever used to build a display URL.
    pub icon_id: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// Why a lookup produced no view-model.
///
/// All cases are recoverable from the caller's side; the service never
/// panics or raises past its boundary.
#[derive(Debug, Clone, Error)]
pub enum LookupFailure {
    /// The query trimmed to nothing. Detected locally, no request is sent.
    #[error("a city name is required")]
    EmptyQuery,

    /// The provider answered but declined the query (unknown city etc.).
    #[error("provider rejected the lookup: {0}")]
    ProviderRejected(String),

    /// Network failure or a body that could not be read as provider JSON.
    #[error("transport failure: {0}")]
    TransportError(String),
}

impl LookupFailure {
    pub fn is_empty_query(&self) -> bool {
        matches!(self, Self::EmptyQuery)
    }

    pub fn is_provider_rejected(&self) -> bool {
        matches!(self, Self::ProviderRejected(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }
}
