use crate::model::{LookupFailure, WeatherViewModel};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Backend seam for the lookup pipeline.
///
/// `city` arrives already trimmed and non-empty; the service owns the
/// empty-query fast path. One implementation talks to OpenWeather; tests
/// substitute stubs.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherViewModel, LookupFailure>;
}
