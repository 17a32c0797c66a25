use tracing::debug;

use crate::{
    model::{LookupFailure, WeatherViewModel},
    provider::WeatherProvider,
};

/// The fetch-parse-validate pipeline: free-text city in, normalized
/// view-model or classified failure out.
///
/// Holds no state across calls; repeated identical lookups issue repeated
/// identical requests. The sole suspension point is the provider call.
#[derive(Debug)]
pub struct WeatherQueryService<P> {
    provider: P,
}

impl<P: WeatherProvider> WeatherQueryService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Look up current conditions for `raw_city_name`.
    ///
    /// A query that trims to nothing fails with [`LookupFailure::EmptyQuery`]
    /// before any network access. Every completed call resolves to exactly
    /// one of a view-model or a failure.
    pub async fn lookup(&self, raw_city_name: &str) -> Result<WeatherViewModel, LookupFailure> {
        let city = raw_city_name.trim();
        if city.is_empty() {
            debug!("rejecting empty query without a request");
            return Err(LookupFailure::EmptyQuery);
        }

        self.provider.current_weather(city).await
    }
}
