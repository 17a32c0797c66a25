use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::{
    config::ProviderSettings,
    model::{LookupFailure, WeatherViewModel},
};

use super::WeatherProvider;

/// Fixed response-language tag sent with every request.
const LANG: &str = "pt_br";

/// Explicit per-request timeout; the client never waits unbounded.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// Display URL for a provider icon token. Pure string formatting,
/// no network effect.
pub fn icon_display_url(icon_id: &str) -> String {
    format!("{ICON_URL_BASE}/{icon_id}@2x.png")
}

/// Client for the OpenWeather current-conditions endpoint.
///
/// Wire contract:
/// `GET <base>?q=<city>&appid=<key>&units=metric&lang=pt_br`, answered by
/// a JSON payload whose embedded `cod` field signals success (200)
/// independently of the HTTP status line.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            api_key: settings.api_key,
            base_url: settings.base_url,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherViewModel, LookupFailure> {
        debug!(city, "requesting current weather");

        // `query` percent-encodes the city name.
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", LANG),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;

        let body = res.text().await.map_err(transport)?;

        let outcome = classify_body(&body);
        match &outcome {
            Ok(vm) => debug!(city = %vm.city, "lookup succeeded"),
            Err(failure) => debug!(%failure, "lookup failed"),
        }

        outcome
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherViewModel, LookupFailure> {
        self.fetch_current(city).await
    }
}

/// The request URL carries the `appid` credential; strip it before the
/// error text can reach a caller.
fn transport(err: reqwest::Error) -> LookupFailure {
    LookupFailure::TransportError(err.without_url().to_string())
}

/// Provider status embedded in the payload. Numeric on success, but the
/// error responses ship it as a string ("404"), so both spellings parse.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCod {
    Number(i64),
    Text(String),
}

impl OwCod {
    fn is_success(&self) -> bool {
        match self {
            OwCod::Number(n) => *n == 200,
            OwCod::Text(s) => s == "200",
        }
    }
}

impl fmt::Display for OwCod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwCod::Number(n) => write!(f, "{n}"),
            OwCod::Text(s) => f.write_str(s),
        }
    }
}

/// Minimal envelope read first: rejection bodies carry little beyond
/// `cod` and `message`, so the full payload shape must not be required
/// to classify them.
#[derive(Debug, Deserialize)]
struct OwStatus {
    cod: OwCod,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_max: f64,
    temp_min: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
}

/// Turn a raw response body into the lookup outcome.
///
/// Classification order matters: a body that is not provider JSON at all
/// is a transport failure, a readable body with a non-success `cod` is a
/// provider rejection, and only a success `cod` proceeds to field
/// extraction. No partial view-model is ever produced.
fn classify_body(body: &str) -> Result<WeatherViewModel, LookupFailure> {
    let status: OwStatus = serde_json::from_str(body)
        .map_err(|e| LookupFailure::TransportError(format!("unreadable provider response: {e}")))?;

    if !status.cod.is_success() {
        let reason = status
            .message
            .unwrap_or_else(|| format!("provider status {}", status.cod));
        return Err(LookupFailure::ProviderRejected(reason));
    }

    let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(|e| {
        LookupFailure::TransportError(format!("malformed provider success payload: {e}"))
    })?;

    // Provider contract: a success payload carries at least one condition
    // entry, and the first one is the displayed condition.
    let condition = parsed.weather.into_iter().next().ok_or_else(|| {
        LookupFailure::TransportError("success payload carried no condition entries".to_string())
    })?;

    Ok(WeatherViewModel {
        city: parsed.name,
        country_code: parsed.sys.country,
        temperature_c: parsed.main.temp,
        temperature_max_c: parsed.main.temp_max,
        temperature_min_c: parsed.main.temp_min,
        description: condition.description,
        icon_id: condition.icon,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON_BODY: &str = r#"{
        "cod": 200,
        "name": "London",
        "sys": { "country": "GB" },
        "main": { "temp": 15.0, "temp_max": 16.0, "temp_min": 14.0, "humidity": 60 },
        "weather": [ { "description": "clear sky", "icon": "01d" } ],
        "wind": { "speed": 3.5 }
    }"#;

    #[test]
    fn success_body_normalizes_all_fields() {
        let vm = classify_body(LONDON_BODY).expect("success payload");

        assert_eq!(vm.city, "London");
        assert_eq!(vm.country_code, "GB");
        assert_eq!(vm.temperature_c, 15.0);
        assert_eq!(vm.temperature_max_c, 16.0);
        assert_eq!(vm.temperature_min_c, 14.0);
        assert_eq!(vm.description, "clear sky");
        assert_eq!(vm.icon_id, "01d");
        assert_eq!(vm.humidity_pct, 60);
        assert_eq!(vm.wind_speed_mps, 3.5);
    }

    #[test]
    fn classification_is_deterministic() {
        let a = classify_body(LONDON_BODY).expect("success payload");
        let b = classify_body(LONDON_BODY).expect("success payload");
        assert_eq!(a, b);
    }

    #[test]
    fn second_entry_in_condition_list_is_ignored() {
        let body = r#"{
            "cod": 200,
            "name": "London",
            "sys": { "country": "GB" },
            "main": { "temp": 15.0, "temp_max": 16.0, "temp_min": 14.0, "humidity": 60 },
            "weather": [
                { "description": "clear sky", "icon": "01d" },
                { "description": "mist", "icon": "50d" }
            ],
            "wind": { "speed": 3.5 }
        }"#;

        let vm = classify_body(body).expect("success payload");
        assert_eq!(vm.description, "clear sky");
        assert_eq!(vm.icon_id, "01d");
    }

    #[test]
    fn string_cod_rejection_maps_to_provider_rejected() {
        let body = r#"{ "cod": "404", "message": "city not found" }"#;
        let failure = classify_body(body).unwrap_err();

        assert!(failure.is_provider_rejected());
        assert!(failure.to_string().contains("city not found"));
    }

    #[test]
    fn numeric_cod_rejection_without_message_names_the_status() {
        let body = r#"{ "cod": 429 }"#;
        let failure = classify_body(body).unwrap_err();

        assert!(failure.is_provider_rejected());
        assert!(failure.to_string().contains("429"));
    }

    #[test]
    fn non_json_body_is_a_transport_failure() {
        let failure = classify_body("<html>bad gateway</html>").unwrap_err();
        assert!(failure.is_transport());
    }

    #[test]
    fn truncated_success_payload_is_a_transport_failure() {
        // Success cod but the nested fields are missing.
        let failure = classify_body(r#"{ "cod": 200, "name": "London" }"#).unwrap_err();
        assert!(failure.is_transport());
    }

    #[test]
    fn icon_display_url_is_pure_formatting() {
        let first = icon_display_url("01d");
        let second = icon_display_url("01d");

        assert_eq!(first, "https://openweathermap.org/img/wn/01d@2x.png");
        assert_eq!(first, second);
    }
}
