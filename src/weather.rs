//! Destination weather: OpenMeteo geocoding and current temperature, plus a
//! deterministic simulated source that needs no network.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::PackwiseError;
use crate::cache::PersistentCache;
use crate::config::WeatherConfig;
use crate::http;
use crate::models::Location;

/// Autocomplete is only attempted from this many characters on
pub const MIN_AUTOCOMPLETE_CHARS: usize = 3;

const TEMPERATURE_TTL: Duration = Duration::from_secs(60 * 60);

/// Geocoding, place suggestions and current temperature
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Place suggestions for partial input
    async fn autocomplete(&self, query: &str) -> Result<Vec<String>>;
    /// Resolve free text to coordinates
    async fn geocode(&self, address: &str) -> Result<Location>;
    /// Current air temperature in Celsius
    async fn current_temperature(&self, latitude: f64, longitude: f64) -> Result<f64>;
}

/// OpenMeteo client (no API key required)
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    config: WeatherConfig,
    cache: Option<PersistentCache>,
}

impl OpenMeteoClient {
    /// Create a new client from the weather configuration
    pub fn new(config: WeatherConfig, cache: Option<PersistentCache>) -> Result<Self> {
        let client = http::build_client(config.timeout_seconds, config.max_retries)?;
        Ok(Self {
            client,
            config,
            cache,
        })
    }

    async fn search(&self, name: &str, count: u8) -> Result<Vec<openmeteo::GeocodingResult>> {
        let url = format!(
            "{}/search?name={}&count={}&language=en&format=json",
            self.config.geocoding_url.trim_end_matches('/'),
            urlencoding::encode(name),
            count
        );
        debug!("OpenMeteo geocoding request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PackwiseError::api(format!("Geocoding request failed: {e}")))?
            .error_for_status()
            .map_err(|e| PackwiseError::api(format!("Geocoding request rejected: {e}")))?;

        let body: openmeteo::GeocodingResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo geocoding response")?;

        Ok(body.results.unwrap_or_default())
    }

    /// Cache TTL with jitter so entries written together do not expire together
    fn geocode_ttl(&self) -> Duration {
        let jitter: f32 = rand::rng().random_range(0.9..1.1);
        Duration::from_secs((f64::from(self.config.cache_ttl_hours) * 3600.0 * f64::from(jitter)) as u64)
    }

    async fn cached<T>(&self, key: &str) -> Option<T>
    where
        T: serde::de::DeserializeOwned + Send + 'static,
    {
        let cache = self.cache.as_ref()?;
        match cache.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache read failed for '{}': {}", key, e);
                None
            }
        }
    }

    async fn remember<T>(&self, key: &str, value: T, ttl: Duration)
    where
        T: Serialize + Send + std::fmt::Debug + 'static,
    {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(key, value, ttl).await {
                warn!("Cache write failed for '{}': {}", key, e);
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn autocomplete(&self, query: &str) -> Result<Vec<String>> {
        let query = query.trim();
        if query.chars().count() < MIN_AUTOCOMPLETE_CHARS {
            return Ok(Vec::new());
        }

        let mut suggestions: Vec<String> = Vec::new();
        for result in self.search(query, 5).await? {
            let label = result.label();
            if !suggestions.contains(&label) {
                suggestions.push(label);
            }
        }

        debug!("Found {} suggestions for '{}'", suggestions.len(), query);
        Ok(suggestions)
    }

    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Location> {
        let key = format!("geocode:{}", address.trim().to_lowercase());
        if let Some(location) = self.cached::<Location>(&key).await {
            return Ok(location);
        }

        let location: Location = self
            .search(address.trim(), 1)
            .await?
            .into_iter()
            .next()
            .map(Into::into)
            .ok_or_else(|| PackwiseError::api(format!("Location not found: {address}")))?;

        info!(
            "Geocoded '{}' to {} ({})",
            address,
            location.name,
            location.format_coordinates()
        );
        self.remember(&key, location.clone(), self.geocode_ttl()).await;
        Ok(location)
    }

    #[instrument(skip(self))]
    async fn current_temperature(&self, latitude: f64, longitude: f64) -> Result<f64> {
        let key = Location::new(latitude, longitude, String::new()).temperature_cache_key();
        if let Some(temperature) = self.cached::<f64>(&key).await {
            return Ok(temperature);
        }

        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m",
            self.config.forecast_url.trim_end_matches('/'),
            latitude,
            longitude
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PackwiseError::api(format!("Weather request failed: {e}")))?
            .error_for_status()
            .map_err(|e| PackwiseError::api(format!("Weather request rejected: {e}")))?;

        let forecast: openmeteo::ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo forecast response")?;

        let temperature = forecast
            .current
            .map(|current| f64::from(current.temperature))
            .ok_or_else(|| PackwiseError::api("No current weather data available from OpenMeteo"))?;

        self.remember(&key, temperature, TEMPERATURE_TTL).await;
        Ok(temperature)
    }
}

/// `OpenMeteo` API response structures
mod openmeteo {
    use super::Location;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: f32,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
        pub admin1: Option<String>,
    }

    impl GeocodingResult {
        /// "Name, Region, Country" with missing parts skipped
        pub fn label(&self) -> String {
            [Some(&self.name), self.admin1.as_ref(), self.country.as_ref()]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    impl From<GeocodingResult> for Location {
        fn from(result: GeocodingResult) -> Self {
            let name = result.label();
            match result.country {
                Some(country) => Location::with_country(result.latitude, result.longitude, name, country),
                None => Location::new(result.latitude, result.longitude, name),
            }
        }
    }
}

/// Coarse temperature band of a simulated reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimateBand {
    Cold,
    Moderate,
    Warm,
    Hot,
}

impl ClimateBand {
    #[must_use]
    pub fn from_celsius(celsius: f64) -> Self {
        if celsius < 10.0 {
            ClimateBand::Cold
        } else if celsius < 21.0 {
            ClimateBand::Moderate
        } else if celsius < 29.0 {
            ClimateBand::Warm
        } else {
            ClimateBand::Hot
        }
    }
}

/// Weather reading derived from the location text alone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedWeather {
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
    pub band: ClimateBand,
}

/// Deterministic stand-in for a weather lookup.
///
/// The UTF-16 code units of `location` are summed; the sum picks a temperature
/// between -5 and 34 °C and a condition consistent with its band.
#[must_use]
pub fn simulate_weather(location: &str) -> SimulatedWeather {
    let hash: u64 = location.encode_utf16().map(u64::from).sum();
    let temperature = (hash % 40) as f64 - 5.0;
    let band = ClimateBand::from_celsius(temperature);

    let (condition, icon) = match band {
        ClimateBand::Cold if hash % 2 == 0 => ("Snow", "13d"),
        ClimateBand::Cold => ("Clear", "01d"),
        ClimateBand::Moderate => match hash % 3 {
            0 => ("Clouds", "03d"),
            1 => ("Rain", "10d"),
            _ => ("Clear", "01d"),
        },
        ClimateBand::Warm | ClimateBand::Hot => match hash % 4 {
            0 => ("Clouds", "03d"),
            1 => ("Rain", "10d"),
            _ => ("Clear", "01d"),
        },
    };

    SimulatedWeather {
        temperature,
        condition: condition.to_string(),
        icon: icon.to_string(),
        band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-5.0, ClimateBand::Cold)]
    #[case(9.9, ClimateBand::Cold)]
    #[case(10.0, ClimateBand::Moderate)]
    #[case(20.5, ClimateBand::Moderate)]
    #[case(21.0, ClimateBand::Warm)]
    #[case(29.0, ClimateBand::Hot)]
    fn test_climate_bands(#[case] celsius: f64, #[case] expected: ClimateBand) {
        assert_eq!(ClimateBand::from_celsius(celsius), expected);
    }

    #[test]
    fn test_simulated_weather_is_deterministic() {
        assert_eq!(simulate_weather("Reykjavik"), simulate_weather("Reykjavik"));
    }

    #[test]
    fn test_simulated_temperature_from_character_sum() {
        // 'A' + 'B' = 65 + 66 = 131; 131 % 40 = 11; 11 - 5 = 6
        let weather = simulate_weather("AB");
        assert_eq!(weather.temperature, 6.0);
        assert_eq!(weather.band, ClimateBand::Cold);
        // 131 is odd
        assert_eq!(weather.condition, "Clear");
    }

    #[test]
    fn test_simulated_moderate_condition() {
        // 'a' = 97; 97 % 40 = 17; 17 - 5 = 12 (moderate); 97 % 3 = 1 -> Rain
        let weather = simulate_weather("a");
        assert_eq!(weather.temperature, 12.0);
        assert_eq!(weather.band, ClimateBand::Moderate);
        assert_eq!(weather.condition, "Rain");
        assert_eq!(weather.icon, "10d");
    }

    #[test]
    fn test_simulated_weather_sums_utf16_units() {
        // U+1F600 is the surrogate pair 0xD83D 0xDE00; 112189 % 40 = 29 -> 24 (warm); 112189 % 4 = 1 -> Rain
        let weather = simulate_weather("\u{1F600}");
        assert_eq!(weather.temperature, 24.0);
        assert_eq!(weather.band, ClimateBand::Warm);
        assert_eq!(weather.condition, "Rain");
        assert_eq!(weather.icon, "10d");
    }

    #[test]
    fn test_simulated_range() {
        for place in ["", "Bali", "Tromso", "Ouagadougou", "São Paulo"] {
            let weather = simulate_weather(place);
            assert!((-5.0..=34.0).contains(&weather.temperature), "{place}");
        }
    }

    #[test]
    fn test_geocoding_result_label_and_location() {
        let result = openmeteo::GeocodingResult {
            name: "Reykjavík".to_string(),
            latitude: 64.1355,
            longitude: -21.8954,
            country: Some("Iceland".to_string()),
            admin1: Some("Capital Region".to_string()),
        };
        assert_eq!(result.label(), "Reykjavík, Capital Region, Iceland");

        let location: Location = result.into();
        assert_eq!(location.country.as_deref(), Some("Iceland"));
        assert_eq!(location.latitude, 64.1355);
    }

    #[test]
    fn test_forecast_response_parsing() {
        let json = r#"{"latitude":25.77,"longitude":-80.19,"current":{"time":"2024-06-01T12:00","interval":900,"temperature_2m":31.4}}"#;
        let response: openmeteo::ForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.current.unwrap().temperature, 31.4);
    }

    #[tokio::test]
    async fn test_short_autocomplete_queries_skip_the_network() {
        let config = crate::config::PackwiseConfig::default().weather;
        let client = OpenMeteoClient::new(config, None).unwrap();
        assert!(client.autocomplete("ba").await.unwrap().is_empty());
        assert!(client.autocomplete("  r ").await.unwrap().is_empty());
    }
}
