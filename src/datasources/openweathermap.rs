use super::WeatherSource;
use crate::config::OpenWeatherMapConfig;
use crate::error::{RainwatchError, Result};
use crate::models::Measurement;
use reqwest::StatusCode;
use serde::Deserialize;

/// City used to probe the API from `rainwatch check`
const PROBE_CITY: &str = "London";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
    clouds: OwmClouds,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64, // Kelvin, no `units` parameter is sent
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: f64, // cloudiness percentage
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self::with_http_client(config, client))
    }

    pub fn with_http_client(config: OpenWeatherMapConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    fn weather_url(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetch current conditions for `city`. One request, no retry.
    pub async fn fetch_current(&self, city: &str) -> Result<Measurement> {
        tracing::debug!("Fetching current weather for {:?}", city);

        let response = self
            .client
            .get(self.weather_url())
            .query(&[("q", city), ("appid", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| RainwatchError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RainwatchError::NotFound(format!("city {:?}", city)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RainwatchError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status,
                truncate(&body, 200)
            )));
        }

        let body = response.text().await.map_err(|e| {
            RainwatchError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
        })?;

        parse_current(&body)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.weather_url())
            .query(&[("q", PROBE_CITY), ("appid", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| RainwatchError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }
}

impl WeatherSource for OpenWeatherMapClient {
    async fn fetch_current(&self, city: &str) -> Result<Measurement> {
        OpenWeatherMapClient::fetch_current(self, city).await
    }
}

fn parse_current(body: &str) -> Result<Measurement> {
    let owm: OwmCurrentResponse = serde_json::from_str(body).map_err(|e| {
        RainwatchError::InvalidData(format!("Failed to parse OpenWeatherMap response: {}", e))
    })?;

    Ok(Measurement::from_kelvin(
        owm.main.humidity,
        owm.clouds.all,
        owm.main.temp,
    ))
}

fn truncate(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        body.to_string()
    } else {
        let head: String = body.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
