//! Open-Meteo weather client
//!
//! Fetches current conditions and the daily outlook for one coordinate and
//! normalizes them into a [`WeatherReading`].

use std::time::Instant;

use anyhow::{Context, Result};
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, info, instrument, warn};

use crate::CommuteError;
use crate::config::ProvidersConfig;
use crate::http::join_url;
use crate::models::WeatherReading;

const CURRENT_FIELDS: &str = "temperature_2m,precipitation,weather_code,precipitation_probability";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

#[derive(Clone)]
pub struct WeatherClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl WeatherClient {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: &ProvidersConfig) -> Self {
        Self {
            client,
            base_url: config.weather_base_url.clone(),
        }
    }

    fn forecast_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}?latitude={lat}&longitude={lon}&current={CURRENT_FIELDS}&daily={DAILY_FIELDS}&timezone=auto",
            join_url(&self.base_url, "forecast")
        )
    }

    /// Current conditions and daily forecast for a coordinate
    #[instrument(skip(self))]
    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherReading> {
        let start_time = Instant::now();
        let url = self.forecast_url(lat, lon);
        debug!("Open-Meteo request URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CommuteError::api(format!("Weather request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommuteError::api(format!("Weather provider returned {status}")).into());
        }

        let forecast_response: openmeteo::ForecastResponse = response
            .json()
            .await
            .map_err(|e| CommuteError::api(format!("Invalid weather data: {e}")))
            .with_context(|| format!("Failed to parse Open-Meteo response for {lat:.4},{lon:.4}"))?;

        let reading = forecast_response.into_reading()?;

        let elapsed = start_time.elapsed();
        info!(
            "Weather: {:.1}°C, code {}, precipitating={} ({} forecast days) in {:.3}s",
            reading.temperature,
            reading.weather_code,
            reading.is_precipitating,
            reading.daily.len(),
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow weather response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(reading)
    }
}

/// `OpenMeteo` API response structures and conversion
mod openmeteo {
    use chrono::NaiveDate;
    use serde::Deserialize;

    use crate::CommuteError;
    use crate::models::weather::is_precipitating;
    use crate::models::{DailyForecast, WeatherReading};

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
        pub daily: Option<DailyData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: f32,
        #[serde(default)]
        pub precipitation: Option<f32>,
        pub weather_code: u8,
        #[serde(default)]
        pub precipitation_probability: Option<f32>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        pub time: Vec<NaiveDate>,
        #[serde(default)]
        pub weather_code: Vec<Option<u8>>,
        #[serde(rename = "temperature_2m_max", default)]
        pub temperature_max: Vec<Option<f32>>,
        #[serde(rename = "temperature_2m_min", default)]
        pub temperature_min: Vec<Option<f32>>,
    }

    impl DailyData {
        /// Days with a missing value are skipped rather than padded
        fn into_days(self) -> Vec<DailyForecast> {
            self.time
                .into_iter()
                .enumerate()
                .filter_map(|(i, date)| {
                    Some(DailyForecast {
                        date,
                        weather_code: self.weather_code.get(i).copied().flatten()?,
                        temperature_max: self.temperature_max.get(i).copied().flatten()?,
                        temperature_min: self.temperature_min.get(i).copied().flatten()?,
                    })
                })
                .collect()
        }
    }

    impl ForecastResponse {
        pub fn into_reading(self) -> Result<WeatherReading, CommuteError> {
            let current = self.current.ok_or_else(|| {
                CommuteError::api("No current weather data available from Open-Meteo")
            })?;

            let precipitation_probability = current
                .precipitation_probability
                .map_or(0, |p| p.clamp(0.0, 100.0).round() as u8);

            Ok(WeatherReading {
                temperature: current.temperature,
                precipitation_probability,
                weather_code: current.weather_code,
                is_precipitating: is_precipitating(
                    current.weather_code,
                    current.precipitation.unwrap_or(0.0),
                ),
                daily: self.daily.map(DailyData::into_days).unwrap_or_default(),
            })
        }
    }

}
