//! Weather reading model and display helpers

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// WMO codes that count as precipitation: drizzle, rain, showers, thunderstorms
pub const PRECIPITATION_CODES: [u8; 12] = [51, 53, 55, 61, 63, 65, 80, 81, 82, 95, 96, 99];

/// Current conditions plus the daily outlook for one coordinate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReading {
    /// Temperature in Celsius
    pub temperature: f32,
    /// Precipitation probability (0-100)
    pub precipitation_probability: u8,
    /// WMO weather interpretation code
    pub weather_code: u8,
    pub is_precipitating: bool,
    /// One entry per forecast day, today first
    pub daily: Vec<DailyForecast>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weather_code: u8,
    pub temperature_max: f32,
    pub temperature_min: f32,
}

/// Coarse icon class for a weather code
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConditionIcon {
    Sun,
    Cloud,
    Rain,
    Snow,
}

/// Whether current readings count as precipitation
#[must_use]
pub fn is_precipitating(weather_code: u8, precipitation_mm: f32) -> bool {
    PRECIPITATION_CODES.contains(&weather_code) || precipitation_mm > 0.0
}

impl ConditionIcon {
    /// Icon for a forecast day
    #[must_use]
    pub fn for_code(code: u8) -> Self {
        match code {
            71..=u8::MAX => ConditionIcon::Snow,
            51..=70 => ConditionIcon::Rain,
            3..=50 => ConditionIcon::Cloud,
            _ => ConditionIcon::Sun,
        }
    }

    /// Icon for current conditions, rain wins over the code
    #[must_use]
    pub fn for_current(reading: &WeatherReading) -> Self {
        if reading.is_precipitating {
            ConditionIcon::Rain
        } else if reading.weather_code > 2 {
            ConditionIcon::Cloud
        } else {
            ConditionIcon::Sun
        }
    }
}

impl WeatherReading {
    #[must_use]
    pub fn summary(&self) -> &'static str {
        if self.is_precipitating {
            "Rainy & Wet"
        } else {
            "Clear Skies"
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        weather_code_to_description(self.weather_code)
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.0}°C", self.temperature)
    }
}

impl DailyForecast {
    /// "Today" for the first entry, short weekday name otherwise
    #[must_use]
    pub fn day_label(&self, index: usize) -> String {
        if index == 0 {
            "Today".to_string()
        } else {
            self.date.weekday().to_string()
        }
    }
}

/// Convert WMO weather code to human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
