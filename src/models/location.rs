//! Location model for geographic coordinates and metadata

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::CommuteError;

/// Label given to locations picked by raw coordinates
pub const CUSTOM_PIN_LABEL: &str = "Custom Pin";

/// A saved place: home or work
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(rename = "lon")]
    pub longitude: f64,
    /// Display label chosen by the user (e.g. "Empire State Building")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Location {
    /// Create an unlabelled location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(latitude: f64, longitude: f64, label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            label: Some(label.into()),
        }
    }

    /// A location dropped directly on the map
    #[must_use]
    pub fn pin(latitude: f64, longitude: f64) -> Self {
        Self::with_label(latitude, longitude, CUSTOM_PIN_LABEL)
    }

    /// Label, or `fallback` when none was set
    #[must_use]
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(fallback)
    }

    /// Check coordinate ranges
    pub fn validate(&self) -> Result<(), CommuteError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CommuteError::validation(format!(
                "Latitude must be between -90 and 90, got: {}",
                self.latitude
            )));
        }

        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CommuteError::validation(format!(
                "Longitude must be between -180 and 180, got: {}",
                self.longitude
            )));
        }

        Ok(())
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Round coordinates for cache key generation
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }

    /// Generate cache key fragment for this location
    #[must_use]
    pub fn to_key(&self) -> String {
        let (lat, lon) = self.rounded_coordinates(4);
        format!("{lat:.4},{lon:.4}")
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label} ({})", self.format_coordinates()),
            None => write!(f, "{}", self.format_coordinates()),
        }
    }
}
