//! Route model for a single travel mode between two locations

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CommuteError;

/// OSRM routing profile
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    Cycling,
}

impl TravelMode {
    /// Path segment used by the routing provider
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Cycling => "cycling",
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "cycling" => Ok(TravelMode::Cycling),
            other => Err(CommuteError::validation(format!("Unknown travel mode: {other}"))),
        }
    }
}

/// GeoJSON LineString, `[lon, lat]` pairs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RouteGeometry {
    #[serde(rename = "type", default = "line_string")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

fn line_string() -> String {
    "LineString".to_string()
}

/// Distance/duration/geometry of one route
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteResult {
    /// Distance in meters
    pub distance: f64,
    /// Duration in seconds
    pub duration: f64,
    pub geometry: RouteGeometry,
}

impl RouteResult {
    /// Duration rounded to whole minutes
    #[must_use]
    pub fn minutes(&self) -> u32 {
        (self.duration.max(0.0) / 60.0).round() as u32
    }

    #[must_use]
    pub fn kilometers(&self) -> f64 {
        self.distance / 1000.0
    }
}

/// Both commute legs; `None` means the route is unknown, never "zero length"
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Commute {
    pub driving: Option<RouteResult>,
    pub cycling: Option<RouteResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_rounding() {
        let route = RouteResult {
            distance: 4200.0,
            duration: 629.0,
            geometry: RouteGeometry::default(),
        };
        assert_eq!(route.minutes(), 10);
        assert_eq!(route.kilometers(), 4.2);
    }

    #[test]
    fn test_travel_mode_parsing() {
        assert_eq!("Cycling".parse::<TravelMode>().unwrap(), TravelMode::Cycling);
        assert_eq!(TravelMode::Driving.to_string(), "driving");
        assert!("flying".parse::<TravelMode>().is_err());
    }

    #[test]
    fn test_geometry_from_geojson() {
        let geometry: RouteGeometry = serde_json::from_value(serde_json::json!({
            "type": "LineString",
            "coordinates": [[-74.006, 40.7128], [-73.9855, 40.758]]
        }))
        .unwrap();
        assert_eq!(geometry.coordinates.len(), 2);
        assert_eq!(geometry.coordinates[1], [-73.9855, 40.758]);
    }
}
