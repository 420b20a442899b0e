//! Data models for `CommuteOS`
//!
//! This module contains the core domain models organized by concern:
//! - Location: saved home/work coordinates
//! - Weather: current conditions and the daily outlook
//! - Route: per-mode commute legs

pub mod location;
pub mod route;
pub mod weather;

pub use location::{CUSTOM_PIN_LABEL, Location};
pub use route::{Commute, RouteGeometry, RouteResult, TravelMode};
pub use weather::{ConditionIcon, DailyForecast, WeatherReading};
