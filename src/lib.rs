//! `CommuteOS` - morning commute dashboard
//!
//! Fetches current weather, driving and cycling routes between two saved
//! locations, and derives a rideshare price estimate, a bike recommendation
//! and an outfit suggestion.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geocoding;
pub mod http;
pub mod logging;
pub mod models;
pub mod recommendation;
pub mod routing;
pub mod store;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use cache::PersistentCache;
pub use config::CommuteConfig;
pub use dashboard::{DashboardService, DashboardSnapshot};
pub use error::CommuteError;
pub use geocoding::{GeocodeResult, GeocodingClient};
pub use models::{Commute, Location, RouteResult, TravelMode, WeatherReading};
pub use routing::RoutingClient;
pub use store::{LocationStore, Slot};
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CommuteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
