//! Address search via Nominatim (OpenStreetMap).
//! Free, no API key, but every request must carry an identifying `User-Agent`.

use anyhow::{Context, Result};
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::CommuteError;
use crate::config::ProvidersConfig;
use crate::http::join_url;
use crate::models::Location;

/// One search hit
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

impl GeocodeResult {
    /// Text before the first comma, e.g. "Empire State Building"
    #[must_use]
    pub fn short_label(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or_default()
    }
}

impl From<&GeocodeResult> for Location {
    fn from(result: &GeocodeResult) -> Self {
        Location::with_label(result.lat, result.lon, result.short_label())
    }
}

#[derive(Clone)]
pub struct GeocodingClient {
    client: ClientWithMiddleware,
    base_url: String,
    user_agent: String,
    limit: u32,
}

impl GeocodingClient {
    #[must_use]
    pub fn new(client: ClientWithMiddleware, config: &ProvidersConfig) -> Self {
        Self {
            client,
            base_url: config.geocoding_base_url.clone(),
            user_agent: config.user_agent.clone(),
            limit: config.search_limit,
        }
    }

    /// Search for an address. Failures are logged and yield no results.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Vec<GeocodeResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.search_call(query).await {
            Ok(results) => {
                if results.is_empty() {
                    warn!("No results found for '{}'", query);
                } else {
                    info!("Found {} results for '{}'", results.len(), query);
                }
                results
            }
            Err(e) => {
                warn!("Geocoding failed for '{}': {e:#}", query);
                Vec::new()
            }
        }
    }

    async fn search_call(&self, query: &str) -> Result<Vec<GeocodeResult>> {
        let url = format!(
            "{}?q={}&format=json&limit={}",
            join_url(&self.base_url, "search"),
            urlencoding::encode(query),
            self.limit
        );
        debug!("Nominatim request URL: {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| CommuteError::api(format!("Geocoding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommuteError::api(format!("Geocoding provider returned {status}")).into());
        }

        let places: Vec<nominatim::Place> = response
            .json()
            .await
            .with_context(|| "Failed to parse Nominatim response")?;

        Ok(places.into_iter().filter_map(nominatim::Place::parse).collect())
    }
}

mod nominatim {
    use serde::Deserialize;

    use super::GeocodeResult;

    /// Nominatim sends coordinates as strings
    #[derive(Debug, Deserialize)]
    pub struct Place {
        pub lat: String,
        pub lon: String,
        pub display_name: String,
    }

    impl Place {
        pub fn parse(self) -> Option<GeocodeResult> {
            match (self.lat.trim().parse(), self.lon.trim().parse()) {
                (Ok(lat), Ok(lon)) => Some(GeocodeResult {
                    lat,
                    lon,
                    display_name: self.display_name,
                }),
                _ => {
                    tracing::debug!("Skipping place with bad coordinates: {}", self.display_name);
                    None
                }
            }
        }
    }
}
