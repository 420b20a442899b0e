use std::time::Duration;

use anyhow::{Context, Result};
use rand::RngExt;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::instrument;

use crate::CommuteError;
use crate::cache::PersistentCache;
use crate::config::{ProvidersConfig, StorageConfig};
use crate::http::join_url;
use crate::models::{Location, RouteGeometry, RouteResult, TravelMode};

/// OSRM route lookups, cached per (mode, origin, destination)
#[derive(Clone)]
pub struct RoutingClient {
    client: ClientWithMiddleware,
    base_url: String,
    cache: Option<PersistentCache>,
    ttl: Duration,
}

impl RoutingClient {
    #[must_use]
    pub fn new(
        client: ClientWithMiddleware,
        providers: &ProvidersConfig,
        storage: &StorageConfig,
        cache: Option<PersistentCache>,
    ) -> Self {
        Self {
            client,
            base_url: providers.routing_base_url.clone(),
            cache,
            ttl: Duration::from_secs(u64::from(storage.route_ttl_hours) * 60 * 60),
        }
    }

    #[instrument(skip(self), fields(from = %origin.to_key(), to = %destination.to_key()))]
    pub async fn fetch_route(
        &self,
        origin: &Location,
        destination: &Location,
        mode: TravelMode,
    ) -> Result<RouteResult> {
        let key = format!("{mode}:{}-{}", origin.to_key(), destination.to_key());

        if let Some(cache) = &self.cache {
            match cache.get::<RouteResult>(&key).await {
                Ok(Some(cached)) => return Ok(cached),
                Ok(None) => {}
                Err(e) => tracing::warn!("Route cache lookup failed: {e:#}"),
            }
        }

        let route = self.fetch_route_call(origin, destination, mode).await?;

        if let Some(cache) = &self.cache {
            let jitter: f64 = rand::rng().random_range(0.9..1.1);
            let ttl = self.ttl.mul_f64(jitter);
            if let Err(e) = cache.put(&key, route.clone(), ttl).await {
                tracing::warn!("Failed to cache {mode} route: {e:#}");
            }
        }

        Ok(route)
    }

    async fn fetch_route_call(
        &self,
        origin: &Location,
        destination: &Location,
        mode: TravelMode,
    ) -> Result<RouteResult> {
        tracing::debug!("Calling the routing API");
        // OSRM wants lon,lat order
        let url = format!(
            "{}/{},{};{},{}?overview=full&geometries=geojson",
            join_url(&self.base_url, &format!("route/v1/{mode}")),
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CommuteError::api(format!("Routing request failed: {e}")))?;

        // OSRM answers "no route" with a 400 and a JSON body, so parse before checking status
        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| CommuteError::api(format!("Invalid routing data ({status}): {e}")))
            .with_context(|| format!("Failed to parse OSRM {mode} response"))?;

        body.into_route(mode)
    }
}

#[derive(Debug, Deserialize)]
struct PathResponse {
    distance: f64,
    duration: f64,
    #[serde(default)]
    geometry: RouteGeometry,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    code: String,
    #[serde(default)]
    routes: Vec<PathResponse>,
}

impl ApiResponse {
    fn into_route(self, mode: TravelMode) -> Result<RouteResult> {
        if self.code != "Ok" {
            tracing::debug!("OSRM answered {} for {mode}", self.code);
            return Err(CommuteError::no_route(mode).into());
        }

        self.routes
            .into_iter()
            .next()
            .map(|path| RouteResult {
                distance: path.distance.max(0.0),
                duration: path.duration.max(0.0),
                geometry: path.geometry,
            })
            .ok_or_else(|| CommuteError::no_route(mode).into())
    }
}
