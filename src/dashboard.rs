//! Dashboard service
//!
//! Owns the location store, the three provider clients and the last known
//! weather/commute readings. Refreshes absorb provider failures: the previous
//! state is kept and the failure is logged, never returned.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::cache::PersistentCache;
use crate::config::CommuteConfig;
use crate::geocoding::{GeocodeResult, GeocodingClient};
use crate::models::{Commute, Location, RouteResult, TravelMode, WeatherReading};
use crate::recommendation::{
    AdviceItem, CommuteOption, Outfit, commute_options, detailed_advice, recommend_outfit,
};
use crate::routing::RoutingClient;
use crate::store::{LocationStore, Slot, open_database};
use crate::weather::WeatherClient;

#[derive(Debug, Default)]
struct State {
    weather: Option<WeatherReading>,
    commute: Option<Commute>,
}

/// Counts one in-flight refresh for as long as it lives.
///
/// Dropping the refresh future (request timeout, client gone) still
/// releases the count.
struct LoadingGuard(Arc<AtomicUsize>);

impl LoadingGuard {
    fn start(in_flight: &Arc<AtomicUsize>) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(in_flight))
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Everything the dashboard shows, derived fields included
#[derive(Debug, Serialize, Clone)]
pub struct DashboardSnapshot {
    pub home: Location,
    pub work: Location,
    pub loading: bool,
    pub weather: Option<WeatherReading>,
    pub commute: Option<Commute>,
    pub outfit: Option<Outfit>,
    pub outfit_advice: Vec<AdviceItem>,
    pub options: Vec<CommuteOption>,
}

#[derive(Debug, Serialize, Clone)]
pub struct SavedLocations {
    pub home: Location,
    pub work: Location,
}

#[derive(Clone)]
pub struct DashboardService {
    store: LocationStore,
    weather: WeatherClient,
    routing: RoutingClient,
    geocoding: GeocodingClient,
    state: Arc<RwLock<State>>,
    in_flight: Arc<AtomicUsize>,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        store: LocationStore,
        weather: WeatherClient,
        routing: RoutingClient,
        geocoding: GeocodingClient,
    ) -> Self {
        Self {
            store,
            weather,
            routing,
            geocoding,
            state: Arc::new(RwLock::new(State::default())),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wire up storage and provider clients from configuration
    pub fn from_config(config: &CommuteConfig) -> Result<Self> {
        let db = open_database(&config.storage.location)?;
        let store = LocationStore::new(&db, config.defaults.clone())?;
        let cache = PersistentCache::new(&db).with_context(|| "Failed to open route cache")?;

        let client = crate::http::build_client(&config.providers)?;
        Ok(Self::new(
            store,
            WeatherClient::new(client.clone(), &config.providers),
            RoutingClient::new(client.clone(), &config.providers, &config.storage, Some(cache)),
            GeocodingClient::new(client, &config.providers),
        ))
    }

    pub async fn locations(&self) -> Result<SavedLocations> {
        Ok(SavedLocations {
            home: self.store.home().await?,
            work: self.store.work().await?,
        })
    }

    /// Persist a location, then refresh for the new pair
    pub async fn set_location(&self, slot: Slot, location: Location) -> Result<DashboardSnapshot> {
        self.store.set(slot, location).await?;
        self.refresh().await
    }

    pub async fn search(&self, query: &str) -> Vec<GeocodeResult> {
        self.geocoding.search(query).await
    }

    /// Location for a picked search result, labelled with its short name
    #[must_use]
    pub fn choose_result(result: &GeocodeResult) -> Location {
        Location::from(result)
    }

    /// Location for a raw coordinate pick
    #[must_use]
    pub fn pin(lat: f64, lon: f64) -> Location {
        Location::pin(lat, lon)
    }

    /// Re-fetch weather and both commute legs, then return a snapshot.
    ///
    /// Only store failures are returned; provider failures are absorbed.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<DashboardSnapshot> {
        let locations = self.locations().await?;

        {
            let _loading = LoadingGuard::start(&self.in_flight);
            self.refresh_data(&locations.home, &locations.work).await;
        }

        self.snapshot().await
    }

    async fn refresh_data(&self, home: &Location, work: &Location) {
        let weather = match self.weather.fetch_weather(home.latitude, home.longitude).await {
            Ok(weather) => weather,
            Err(e) => {
                error!("Failed to refresh data: {e:#}");
                return;
            }
        };
        self.state.write().await.weather = Some(weather);

        let (driving, cycling) = tokio::join!(
            self.route_or_unknown(home, work, TravelMode::Driving),
            self.route_or_unknown(home, work, TravelMode::Cycling),
        );

        info!(
            "Commute refreshed (driving known: {}, cycling known: {})",
            driving.is_some(),
            cycling.is_some()
        );
        self.state.write().await.commute = Some(Commute { driving, cycling });
    }

    async fn route_or_unknown(
        &self,
        home: &Location,
        work: &Location,
        mode: TravelMode,
    ) -> Option<RouteResult> {
        match self.routing.fetch_route(home, work, mode).await {
            Ok(route) => Some(route),
            Err(e) => {
                warn!("Route fetch failed for {mode}: {e:#}");
                None
            }
        }
    }

    /// Current state plus derived recommendations
    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let locations = self.locations().await?;
        let state = self.state.read().await;

        let outfit = state
            .weather
            .as_ref()
            .map(|w| recommend_outfit(w.temperature, w.is_precipitating));
        let outfit_advice = state
            .weather
            .as_ref()
            .map(|w| detailed_advice(w.temperature, w.is_precipitating))
            .unwrap_or_default();
        let options = state
            .commute
            .as_ref()
            .map(|c| commute_options(c, state.weather.as_ref()))
            .unwrap_or_default();

        Ok(DashboardSnapshot {
            home: locations.home,
            work: locations.work,
            loading: self.in_flight.load(Ordering::SeqCst) > 0,
            weather: state.weather.clone(),
            commute: state.commute.clone(),
            outfit,
            outfit_advice,
            options,
        })
    }
}
