use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::dashboard::{DashboardService, DashboardSnapshot, SavedLocations};
use crate::error::{CommuteError, classify};
use crate::geocoding::GeocodeResult;
use crate::models::Location;
use crate::store::Slot;

type AppState = Arc<DashboardService>;

#[derive(Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/refresh", post(refresh))
        .route("/locations", get(get_locations))
        .route("/locations/{slot}", put(set_location))
        .route("/geocode", get(geocode))
        .route("/health", get(health))
        .with_state(state)
}

fn status_for(err: &anyhow::Error) -> StatusCode {
    match classify(err) {
        Some(CommuteError::Validation { .. }) => StatusCode::BAD_REQUEST,
        _ => {
            error!("Request failed: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn get_dashboard(State(service): State<AppState>) -> Result<Json<DashboardSnapshot>, StatusCode> {
    service.snapshot().await.map(Json).map_err(|e| status_for(&e))
}

async fn refresh(State(service): State<AppState>) -> Result<Json<DashboardSnapshot>, StatusCode> {
    service.refresh().await.map(Json).map_err(|e| status_for(&e))
}

async fn get_locations(State(service): State<AppState>) -> Result<Json<SavedLocations>, StatusCode> {
    service.locations().await.map(Json).map_err(|e| status_for(&e))
}

async fn set_location(
    State(service): State<AppState>,
    Path(slot): Path<String>,
    Json(location): Json<Location>,
) -> Result<Json<DashboardSnapshot>, StatusCode> {
    let slot: Slot = slot.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    service
        .set_location(slot, location)
        .await
        .map(Json)
        .map_err(|e| status_for(&e))
}

async fn geocode(
    State(service): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Json<Vec<GeocodeResult>> {
    Json(service.search(&query.q).await)
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: crate::VERSION,
    })
}
