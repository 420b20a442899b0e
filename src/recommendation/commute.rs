//! Rideshare vs. bike cards

use serde::Serialize;

use super::pricing::{ride_price, round_cents, surge_multiplier};
use crate::models::{Commute, RouteResult, WeatherReading};

/// Flat bike-share fare
pub const BIKE_FARE: f64 = 3.50;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommuteKind {
    Rideshare,
    Bike,
}

/// One commute card. `price`/`minutes` are absent when the route is unknown.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommuteOption {
    pub kind: CommuteKind,
    pub price: Option<f64>,
    pub minutes: Option<u32>,
    pub recommended: bool,
}

/// Good biking weather: dry and strictly between 10°C and 28°C
#[must_use]
pub fn bike_recommended(temperature: f32, is_precipitating: bool) -> bool {
    !is_precipitating && temperature > 10.0 && temperature < 28.0
}

fn rideshare(route: Option<&RouteResult>, weather: Option<&WeatherReading>) -> CommuteOption {
    let raining = weather.is_some_and(|w| w.is_precipitating);
    let surge = surge_multiplier(raining);

    CommuteOption {
        kind: CommuteKind::Rideshare,
        price: route.map(|r| round_cents(ride_price(r.distance, r.duration, surge))),
        minutes: route.map(RouteResult::minutes),
        recommended: route.is_some() && raining,
    }
}

fn bike(route: Option<&RouteResult>, weather: Option<&WeatherReading>) -> CommuteOption {
    let good_weather =
        weather.is_some_and(|w| bike_recommended(w.temperature, w.is_precipitating));

    CommuteOption {
        kind: CommuteKind::Bike,
        price: route.map(|_| BIKE_FARE),
        minutes: route.map(RouteResult::minutes),
        recommended: route.is_some() && good_weather,
    }
}

/// Rideshare card first, then bike
#[must_use]
pub fn commute_options(commute: &Commute, weather: Option<&WeatherReading>) -> Vec<CommuteOption> {
    vec![
        rideshare(commute.driving.as_ref(), weather),
        bike(commute.cycling.as_ref(), weather),
    ]
}
