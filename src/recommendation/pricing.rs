//! Rideshare fare estimate

pub const BASE_FARE: f64 = 2.50;
pub const PER_MINUTE: f64 = 0.35;
pub const PER_MILE: f64 = 1.75;
pub const MINIMUM_FARE: f64 = 8.00;
/// Multiplier applied while it is raining
pub const RAIN_SURGE: f64 = 1.4;
pub const METERS_PER_MILE: f64 = 1609.34;

/// Surge multiplier for the current weather
#[must_use]
pub fn surge_multiplier(is_precipitating: bool) -> f64 {
    if is_precipitating { RAIN_SURGE } else { 1.0 }
}

/// Estimated fare for a trip, never below [`MINIMUM_FARE`].
///
/// Inputs are not validated: negative distances or durations simply lower
/// the raw fare, which then hits the floor.
#[must_use]
pub fn ride_price(distance_meters: f64, duration_seconds: f64, surge: f64) -> f64 {
    let duration_minutes = duration_seconds / 60.0;
    let distance_miles = distance_meters / METERS_PER_MILE;

    let price = (BASE_FARE + duration_minutes * PER_MINUTE + distance_miles * PER_MILE) * surge;
    price.max(MINIMUM_FARE)
}

/// Round to whole cents for display
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
