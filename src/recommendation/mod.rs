//! Derived recommendations
//!
//! Pure functions over already-normalized weather and route readings:
//! - Pricing: rideshare fare estimate with rain surge and a minimum fare
//! - Outfit: temperature bands, umbrella / sun notes, detailed advice
//! - Commute: rideshare vs. bike cards and the "best option" flag

pub mod commute;
pub mod outfit;
pub mod pricing;

pub use commute::{BIKE_FARE, CommuteKind, CommuteOption, bike_recommended, commute_options};
pub use outfit::{AdviceItem, Outfit, OutfitBucket, OutfitIcon, detailed_advice, recommend_outfit};
pub use pricing::{MINIMUM_FARE, ride_price, round_cents, surge_multiplier};
