//! What to wear for the current temperature

use serde::{Deserialize, Serialize};

pub const UMBRELLA_NOTE: &str = "Don't forget an umbrella!";
pub const SUN_NOTE: &str = "Sunglasses needed.";

/// Temperature band, lower bound inclusive
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutfitBucket {
    /// Below 5°C
    Freezing,
    /// 5°C up to 15°C
    Cool,
    /// 15°C up to 25°C
    Mild,
    /// 25°C and above
    Hot,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutfitIcon {
    Wind,
    Shirt,
    Sun,
    Thermometer,
    Umbrella,
    Glasses,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Outfit {
    pub bucket: OutfitBucket,
    pub text: &'static str,
    pub icon: OutfitIcon,
    pub notes: Vec<&'static str>,
}

/// One line of the detailed advice
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AdviceItem {
    pub title: &'static str,
    pub text: &'static str,
    pub icon: OutfitIcon,
}

impl OutfitBucket {
    #[must_use]
    pub fn for_temperature(celsius: f32) -> Self {
        if celsius < 5.0 {
            OutfitBucket::Freezing
        } else if celsius < 15.0 {
            OutfitBucket::Cool
        } else if celsius < 25.0 {
            OutfitBucket::Mild
        } else {
            // NaN lands here too
            OutfitBucket::Hot
        }
    }

    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            OutfitBucket::Freezing => "Heavy Coat + Scarf",
            OutfitBucket::Cool => "Light Jacket + Jeans",
            OutfitBucket::Mild => "Hoodie or T-Shirt",
            OutfitBucket::Hot => "Shorts & Shades",
        }
    }

    #[must_use]
    pub fn icon(self) -> OutfitIcon {
        match self {
            OutfitBucket::Freezing => OutfitIcon::Wind,
            OutfitBucket::Cool | OutfitBucket::Mild => OutfitIcon::Shirt,
            OutfitBucket::Hot => OutfitIcon::Sun,
        }
    }

    fn advice(self) -> Vec<AdviceItem> {
        let item = |title: &'static str, text: &'static str, icon| AdviceItem { title, text, icon };
        match self {
            OutfitBucket::Freezing => vec![
                item("Core Layer", "Thermal undershirt recommended.", OutfitIcon::Shirt),
                item("Outerwear", "Heavy down jacket or wool coat.", OutfitIcon::Wind),
                item("Accessories", "Thick scarf, gloves, and beanie.", OutfitIcon::Thermometer),
            ],
            OutfitBucket::Cool => vec![
                item("Top", "Sweater or Hoodie.", OutfitIcon::Shirt),
                item("Jacket", "Denim or leather jacket.", OutfitIcon::Wind),
                item("Bottoms", "Heavy denim or chinos.", OutfitIcon::Shirt),
            ],
            OutfitBucket::Mild => vec![
                item("Top", "T-Shirt or light button-down.", OutfitIcon::Shirt),
                item("Layer", "Bring a light hoodie just in case.", OutfitIcon::Wind),
            ],
            OutfitBucket::Hot => vec![
                item("Top", "Breathable fabric (Linen/Cotton).", OutfitIcon::Sun),
                item("Bottoms", "Shorts or light trousers.", OutfitIcon::Shirt),
            ],
        }
    }
}

fn needs_sun_protection(celsius: f32, is_precipitating: bool) -> bool {
    !is_precipitating && celsius > 15.0
}

/// Headline outfit with umbrella / sun notes
#[must_use]
pub fn recommend_outfit(celsius: f32, is_precipitating: bool) -> Outfit {
    let bucket = OutfitBucket::for_temperature(celsius);

    let mut notes = Vec::new();
    if is_precipitating {
        notes.push(UMBRELLA_NOTE);
    } else if needs_sun_protection(celsius, is_precipitating) {
        notes.push(SUN_NOTE);
    }

    Outfit {
        bucket,
        text: bucket.text(),
        icon: bucket.icon(),
        notes,
    }
}

/// Layer-by-layer advice for the outfit detail view
#[must_use]
pub fn detailed_advice(celsius: f32, is_precipitating: bool) -> Vec<AdviceItem> {
    let mut advice = OutfitBucket::for_temperature(celsius).advice();

    if is_precipitating {
        advice.push(AdviceItem {
            title: "Rain Gear",
            text: "Waterproof shoes & Umbrella.",
            icon: OutfitIcon::Umbrella,
        });
    } else if needs_sun_protection(celsius, is_precipitating) {
        advice.push(AdviceItem {
            title: "Sun Protection",
            text: SUN_NOTE,
            icon: OutfitIcon::Glasses,
        });
    }

    advice
}
