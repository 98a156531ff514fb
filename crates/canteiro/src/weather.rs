//! Weather impact on site work.
//!
//! Fetching forecasts is the caller's business; this only classifies an
//! observation. Nothing here reads or writes projects.

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Condition group as reported by common weather providers (`"Rain"`,
/// `"Thunderstorm"`, ...). Unknown groups parse as `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Drizzle,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    #[serde(other)]
    Other,
}

impl FromStr for WeatherCondition {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "clear" => WeatherCondition::Clear,
            "clouds" => WeatherCondition::Clouds,
            "drizzle" => WeatherCondition::Drizzle,
            "rain" => WeatherCondition::Rain,
            "thunderstorm" => WeatherCondition::Thunderstorm,
            "snow" => WeatherCondition::Snow,
            "mist" | "fog" | "haze" => WeatherCondition::Mist,
            _ => WeatherCondition::Other,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkImpact {
    None,
    Partial,
    Full,
}

impl WorkImpact {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkImpact::None => "none",
            WorkImpact::Partial => "partial",
            WorkImpact::Full => "full",
        }
    }
}

/// Full stop for thunderstorms or more than 10 mm of rain, partial for rain
/// or more than 5 mm.
pub fn work_impact(condition: WeatherCondition, rainfall_mm: f64) -> WorkImpact {
    if condition == WeatherCondition::Thunderstorm || rainfall_mm > 10.0 {
        WorkImpact::Full
    } else if condition == WeatherCondition::Rain || rainfall_mm > 5.0 {
        WorkImpact::Partial
    } else {
        WorkImpact::None
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherObservation {
    pub condition: WeatherCondition,
    pub rainfall_mm: f64,
}

impl WeatherObservation {
    pub fn work_impact(&self) -> WorkImpact {
        work_impact(self.condition, self.rainfall_mm)
    }
}
