use serde::{Deserialize, Serialize};

use super::de;
use super::EntityId;

/// A tracked construction input. `consumed_quantity` may exceed `quantity`;
/// overconsumption is reported, never blocked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    #[serde(deserialize_with = "de::id")]
    pub id: EntityId,
    pub name: String,
    pub category: String,
    #[serde(deserialize_with = "de::number")]
    pub quantity: f64,
    #[serde(deserialize_with = "de::number")]
    pub consumed_quantity: f64,
    pub unit: String,
    #[serde(deserialize_with = "de::number")]
    pub unit_price: f64,
    pub supplier: String,
    /// Reorder threshold.
    #[serde(deserialize_with = "de::number")]
    pub min_quantity: f64,
    /// Calendar month (1-12) of the last edit.
    #[serde(deserialize_with = "de::count")]
    pub month: u32,
}

impl Material {
    pub fn planned_value(&self) -> f64 {
        self.quantity * self.unit_price
    }

    pub fn consumed_value(&self) -> f64 {
        self.consumed_quantity * self.unit_price
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }

    pub fn is_overconsumed(&self) -> bool {
        self.consumed_quantity > self.quantity
    }
}
