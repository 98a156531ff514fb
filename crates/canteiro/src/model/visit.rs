use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use super::EntityId;

/// A scheduled site visit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Visit {
    #[serde(deserialize_with = "de::id")]
    pub id: EntityId,
    #[serde(
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    /// Free-form `HH:MM` as entered.
    pub time: String,
    pub purpose: String,
    pub participants: String,
    pub location: String,
    pub observations: String,
    pub expenses: Vec<Expense>,
}

impl Visit {
    pub fn expense_total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseType {
    Material,
    Labor,
    Transport,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Expense {
    #[serde(deserialize_with = "de::id")]
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: ExpenseType,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    pub description: String,
    pub receipt: bool,
}
