use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use super::EntityId;

/// A site photo. How the image (or an annotation drawn over it) was produced
/// is irrelevant here; `url` is opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Photo {
    #[serde(deserialize_with = "de::id")]
    pub id: EntityId,
    pub url: String,
    pub description: String,
    #[serde(
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    pub location: String,
}
