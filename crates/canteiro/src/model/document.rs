use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use super::EntityId;

/// Document categories. The serialized names are the labels the dashboard
/// has always stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Projeto")]
    Design,
    #[serde(rename = "Licenças")]
    Permits,
    #[serde(rename = "Relatórios")]
    Reports,
    #[serde(rename = "Contratos")]
    Contracts,
    #[default]
    #[serde(rename = "Outros", other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    Expired,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentCategory {
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub items: Vec<Document>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    #[serde(deserialize_with = "de::id")]
    pub id: EntityId,
    pub name: String,
    pub status: DocumentStatus,
    #[serde(
        deserialize_with = "de::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<NaiveDate>,
}

impl Document {
    /// Expired by status, or by an expiry date strictly before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.status == DocumentStatus::Expired || self.expiry_date.is_some_and(|d| d < today)
    }
}
