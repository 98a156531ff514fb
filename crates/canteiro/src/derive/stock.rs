use serde::Serialize;

use crate::model::{EntityId, Material, Project};

/// Materials at or below their reorder threshold.
pub fn low_stock_alerts(project: &Project) -> Vec<&Material> {
    project.materials.iter().filter(|m| m.is_low_stock()).collect()
}

pub fn materials_in_stock(project: &Project) -> Vec<&Material> {
    project.materials.iter().filter(|m| m.quantity > 0.0).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsage {
    pub id: EntityId,
    pub name: String,
    pub planned: f64,
    pub used: f64,
    pub unit: String,
}

pub fn material_usage(project: &Project) -> Vec<MaterialUsage> {
    project
        .materials
        .iter()
        .map(|m| MaterialUsage {
            id: m.id,
            name: m.name.clone(),
            planned: m.quantity,
            used: m.consumed_quantity,
            unit: m.unit.clone(),
        })
        .collect()
}
