//! Versioned upgrades of stored collection payloads.
//!
//! Every saved collection carries a `schema_version`. Payloads imported from
//! the browser dashboard start at version 0 and are brought up to
//! [`CURRENT_DOCUMENT_VERSION`] on load, one step at a time, as plain JSON
//! rewrites.

use serde_json::{Map, Number, Value};

use super::collection::PROJECTS_KEY;
use crate::mutation::default_min_quantity;

pub const CURRENT_DOCUMENT_VERSION: u32 = 1;

/// Inputs a document migration may need besides the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MigrationContext {
    pub reorder_ratio: f64,
    /// Month stamped on materials that never recorded one.
    pub current_month: u32,
}

struct DocumentMigration {
    version: u32,
    description: &'static str,
    /// Only payloads stored under this key are rewritten.
    collection: &'static str,
    apply: fn(&mut Value, &MigrationContext),
}

const DOCUMENT_MIGRATIONS: &[DocumentMigration] = &[DocumentMigration {
    version: 1,
    description: "normalize_legacy_projects",
    collection: PROJECTS_KEY,
    apply: normalize_legacy_projects,
}];

/// Upgrades `payload` from version `from` and returns the version reached.
pub fn upgrade(key: &str, payload: &mut Value, from: u32, ctx: &MigrationContext) -> u32 {
    let mut version = from;
    for migration in DOCUMENT_MIGRATIONS {
        if migration.version <= version {
            continue;
        }
        if migration.collection == key {
            log::info!(
                "Upgrading '{}' to document v{}: {}",
                key,
                migration.version,
                migration.description
            );
            (migration.apply)(payload, ctx);
        }
        version = migration.version;
    }
    version
}

const PROJECT_NUMBERS: &[&str] = &["totalArea", "numberOfUnits", "budget", "spent", "materialsBudget"];
const MATERIAL_NUMBERS: &[&str] = &["quantity", "consumedQuantity", "unitPrice", "minQuantity", "month"];

fn normalize_legacy_projects(payload: &mut Value, ctx: &MigrationContext) {
    let Some(projects) = payload.as_array_mut() else {
        return;
    };

    for project in projects.iter_mut().filter_map(Value::as_object_mut) {
        // Progress is always derived from the timeline.
        project.remove("progress");
        coerce_numbers(project, PROJECT_NUMBERS);

        for key in ["materials", "timeline", "visits", "documents", "photos"] {
            ensure_array(project, key);
        }

        for material in objects_mut(project, "materials") {
            normalize_material(material, ctx);
        }
        for phase in objects_mut(project, "timeline") {
            coerce_numbers(phase, &["progress"]);
            ensure_array(phase, "milestones");
            ensure_array(phase, "tasks");
            for task in objects_mut(phase, "tasks") {
                coerce_numbers(task, &["progress"]);
            }
        }
        for visit in objects_mut(project, "visits") {
            ensure_array(visit, "expenses");
            for expense in objects_mut(visit, "expenses") {
                coerce_numbers(expense, &["amount"]);
            }
        }
        for category in objects_mut(project, "documents") {
            ensure_array(category, "items");
        }
    }
}

fn normalize_material(material: &mut Map<String, Value>, ctx: &MigrationContext) {
    coerce_numbers(material, MATERIAL_NUMBERS);

    if !material.contains_key("consumedQuantity") {
        material.insert("consumedQuantity".to_string(), Value::from(0));
    }
    if !material.contains_key("minQuantity") {
        let quantity = material.get("quantity").and_then(Value::as_f64).unwrap_or(0.0);
        material.insert(
            "minQuantity".to_string(),
            number(default_min_quantity(quantity, ctx.reorder_ratio)),
        );
    }
    let has_month = material
        .get("month")
        .and_then(Value::as_u64)
        .is_some_and(|m| (1..=12).contains(&m));
    if !has_month {
        material.insert("month".to_string(), Value::from(ctx.current_month));
    }
}

fn objects_mut<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a mut Map<String, Value>> {
    parent
        .get_mut(key)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flat_map(|items| items.iter_mut().filter_map(Value::as_object_mut))
}

fn ensure_array(object: &mut Map<String, Value>, key: &str) {
    if !object.get(key).is_some_and(Value::is_array) {
        object.insert(key.to_string(), Value::Array(Vec::new()));
    }
}

/// Rewrites numeric strings as JSON numbers and drops blank ones. Strings
/// that are not numbers are left for the deserializer to reject.
fn coerce_numbers(object: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        let Some(Value::String(raw)) = object.get(*key) else {
            continue;
        };
        let trimmed = raw.trim().to_string();
        if trimmed.is_empty() {
            object.remove(*key);
        } else if let Ok(parsed) = trimmed.parse::<f64>() {
            object.insert(key.to_string(), number(parsed));
        }
    }
}

/// Whole values are stored as integers so ids and counts stay exact.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
    }
}
