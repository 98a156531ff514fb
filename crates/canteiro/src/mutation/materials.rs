use crate::error::ValidationError;
use crate::model::{EntityId, Material, Project};

use super::validate::{amount, required};
use super::{edit_owned, remove_by_id, EditContext};

/// A material as submitted by the add form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialInput {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub supplier: String,
    /// Reorder threshold; derived from the planned quantity when absent.
    pub min_quantity: Option<f64>,
}

/// `ceil(ratio * quantity)`.
pub fn default_min_quantity(quantity: f64, reorder_ratio: f64) -> f64 {
    (reorder_ratio * quantity).ceil()
}

fn validated(material: Material) -> Result<Material, ValidationError> {
    Ok(Material {
        name: required("name", &material.name)?,
        category: required("category", &material.category)?,
        unit: required("unit", &material.unit)?,
        supplier: required("supplier", &material.supplier)?,
        quantity: amount("quantity", material.quantity)?,
        consumed_quantity: amount("consumedQuantity", material.consumed_quantity)?,
        unit_price: amount("unitPrice", material.unit_price)?,
        min_quantity: amount("minQuantity", material.min_quantity)?,
        ..material
    })
}

fn find_material<'a>(
    project: &'a mut Project,
    material_id: EntityId,
    op: &str,
) -> Option<&'a mut Material> {
    let project_id = project.id;
    let found = project.materials.iter_mut().find(|m| m.id == material_id);
    if found.is_none() {
        log::debug!(
            "{}: material {} not found in project {}, ignoring edit",
            op,
            material_id,
            project_id
        );
    }
    found
}

/// Adds a material with a fresh id, nothing consumed yet, and `month`
/// stamped with the edit date.
pub fn add_material(
    projects: &[Project],
    project_id: EntityId,
    input: MaterialInput,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let quantity = amount("quantity", input.quantity)?;
    let min_quantity = input
        .min_quantity
        .unwrap_or_else(|| default_min_quantity(quantity, ctx.policy.reorder_ratio));
    let draft = validated(Material {
        id: 0,
        name: input.name,
        category: input.category,
        quantity,
        consumed_quantity: 0.0,
        unit: input.unit,
        unit_price: input.unit_price,
        supplier: input.supplier,
        min_quantity,
        month: ctx.current_month(),
    })?;

    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "add_material", |project| {
        project.materials.push(Material {
            id: ctx.next_id(),
            ..draft
        });
        Ok(())
    })
}

/// Replaces the material with `material.id`, keeping its position.
pub fn edit_material(
    projects: &[Project],
    project_id: EntityId,
    material: Material,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let material = Material {
        month: ctx.current_month(),
        ..validated(material)?
    };

    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "edit_material", |project| {
        if let Some(slot) = find_material(project, material.id, "edit_material") {
            *slot = material;
        }
        Ok(())
    })
}

/// Sets the consumed quantity. Consuming more than was planned is allowed.
pub fn consume_material(
    projects: &[Project],
    project_id: EntityId,
    material_id: EntityId,
    consumed_quantity: f64,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let consumed_quantity = amount("consumedQuantity", consumed_quantity)?;
    let month = ctx.current_month();

    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "consume_material", |project| {
        if let Some(material) = find_material(project, material_id, "consume_material") {
            material.consumed_quantity = consumed_quantity;
            material.month = month;
        }
        Ok(())
    })
}

pub fn delete_material(
    projects: &[Project],
    project_id: EntityId,
    material_id: EntityId,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "delete_material", |project| {
        if !remove_by_id(&mut project.materials, material_id, |m| m.id) {
            log::debug!("delete_material: material {} already gone", material_id);
        }
        Ok(())
    })
}
