//! Single-edit operations over the project list.
//!
//! Every operation borrows the current list and returns a new one in which
//! only the targeted project differs. Validation runs before anything is
//! touched, so an `Err` always means the caller's list is still current.
//! Ids that no longer exist are not errors: the edit is dropped with a debug
//! log and the list comes back unchanged.

mod ids;
mod validate;

pub mod documents;
pub mod materials;
pub mod photos;
pub mod project;
pub mod timeline;
pub mod visits;

pub use documents::{add_document, remove_document, update_document_status, DocumentInput};
pub use ids::{backfill_missing_ids, IdAllocator};
pub use materials::{
    add_material, consume_material, default_min_quantity, delete_material, edit_material,
    MaterialInput,
};
pub use photos::{add_photo, remove_photo, PhotoInput};
pub use project::{
    create_project, delete_project, rename_project, set_materials_budget, update_project_details,
    update_project_status, ProjectDetails,
};
pub use timeline::{
    remove_milestone, remove_phase, remove_task, upsert_milestone, upsert_phase, upsert_task,
    MilestoneInput, PhaseInput, TaskInput,
};
pub use visits::{add_visit, add_visit_expense, delete_visit, remove_visit_expense, ExpenseInput, VisitInput};

use chrono::{Datelike, NaiveDate};

use crate::config::Config;
use crate::error::ValidationError;
use crate::model::{EntityId, Project};

/// Edit rules taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditPolicy {
    /// Default reorder threshold as a fraction of the planned quantity.
    pub reorder_ratio: f64,
    /// Reject edits to the owned collections of completed projects.
    pub lock_completed: bool,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            reorder_ratio: 0.2,
            lock_completed: false,
        }
    }
}

impl EditPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            reorder_ratio: config.alerts.reorder_ratio,
            lock_completed: config.edits.lock_completed_projects,
        }
    }
}

/// Everything an edit needs besides the list and the payload.
#[derive(Debug, Clone)]
pub struct EditContext {
    pub ids: IdAllocator,
    /// Date the edit happens on; stamps material `month`.
    pub today: NaiveDate,
    pub policy: EditPolicy,
}

impl EditContext {
    pub fn new(ids: IdAllocator, today: NaiveDate, policy: EditPolicy) -> Self {
        Self { ids, today, policy }
    }

    pub fn current_month(&self) -> u32 {
        self.today.month()
    }

    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }
}

/// Clones the list and applies `f` to the project with `project_id`.
pub(crate) fn edit_project<F>(
    projects: &[Project],
    project_id: EntityId,
    op: &'static str,
    f: F,
) -> Result<Vec<Project>, ValidationError>
where
    F: FnOnce(&mut Project) -> Result<(), ValidationError>,
{
    let mut updated = projects.to_vec();
    match updated.iter_mut().find(|p| p.id == project_id) {
        Some(project) => f(project)?,
        None => log::debug!("{}: project {} not found, ignoring edit", op, project_id),
    }
    Ok(updated)
}

/// [`edit_project`] for edits to a project's owned collections, which the
/// completed-project lock applies to.
pub(crate) fn edit_owned<F>(
    projects: &[Project],
    project_id: EntityId,
    policy: &EditPolicy,
    op: &'static str,
    f: F,
) -> Result<Vec<Project>, ValidationError>
where
    F: FnOnce(&mut Project) -> Result<(), ValidationError>,
{
    let lock = policy.lock_completed;
    edit_project(projects, project_id, op, |project| {
        if lock && project.is_completed() {
            return Err(ValidationError::ProjectLocked(project.id));
        }
        f(project)
    })
}

/// Removes the item with `id` from `items`; returns whether anything went.
pub(crate) fn remove_by_id<T>(items: &mut Vec<T>, id: EntityId, key: impl Fn(&T) -> EntityId) -> bool {
    let before = items.len();
    items.retain(|item| key(item) != id);
    items.len() != before
}
