use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::{EntityId, Milestone, Phase, Project, Task, TaskStatus};

use super::validate::{not_after, percent, required, required_date};
use super::{edit_owned, remove_by_id, EditContext};

/// Phase form payload. An `id` naming an existing phase edits it in place;
/// anything else appends a new phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseInput {
    pub id: Option<EntityId>,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilestoneInput {
    pub id: Option<EntityId>,
    pub description: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskInput {
    pub id: Option<EntityId>,
    pub name: String,
    pub status: TaskStatus,
    pub progress: f64,
}

fn position<T>(items: &[T], id: Option<EntityId>, key: impl Fn(&T) -> EntityId) -> Option<usize> {
    id.and_then(|id| items.iter().position(|item| key(item) == id))
}

fn with_phase<F>(project: &mut Project, phase_id: EntityId, op: &str, f: F)
where
    F: FnOnce(&mut Phase),
{
    let project_id = project.id;
    match project.timeline.iter_mut().find(|p| p.id == phase_id) {
        Some(phase) => f(phase),
        None => log::debug!(
            "{}: phase {} not found in project {}, ignoring edit",
            op,
            phase_id,
            project_id
        ),
    }
}

/// Milestones and tasks of an edited phase are kept.
pub fn upsert_phase(
    projects: &[Project],
    project_id: EntityId,
    input: PhaseInput,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let name = required("phase", &input.name)?;
    let start = required_date("startDate", input.start_date)?;
    let end = required_date("endDate", input.end_date)?;
    not_after("startDate", Some(start), "endDate", Some(end))?;
    let progress = percent("progress", input.progress)?;

    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "upsert_phase", |project| {
        match position(&project.timeline, input.id, |p| p.id) {
            Some(index) => {
                let phase = &mut project.timeline[index];
                phase.name = name;
                phase.start_date = Some(start);
                phase.end_date = Some(end);
                phase.progress = progress;
            }
            None => project.timeline.push(Phase {
                id: ctx.next_id(),
                name,
                start_date: Some(start),
                end_date: Some(end),
                progress,
                milestones: Vec::new(),
                tasks: Vec::new(),
            }),
        }
        Ok(())
    })
}

pub fn remove_phase(
    projects: &[Project],
    project_id: EntityId,
    phase_id: EntityId,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "remove_phase", |project| {
        if !remove_by_id(&mut project.timeline, phase_id, |p| p.id) {
            log::debug!("remove_phase: phase {} already gone", phase_id);
        }
        Ok(())
    })
}

pub fn upsert_milestone(
    projects: &[Project],
    project_id: EntityId,
    phase_id: EntityId,
    input: MilestoneInput,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let description = required("description", &input.description)?;
    let date = required_date("date", input.date)?;

    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "upsert_milestone", |project| {
        with_phase(project, phase_id, "upsert_milestone", |phase| {
            match position(&phase.milestones, input.id, |m| m.id) {
                Some(index) => {
                    let milestone = &mut phase.milestones[index];
                    milestone.description = description;
                    milestone.date = Some(date);
                }
                None => phase.milestones.push(Milestone {
                    id: ctx.next_id(),
                    description,
                    date: Some(date),
                }),
            }
        });
        Ok(())
    })
}

pub fn remove_milestone(
    projects: &[Project],
    project_id: EntityId,
    phase_id: EntityId,
    milestone_id: EntityId,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "remove_milestone", |project| {
        with_phase(project, phase_id, "remove_milestone", |phase| {
            remove_by_id(&mut phase.milestones, milestone_id, |m| m.id);
        });
        Ok(())
    })
}

pub fn upsert_task(
    projects: &[Project],
    project_id: EntityId,
    phase_id: EntityId,
    input: TaskInput,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let name = required("name", &input.name)?;
    let progress = percent("progress", input.progress)?;
    let status = input.status;

    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "upsert_task", |project| {
        with_phase(project, phase_id, "upsert_task", |phase| {
            match position(&phase.tasks, input.id, |t| t.id) {
                Some(index) => {
                    let task = &mut phase.tasks[index];
                    task.name = name;
                    task.status = status;
                    task.progress = progress;
                }
                None => phase.tasks.push(Task {
                    id: ctx.next_id(),
                    name,
                    status,
                    progress,
                }),
            }
        });
        Ok(())
    })
}

pub fn remove_task(
    projects: &[Project],
    project_id: EntityId,
    phase_id: EntityId,
    task_id: EntityId,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "remove_task", |project| {
        with_phase(project, phase_id, "remove_task", |phase| {
            remove_by_id(&mut phase.tasks, task_id, |t| t.id);
        });
        Ok(())
    })
}
