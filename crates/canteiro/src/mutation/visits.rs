use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::{EntityId, Expense, ExpenseType, Project, Visit};

use super::validate::{amount, required, required_date};
use super::{edit_owned, remove_by_id, EditContext};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitInput {
    pub date: Option<NaiveDate>,
    pub time: String,
    pub purpose: String,
    pub participants: String,
    pub location: String,
    pub observations: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseInput {
    pub kind: ExpenseType,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub receipt: bool,
}

/// Schedules a visit with no expenses yet.
pub fn add_visit(
    projects: &[Project],
    project_id: EntityId,
    input: VisitInput,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let date = required_date("date", input.date)?;
    let time = required("time", &input.time)?;
    let purpose = required("purpose", &input.purpose)?;
    let participants = required("participants", &input.participants)?;
    let location = required("location", &input.location)?;
    let observations = input.observations.trim().to_string();

    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "add_visit", |project| {
        project.visits.push(Visit {
            id: ctx.next_id(),
            date: Some(date),
            time,
            purpose,
            participants,
            location,
            observations,
            expenses: Vec::new(),
        });
        Ok(())
    })
}

pub fn delete_visit(
    projects: &[Project],
    project_id: EntityId,
    visit_id: EntityId,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "delete_visit", |project| {
        if !remove_by_id(&mut project.visits, visit_id, |v| v.id) {
            log::debug!("delete_visit: visit {} already gone", visit_id);
        }
        Ok(())
    })
}

fn with_visit<F>(project: &mut Project, visit_id: EntityId, op: &str, f: F)
where
    F: FnOnce(&mut Visit),
{
    let project_id = project.id;
    match project.visits.iter_mut().find(|v| v.id == visit_id) {
        Some(visit) => f(visit),
        None => log::debug!(
            "{}: visit {} not found in project {}, ignoring edit",
            op,
            visit_id,
            project_id
        ),
    }
}

pub fn add_visit_expense(
    projects: &[Project],
    project_id: EntityId,
    visit_id: EntityId,
    input: ExpenseInput,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let value = amount("amount", input.amount)?;
    let date = required_date("date", input.date)?;
    let description = required("description", &input.description)?;
    let kind = input.kind;
    let receipt = input.receipt;

    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "add_visit_expense", |project| {
        with_visit(project, visit_id, "add_visit_expense", |visit| {
            visit.expenses.push(Expense {
                id: ctx.next_id(),
                kind,
                amount: value,
                date: Some(date),
                description,
                receipt,
            });
        });
        Ok(())
    })
}

pub fn remove_visit_expense(
    projects: &[Project],
    project_id: EntityId,
    visit_id: EntityId,
    expense_id: EntityId,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "remove_visit_expense", |project| {
        with_visit(project, visit_id, "remove_visit_expense", |visit| {
            remove_by_id(&mut visit.expenses, expense_id, |e| e.id);
        });
        Ok(())
    })
}
