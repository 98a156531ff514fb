use chrono::NaiveDate;
use serde::Serialize;

use crate::config::AlertsConfig;
use crate::model::{Document, DocumentStatus, EntityId, Milestone, Project};

use super::finance::{
    budget_status, budget_utilization, materials_consumed_value, materials_planned_value,
    BudgetStatus,
};
use super::progress::{active_task_count, overall_progress, task_completion, TaskCompletion};
use super::schedule::{delayed_phases, elapsed_time_percent, next_upcoming_milestone, DelayThresholds};
use super::stock::low_stock_alerts;

fn documents(project: &Project) -> impl Iterator<Item = &Document> {
    project.documents.iter().flat_map(|category| category.items.iter())
}

pub fn pending_documents(project: &Project) -> usize {
    documents(project)
        .filter(|doc| doc.status == DocumentStatus::Pending)
        .count()
}

pub fn expired_documents(project: &Project, today: NaiveDate) -> Vec<&Document> {
    documents(project).filter(|doc| doc.is_expired(today)).collect()
}

pub fn delayed_phase_count(project: &Project, today: NaiveDate, thresholds: &DelayThresholds) -> usize {
    delayed_phases(project, today, thresholds).len()
}

/// Dashboard card for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_id: EntityId,
    pub name: String,
    pub overall_progress: f64,
    pub elapsed_time_percent: f64,
    pub budget_utilization: f64,
    pub budget_status: BudgetStatus,
    pub tasks: TaskCompletion,
    pub pending_documents: usize,
    pub low_stock_count: usize,
    pub next_milestone: Option<Milestone>,
    pub delayed_phases: usize,
}

pub fn project_summary(project: &Project, today: NaiveDate, alerts: &AlertsConfig) -> ProjectSummary {
    ProjectSummary {
        project_id: project.id,
        name: project.name.clone(),
        overall_progress: overall_progress(project),
        elapsed_time_percent: elapsed_time_percent(project, today),
        budget_utilization: budget_utilization(project),
        budget_status: budget_status(project.spent, project.budget, alerts.budget_warning_percent),
        tasks: task_completion(project),
        pending_documents: pending_documents(project),
        low_stock_count: low_stock_alerts(project).len(),
        next_milestone: next_upcoming_milestone(project, today).cloned(),
        delayed_phases: delayed_phase_count(project, today, &DelayThresholds::from(alerts)),
    }
}

/// Totals across every project in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioOverview {
    pub project_count: usize,
    pub total_investment: f64,
    /// Recorded spend plus consumed material value.
    pub total_executed: f64,
    pub planned_materials: f64,
    pub active_tasks: usize,
    pub low_stock_alerts: usize,
}

pub fn portfolio_overview(projects: &[Project]) -> PortfolioOverview {
    projects
        .iter()
        .fold(PortfolioOverview::default(), |mut overview, project| {
            overview.project_count += 1;
            overview.total_investment += project.budget;
            overview.total_executed += project.spent + materials_consumed_value(project);
            overview.planned_materials += materials_planned_value(project);
            overview.active_tasks += active_task_count(project);
            overview.low_stock_alerts += low_stock_alerts(project).len();
            overview
        })
}
