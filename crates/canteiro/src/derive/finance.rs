use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Project, Visit};

/// `spent / budget * 100`, defined as 0 when there is no budget.
pub fn budget_utilization(project: &Project) -> f64 {
    utilization(project.spent, project.budget)
}

fn utilization(spent: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        spent / budget * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Normal,
    Warning,
    Exceeded,
}

pub fn budget_status(spent: f64, budget: f64, warning_percent: f64) -> BudgetStatus {
    let percentage = utilization(spent, budget);
    if percentage > 100.0 {
        BudgetStatus::Exceeded
    } else if percentage > warning_percent {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Normal
    }
}

pub fn materials_planned_value(project: &Project) -> f64 {
    project.materials.iter().map(|m| m.planned_value()).sum()
}

pub fn materials_consumed_value(project: &Project) -> f64 {
    project.materials.iter().map(|m| m.consumed_value()).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsBudgetUsage {
    pub planned: f64,
    pub consumed: f64,
    /// Consumed value as a share of the planned material value.
    pub of_planned_percent: f64,
    /// Consumed value as a share of the `materialsBudget` override, 0 without one.
    pub of_budget_percent: f64,
}

pub fn materials_budget_usage(project: &Project) -> MaterialsBudgetUsage {
    let planned = materials_planned_value(project);
    let consumed = materials_consumed_value(project);
    MaterialsBudgetUsage {
        planned,
        consumed,
        of_planned_percent: utilization(consumed, planned),
        of_budget_percent: utilization(consumed, project.materials_budget.unwrap_or(0.0)),
    }
}

pub fn visit_expense_total(visit: &Visit) -> f64 {
    visit.expense_total()
}

pub fn visits_expense_total(project: &Project) -> f64 {
    project.visits.iter().map(visit_expense_total).sum()
}

/// Recorded spend plus consumed material value plus visit expenses.
pub fn total_spent(project: &Project) -> f64 {
    project.spent + materials_consumed_value(project) + visits_expense_total(project)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFinancials {
    pub month: u32,
    pub planned: f64,
    pub consumed: f64,
    pub variance_percent: f64,
}

/// Planned vs consumed material value grouped by each material's `month`.
///
/// A material only remembers the month of its last edit, so this cannot show
/// when value was actually consumed. Months outside 1..=12 are counted under
/// January.
pub fn monthly_financial_breakdown(project: &Project) -> Vec<MonthlyFinancials> {
    let mut months: BTreeMap<u32, (f64, f64)> = BTreeMap::new();
    for material in &project.materials {
        let month = if (1..=12).contains(&material.month) {
            material.month
        } else {
            1
        };
        let entry = months.entry(month).or_default();
        entry.0 += material.planned_value();
        entry.1 += material.consumed_value();
    }

    months
        .into_iter()
        .map(|(month, (planned, consumed))| MonthlyFinancials {
            month,
            planned,
            consumed,
            variance_percent: if planned > 0.0 {
                (consumed - planned) / planned * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
