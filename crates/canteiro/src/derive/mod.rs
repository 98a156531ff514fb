//! Pure metrics computed from project documents.
//!
//! Nothing here mutates or persists. Absent collections deserialize as empty,
//! so every function is total over any document the store returns.

pub mod finance;
pub mod progress;
pub mod report;
pub mod schedule;
pub mod stock;

pub use finance::{
    budget_status, budget_utilization, materials_budget_usage, materials_consumed_value,
    materials_planned_value, monthly_financial_breakdown, total_spent, visit_expense_total,
    visits_expense_total, BudgetStatus, MaterialsBudgetUsage, MonthlyFinancials,
};
pub use progress::{active_task_count, overall_progress, phase_progress, task_completion, TaskCompletion};
pub use report::{
    delayed_phase_count, expired_documents, pending_documents, portfolio_overview, project_summary,
    PortfolioOverview, ProjectSummary,
};
pub use schedule::{
    delayed_phases, elapsed_time_percent, next_upcoming_milestone, task_delay, DelayImpact,
    DelayThresholds, TaskDelay,
};
pub use stock::{low_stock_alerts, material_usage, materials_in_stock, MaterialUsage};
