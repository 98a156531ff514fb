use chrono::NaiveDate;
use serde::Serialize;

use crate::config::AlertsConfig;
use crate::model::{EntityId, Milestone, Phase, Project};

/// Share of the planned duration that has elapsed by `today`, in [0, 100].
///
/// Before the start date this is 0 and after the estimated end it is 100. A
/// zero-length schedule counts as fully elapsed. Projects missing either date
/// report 0.
pub fn elapsed_time_percent(project: &Project, today: NaiveDate) -> f64 {
    let (Some(start), Some(end)) = (project.start_date, project.estimated_end_date) else {
        return 0.0;
    };

    if today < start {
        return 0.0;
    }
    if today > end {
        return 100.0;
    }

    let total = (end - start).num_days();
    if total <= 0 {
        return 100.0;
    }
    let elapsed = (today - start).num_days();
    elapsed as f64 / total as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayImpact {
    Low,
    Medium,
    High,
}

/// Day counts above which a delay is classified Medium or High.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayThresholds {
    pub medium_days: i64,
    pub high_days: i64,
}

impl Default for DelayThresholds {
    fn default() -> Self {
        Self {
            medium_days: 2,
            high_days: 5,
        }
    }
}

impl From<&AlertsConfig> for DelayThresholds {
    fn from(alerts: &AlertsConfig) -> Self {
        Self {
            medium_days: alerts.delay_medium_days,
            high_days: alerts.delay_high_days,
        }
    }
}

impl DelayImpact {
    pub fn classify(days: i64, thresholds: &DelayThresholds) -> Self {
        if days > thresholds.high_days {
            DelayImpact::High
        } else if days > thresholds.medium_days {
            DelayImpact::Medium
        } else {
            DelayImpact::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDelay {
    pub phase_id: EntityId,
    pub phase: String,
    pub days: i64,
    pub impact: DelayImpact,
}

/// A phase is delayed once `today` is past its end date while its progress
/// is still below 100. Phases without an end date are never delayed.
pub fn task_delay(phase: &Phase, today: NaiveDate, thresholds: &DelayThresholds) -> Option<TaskDelay> {
    let end = phase.end_date?;
    if today <= end || phase.progress >= 100.0 {
        return None;
    }

    let days = (today - end).num_days();
    Some(TaskDelay {
        phase_id: phase.id,
        phase: phase.name.clone(),
        days,
        impact: DelayImpact::classify(days, thresholds),
    })
}

pub fn delayed_phases(
    project: &Project,
    today: NaiveDate,
    thresholds: &DelayThresholds,
) -> Vec<TaskDelay> {
    project
        .timeline
        .iter()
        .filter_map(|phase| task_delay(phase, today, thresholds))
        .collect()
}

/// Earliest milestone strictly after `today`, across all phases.
pub fn next_upcoming_milestone(project: &Project, today: NaiveDate) -> Option<&Milestone> {
    project
        .milestones()
        .filter(|m| m.date.is_some_and(|d| d > today))
        .min_by_key(|m| m.date)
}
