use serde::Serialize;

use crate::model::{Phase, Project, TaskStatus};

/// Mean of percentages, each clamped to [0, 100] first. Stored values are
/// only checked on edit, so legacy documents can carry anything finite.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| {
        (sum + v.clamp(0.0, 100.0), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// The single canonical project progress: mean of the phases' `progress`,
/// 0 for an empty timeline.
pub fn overall_progress(project: &Project) -> f64 {
    mean(project.timeline.iter().map(|phase| phase.progress))
}

/// Mean of the phase's task progress, 0 when the phase has no tasks.
pub fn phase_progress(phase: &Phase) -> f64 {
    mean(phase.tasks.iter().map(|task| task.progress))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    pub total: usize,
    pub completed: usize,
    pub percentage: f64,
}

/// Counts tasks across all phases; a task is done when its progress reaches 100.
pub fn task_completion(project: &Project) -> TaskCompletion {
    let (total, completed) = project.tasks().fold((0, 0), |(total, completed), task| {
        (total + 1, completed + usize::from(task.progress >= 100.0))
    });
    let percentage = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    TaskCompletion {
        total,
        completed,
        percentage,
    }
}

pub fn active_task_count(project: &Project) -> usize {
    project
        .tasks()
        .filter(|task| task.status == TaskStatus::InProgress)
        .count()
}
