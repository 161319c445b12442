//! Priority against completion time.

use super::round_hundredths;
use crate::ranking::score;
use crate::settings::domain::PriorityWeights;
use crate::task::domain::{Lane, Task, TaskId};
use chrono::{DateTime, Utc};
use serde::Serialize;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// One completed task plotted by score and time to completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    /// Task identifier.
    pub task_id: TaskId,
    /// Priority score at evaluation time.
    pub score: f64,
    /// Hours from creation to completion, rounded to two decimals.
    pub duration_hours: f64,
    /// Lane the task was completed in.
    pub lane: Lane,
}

/// Pairs each completed task's score with the hours it took to complete.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "millisecond spans of task lifetimes fit in f64 exactly"
)]
pub fn priority_vs_duration(
    tasks: &[Task],
    weights: PriorityWeights,
    now: DateTime<Utc>,
) -> Vec<ScatterPoint> {
    tasks
        .iter()
        .filter_map(|task| {
            let completed_at = task.completed_at()?;
            let millis = (completed_at - task.created_at()).num_milliseconds();
            Some(ScatterPoint {
                task_id: task.id(),
                score: score(task, weights, now),
                duration_hours: round_hundredths(millis as f64 / MILLIS_PER_HOUR),
                lane: task.lane(),
            })
        })
        .collect()
}
