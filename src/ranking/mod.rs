//! Priority scoring and the ranked board views built on it.
//!
//! A task's score is the weighted sum of its three priority levels and a
//! deadline factor stepped by the time left until its deadline:
//!
//! | time left       | factor |
//! |-----------------|--------|
//! | under 1 day     | 10     |
//! | 1 to 3 days     | 7      |
//! | 3 to 7 days     | 4      |
//! | 7 days or more  | 1      |
//!
//! Overdue tasks fall into the first step. Scoring is pure: it reads the
//! evaluation instant from its caller and never fails.

use crate::settings::domain::PriorityWeights;
use crate::task::domain::{Lane, Task};
use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fractional days from `now` until `deadline`, negative once overdue.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "millisecond spans of realistic deadlines fit in f64 exactly"
)]
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (deadline - now).num_milliseconds() as f64 / 1_000.0 / SECONDS_PER_DAY
}

/// Deadline urgency step for `days` days left.
#[must_use]
pub const fn deadline_factor(days: f64) -> u8 {
    if days < 1.0 {
        10
    } else if days < 3.0 {
        7
    } else if days < 7.0 {
        4
    } else {
        1
    }
}

/// Weighted priority score of `task` at `now`.
///
/// Negative or non-finite weights count as 0. The score is unbounded above.
#[must_use]
pub fn score(task: &Task, weights: PriorityWeights, now: DateTime<Utc>) -> f64 {
    let effective = weights.effective();
    let priority = task.priority();
    let factor = deadline_factor(days_until(task.deadline(), now));

    f64::from(priority.urgency().value()) * effective.urgency
        + f64::from(priority.importance().value()) * effective.importance
        + f64::from(priority.impact().value()) * effective.impact
        + f64::from(factor) * effective.deadline
}

/// A task paired with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedTask<'a> {
    /// The scored task.
    pub task: &'a Task,
    /// Its score at evaluation time.
    pub score: f64,
}

/// Orders tasks by descending score. Equal scores keep their input order.
#[must_use]
pub fn rank_tasks<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    weights: PriorityWeights,
    now: DateTime<Utc>,
) -> Vec<RankedTask<'a>> {
    let mut ranked: Vec<RankedTask<'a>> = tasks
        .into_iter()
        .map(|task| RankedTask {
            task,
            score: score(task, weights, now),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Daily-board tasks of one lane, ranked.
#[must_use]
pub fn lane_view(
    tasks: &[Task],
    lane: Lane,
    weights: PriorityWeights,
    now: DateTime<Utc>,
) -> Vec<RankedTask<'_>> {
    rank_tasks(
        tasks
            .iter()
            .filter(|task| task.is_daily() && task.lane() == lane),
        weights,
        now,
    )
}

/// Pool tasks split by completion, each half ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolView<'a> {
    /// Pool tasks still to do.
    pub active: Vec<RankedTask<'a>>,
    /// Completed pool tasks.
    pub completed: Vec<RankedTask<'a>>,
}

/// Builds the pool view: tasks not on the daily board, active first.
#[must_use]
pub fn pool_view(tasks: &[Task], weights: PriorityWeights, now: DateTime<Utc>) -> PoolView<'_> {
    let (completed, active): (Vec<&Task>, Vec<&Task>) = tasks
        .iter()
        .filter(|task| !task.is_daily())
        .partition(|task| task.is_completed());
    PoolView {
        active: rank_tasks(active, weights, now),
        completed: rank_tasks(completed, weights, now),
    }
}

#[cfg(test)]
mod tests;
