//! Category and lane distributions and the board summary.

use crate::settings::domain::{CategoryId, Settings};
use crate::task::domain::{Lane, Task};
use serde::Serialize;

/// Number of tasks in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Category identifier.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Tasks referencing the category, completed or not.
    pub count: usize,
}

/// Counts all tasks per category, in the settings' category order.
/// Categories without tasks are included with a zero count.
#[must_use]
pub fn category_distribution(tasks: &[Task], settings: &Settings) -> Vec<CategoryCount> {
    settings
        .categories()
        .iter()
        .map(|category| CategoryCount {
            category_id: category.id().clone(),
            name: category.name().as_str().to_owned(),
            color: category.color().as_str().to_owned(),
            count: tasks
                .iter()
                .filter(|task| task.category_id() == category.id())
                .count(),
        })
        .collect()
}

/// Number of daily-board tasks in one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaneCount {
    /// Lane.
    pub lane: Lane,
    /// Daily-board tasks in the lane.
    pub count: usize,
}

/// Counts daily-board tasks per lane, morning first.
#[must_use]
pub fn lane_distribution(tasks: &[Task]) -> Vec<LaneCount> {
    Lane::ALL
        .into_iter()
        .map(|lane| LaneCount {
            lane,
            count: tasks
                .iter()
                .filter(|task| task.is_daily() && task.lane() == lane)
                .count(),
        })
        .collect()
}

/// Headline numbers for the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    /// All tasks.
    pub total: usize,
    /// Tasks not on the daily board.
    pub pool: usize,
    /// Tasks on the daily board.
    pub daily: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Completed share of all tasks in percent; 0 without tasks.
    pub completion_rate: f64,
}

/// Summarises board membership and completion.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "task counts are far below f64's exact integer range"
)]
pub fn board_summary(tasks: &[Task]) -> BoardSummary {
    let total = tasks.len();
    let daily = tasks.iter().filter(|task| task.is_daily()).count();
    let completed = tasks.iter().filter(|task| task.is_completed()).count();
    let completion_rate = if total == 0 {
        0.0
    } else {
        completed as f64 * 100.0 / total as f64
    };
    BoardSummary {
        total,
        pool: total - daily,
        daily,
        completed,
        completion_rate,
    }
}
