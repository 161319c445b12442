//! Read-only completion analytics.
//!
//! Every projection is a pure function of the task collection, recomputed
//! on each call. Completion aggregates only consider tasks that carry a
//! completion timestamp.

mod distribution;
mod scatter;
mod series;

pub use distribution::{
    BoardSummary, CategoryCount, LaneCount, board_summary, category_distribution,
    lane_distribution,
};
pub use scatter::{ScatterPoint, priority_vs_duration};
pub use series::{CompletionBucket, CompletionSeries, TimeRange, completion_series};

/// Rounds to two decimal places.
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests;
