//! Completion time series against the daily objectives.

use super::round_hundredths;
use crate::config::PlannerConfig;
use crate::settings::domain::DailyObjectives;
use crate::task::domain::Task;
use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

const HOURS_PER_DAY: u32 = 24;
const DAYS_PER_WEEK: u32 = 7;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Period covered by a completion series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// The current local day in hourly buckets.
    Day,
    /// The current local week in daily buckets.
    Week,
    /// The current local month in daily buckets.
    Month,
}

/// Completions within one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionBucket {
    /// Display label: `"9:00"`, `"Mon"` or `"17"`.
    pub label: String,
    /// Tasks completed in the bucket.
    pub tasks_completed: u32,
    /// Estimated hours of the completed tasks, rounded to two decimals.
    pub hours_completed: f64,
}

/// Completions of one period with the matching objectives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSeries {
    /// Period covered.
    pub range: TimeRange,
    /// Buckets in chronological order.
    pub buckets: Vec<CompletionBucket>,
    /// Task objective for the whole period.
    pub objective_tasks: u32,
    /// Hours objective for the whole period.
    pub objective_hours: f64,
    /// Tasks completed in the period.
    pub total_tasks: u32,
    /// Hours completed in the period, rounded to two decimals.
    pub total_hours: f64,
}

/// The local calendar window a series is drawn over.
struct Period {
    range: TimeRange,
    first: NaiveDate,
    days: u32,
}

impl Period {
    fn containing(range: TimeRange, today: NaiveDate, week_starts_on: Weekday) -> Self {
        match range {
            TimeRange::Day => Self {
                range,
                first: today,
                days: 1,
            },
            TimeRange::Week => Self {
                range,
                first: today.week(week_starts_on).first_day(),
                days: DAYS_PER_WEEK,
            },
            TimeRange::Month => {
                let first = today.with_day(1).unwrap_or(today);
                let days = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| u32::try_from((next - first).num_days()).ok())
                    .unwrap_or(31);
                Self { range, first, days }
            }
        }
    }

    fn labels(&self) -> Vec<String> {
        match self.range {
            TimeRange::Day => (0..HOURS_PER_DAY).map(|hour| format!("{hour}:00")).collect(),
            TimeRange::Week => self
                .dates()
                .map(|date| date.format("%a").to_string())
                .collect(),
            TimeRange::Month => self.dates().map(|date| date.day().to_string()).collect(),
        }
    }

    fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.first
            .iter_days()
            .take(usize::try_from(self.days).unwrap_or(usize::MAX))
    }

    fn bucket_of(&self, completed_at: DateTime<FixedOffset>) -> Option<usize> {
        let elapsed = (completed_at.date_naive() - self.first).num_days();
        if !(0..i64::from(self.days)).contains(&elapsed) {
            return None;
        }
        match self.range {
            TimeRange::Day => usize::try_from(completed_at.hour()).ok(),
            TimeRange::Week | TimeRange::Month => usize::try_from(elapsed).ok(),
        }
    }
}

/// Buckets completed tasks of the current local day, week or month.
///
/// Hours come from each task's estimated duration; tasks without one count
/// toward the task total only. Objectives are the daily objectives scaled
/// by the number of days in the period.
#[must_use]
pub fn completion_series(
    tasks: &[Task],
    objectives: DailyObjectives,
    range: TimeRange,
    now: DateTime<Utc>,
    config: &PlannerConfig,
) -> CompletionSeries {
    let offset = config.local_offset();
    let today = now.with_timezone(&offset).date_naive();
    let period = Period::containing(range, today, config.week_starts_on());

    let mut buckets: Vec<CompletionBucket> = period
        .labels()
        .into_iter()
        .map(|label| CompletionBucket {
            label,
            tasks_completed: 0,
            hours_completed: 0.0,
        })
        .collect();

    for task in tasks {
        let Some(completed_at) = task.completed_at() else {
            continue;
        };
        let Some(bucket) = period
            .bucket_of(completed_at.with_timezone(&offset))
            .and_then(|index| buckets.get_mut(index))
        else {
            continue;
        };
        bucket.tasks_completed = bucket.tasks_completed.saturating_add(1);
        bucket.hours_completed += task
            .duration_minutes()
            .map_or(0.0, |minutes| f64::from(minutes) / MINUTES_PER_HOUR);
    }

    let mut total_tasks: u32 = 0;
    let mut total_hours = 0.0;
    for bucket in &mut buckets {
        total_tasks = total_tasks.saturating_add(bucket.tasks_completed);
        total_hours += bucket.hours_completed;
        bucket.hours_completed = round_hundredths(bucket.hours_completed);
    }

    CompletionSeries {
        range,
        buckets,
        objective_tasks: objectives.tasks().saturating_mul(period.days),
        objective_hours: objectives.hours() * f64::from(period.days),
        total_tasks,
        total_hours: round_hundredths(total_hours),
    }
}
