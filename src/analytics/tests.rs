//! Unit tests for the analytics projections.

use super::*;
use crate::config::PlannerConfig;
use crate::settings::domain::{DailyObjectives, PriorityWeights, Settings};
use crate::task::domain::{Lane, Task, TaskPatch, TaskStatus};
use crate::test_support::{ManualClock, at, personal, task_with, work};
use chrono::Weekday;
use rstest::{fixture, rstest};

fn pending(title: &str) -> Task {
    task_with(
        title,
        (5, 5, 5),
        at("2025-03-10T09:00:00Z"),
        at("2025-03-20T12:00:00Z"),
    )
}

fn completed(title: &str, duration_minutes: Option<u32>, completed_at: &str) -> Task {
    let mut task = pending(title);
    task.apply_patch(
        TaskPatch::new()
            .with_duration_minutes(duration_minutes)
            .with_status(TaskStatus::Completed),
        &ManualClock::new(at(completed_at)),
    )
    .expect("valid patch");
    task
}

fn labels(series: &CompletionSeries) -> Vec<&str> {
    series
        .buckets
        .iter()
        .map(|bucket| bucket.label.as_str())
        .collect()
}

fn bucket<'a>(series: &'a CompletionSeries, label: &str) -> &'a CompletionBucket {
    series
        .buckets
        .iter()
        .find(|bucket| bucket.label == label)
        .expect("bucket exists")
}

#[fixture]
fn objectives() -> DailyObjectives {
    DailyObjectives::new(5, 8.0).expect("valid objectives")
}

#[test]
fn category_distribution_follows_settings_order_with_zeros() {
    let settings = Settings::default();
    let mut errand = pending("Groceries");
    errand
        .apply_patch(
            TaskPatch::new().with_category(personal()),
            &ManualClock::new(at("2025-03-10T09:00:00Z")),
        )
        .expect("valid patch");
    let tasks = vec![
        pending("Report"),
        completed("Review", None, "2025-03-11T10:00:00Z"),
        errand,
    ];

    let distribution = category_distribution(&tasks, &settings);

    let counts: Vec<(&str, usize)> = distribution
        .iter()
        .map(|entry| (entry.category_id.as_str(), entry.count))
        .collect();
    assert_eq!(
        counts,
        [("work", 2), ("personal", 1), ("study", 0), ("health", 0)]
    );
    assert_eq!(
        distribution.first().map(|entry| entry.name.as_str()),
        Some("Work")
    );
    assert_eq!(distribution.first().map(|entry| &entry.category_id), Some(&work()));
}

#[test]
fn lane_distribution_counts_daily_tasks_only() {
    let mut morning = pending("Morning");
    morning.promote_to_daily();
    let mut evening = pending("Evening");
    evening.promote_to_daily();
    evening
        .move_to_lane(Lane::Evening)
        .expect("daily task can move");
    let tasks = vec![morning, evening, pending("Pool")];

    let distribution = lane_distribution(&tasks);

    let counts: Vec<(Lane, usize)> = distribution
        .iter()
        .map(|entry| (entry.lane, entry.count))
        .collect();
    assert_eq!(
        counts,
        [(Lane::Morning, 1), (Lane::Midday, 0), (Lane::Evening, 1)]
    );
}

#[test]
fn board_summary_reports_membership_and_rate() {
    let mut daily = pending("Daily");
    daily.promote_to_daily();
    let tasks = vec![
        daily,
        pending("Pool"),
        pending("Pool too"),
        completed("Done", None, "2025-03-11T10:00:00Z"),
    ];

    let summary = board_summary(&tasks);

    assert_eq!(
        summary,
        BoardSummary {
            total: 4,
            pool: 3,
            daily: 1,
            completed: 1,
            completion_rate: 25.0,
        }
    );
}

#[test]
fn empty_board_has_zero_completion_rate() {
    assert_eq!(board_summary(&[]).completion_rate, 0.0);
}

#[test]
fn scatter_plots_completed_tasks_with_rounded_hours() {
    let done = completed("Done", None, "2025-03-10T10:20:00Z");
    let tasks = vec![done.clone(), pending("Pending")];

    let points = priority_vs_duration(
        &tasks,
        PriorityWeights::default(),
        at("2025-03-12T09:00:00Z"),
    );

    assert_eq!(
        points,
        [ScatterPoint {
            task_id: done.id(),
            score: 16.0,
            duration_hours: 1.33,
            lane: Lane::Morning,
        }]
    );
}

#[rstest]
fn day_series_buckets_by_local_hour(objectives: DailyObjectives) {
    let tasks = vec![
        completed("Early", Some(60), "2025-03-12T09:30:00Z"),
        completed("Also early", Some(30), "2025-03-12T09:45:00Z"),
        completed("No estimate", None, "2025-03-12T14:00:00Z"),
        completed("Yesterday", Some(120), "2025-03-11T23:00:00Z"),
        pending("Open"),
    ];

    let series = completion_series(
        &tasks,
        objectives,
        TimeRange::Day,
        at("2025-03-12T15:00:00Z"),
        &PlannerConfig::default(),
    );

    assert_eq!(series.buckets.len(), 24);
    assert_eq!(labels(&series).first(), Some(&"0:00"));
    assert_eq!(bucket(&series, "9:00").tasks_completed, 2);
    assert_eq!(bucket(&series, "9:00").hours_completed, 1.5);
    assert_eq!(bucket(&series, "14:00").tasks_completed, 1);
    assert_eq!(bucket(&series, "14:00").hours_completed, 0.0);
    assert_eq!(series.total_tasks, 3);
    assert_eq!(series.total_hours, 1.5);
    assert_eq!(series.objective_tasks, 5);
    assert_eq!(series.objective_hours, 8.0);
}

#[rstest]
fn day_series_uses_the_configured_offset(objectives: DailyObjectives) {
    let config = PlannerConfig::default()
        .with_utc_offset_minutes(120)
        .expect("valid offset");
    let tasks = vec![completed("Late", Some(45), "2025-03-12T23:30:00Z")];

    let series = completion_series(
        &tasks,
        objectives,
        TimeRange::Day,
        at("2025-03-13T08:00:00Z"),
        &config,
    );

    assert_eq!(bucket(&series, "1:00").tasks_completed, 1);
    assert_eq!(series.total_hours, 0.75);
}

#[rstest]
#[case::monday(Weekday::Mon, "Mon", 1)]
#[case::sunday(Weekday::Sun, "Sun", 2)]
fn week_series_starts_on_the_configured_day(
    objectives: DailyObjectives,
    #[case] start: Weekday,
    #[case] first_label: &str,
    #[case] expected_tasks: u32,
) {
    let config = PlannerConfig::default().with_week_starts_on(start);
    let tasks = vec![
        completed("Sunday", None, "2025-03-09T12:00:00Z"),
        completed("Monday", None, "2025-03-10T12:00:00Z"),
    ];

    let series = completion_series(
        &tasks,
        objectives,
        TimeRange::Week,
        at("2025-03-12T15:00:00Z"),
        &config,
    );

    assert_eq!(series.buckets.len(), 7);
    assert_eq!(labels(&series).first(), Some(&first_label));
    assert_eq!(series.total_tasks, expected_tasks);
    assert_eq!(bucket(&series, "Mon").tasks_completed, 1);
    assert_eq!(series.objective_tasks, 35);
    assert_eq!(series.objective_hours, 56.0);
}

#[rstest]
#[case::march("2025-03-12T15:00:00Z", 31)]
#[case::february("2025-02-12T15:00:00Z", 28)]
#[case::leap_february("2024-02-12T15:00:00Z", 29)]
fn month_series_has_one_bucket_per_day(
    objectives: DailyObjectives,
    #[case] now: &str,
    #[case] days: u32,
) {
    let series = completion_series(
        &[],
        objectives,
        TimeRange::Month,
        at(now),
        &PlannerConfig::default(),
    );

    assert_eq!(
        series.buckets.len(),
        usize::try_from(days).expect("small count")
    );
    assert_eq!(labels(&series).first(), Some(&"1"));
    assert_eq!(series.objective_tasks, 5 * days);
    assert_eq!(series.total_tasks, 0);
}

#[rstest]
fn month_series_counts_completions_by_day(objectives: DailyObjectives) {
    let tasks = vec![
        completed("Start", Some(90), "2025-03-01T08:00:00Z"),
        completed("Mid", Some(20), "2025-03-17T08:00:00Z"),
        completed("Previous month", Some(60), "2025-02-28T08:00:00Z"),
    ];

    let series = completion_series(
        &tasks,
        objectives,
        TimeRange::Month,
        at("2025-03-20T15:00:00Z"),
        &PlannerConfig::default(),
    );

    assert_eq!(bucket(&series, "1").hours_completed, 1.5);
    assert_eq!(bucket(&series, "17").hours_completed, 0.33);
    assert_eq!(series.total_tasks, 2);
    assert_eq!(series.total_hours, 1.83);
}
