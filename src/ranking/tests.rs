//! Unit tests for priority scoring and the ranked views.

use super::*;
use crate::test_support::{ManualClock, at, task_with};
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;

fn now() -> DateTime<Utc> {
    at("2025-03-10T12:00:00Z")
}

fn due_in(title: &str, priority: (i64, i64, i64), hours: i64) -> Task {
    task_with(
        title,
        priority,
        at("2025-03-01T08:00:00Z"),
        now() + TimeDelta::hours(hours),
    )
}

const fn weights(urgency: f64, importance: f64, impact: f64, deadline: f64) -> PriorityWeights {
    PriorityWeights {
        urgency,
        importance,
        impact,
        deadline,
    }
}

#[test]
fn weighted_sum_includes_the_deadline_step() {
    let task = due_in("Report", (8, 6, 4), 18);

    let value = score(&task, weights(2.0, 1.0, 1.0, 3.0), now());

    assert_eq!(value, 56.0);
}

#[rstest]
#[case::hours(0.5, 10)]
#[case::just_under_a_day(0.99, 10)]
#[case::one_day(1.0, 7)]
#[case::two_days(2.0, 7)]
#[case::three_days(3.0, 4)]
#[case::five_days(5.0, 4)]
#[case::one_week(7.0, 1)]
#[case::ten_days(10.0, 1)]
#[case::overdue(-2.0, 10)]
fn deadline_steps(#[case] days: f64, #[case] expected: u8) {
    assert_eq!(deadline_factor(days), expected);
}

#[test]
fn days_until_is_fractional_and_negative_when_overdue() {
    assert_eq!(days_until(now() + TimeDelta::hours(36), now()), 1.5);
    assert_eq!(days_until(now() - TimeDelta::hours(12), now()), -0.5);
}

#[test]
fn score_never_drops_as_the_deadline_approaches() {
    let defaults = PriorityWeights::default();
    let task = due_in("Report", (5, 5, 5), 24 * 10);
    let clock = ManualClock::new(now());

    let mut previous = score(&task, defaults, clock.utc());
    for _ in 0..24 {
        clock.advance(TimeDelta::hours(12));
        let current = score(&task, defaults, clock.utc());
        assert!(current >= previous, "{current} < {previous}");
        previous = current;
    }
}

#[test]
fn invalid_weights_count_as_zero() {
    let task = due_in("Report", (8, 6, 4), 18);

    let value = score(&task, weights(-1.0, f64::NAN, f64::INFINITY, 1.0), now());

    assert_eq!(value, 10.0);
}

#[test]
fn ranking_is_descending_and_stable_for_ties() {
    let low = due_in("Low", (1, 1, 1), 24 * 10);
    let tie_a = due_in("Tie A", (5, 5, 5), 24 * 10);
    let high = due_in("High", (9, 9, 9), 12);
    let tie_b = due_in("Tie B", (5, 5, 5), 24 * 10);
    let tasks = [low, tie_a, high, tie_b];

    let ranked = rank_tasks(&tasks, PriorityWeights::default(), now());

    let titles: Vec<&str> = ranked.iter().map(|entry| entry.task.title()).collect();
    assert_eq!(titles, ["High", "Tie A", "Tie B", "Low"]);
}

#[test]
fn lane_view_lists_only_daily_tasks_of_that_lane() {
    let mut morning = due_in("Morning", (5, 5, 5), 48);
    morning.promote_to_daily();
    let mut evening = due_in("Evening", (9, 9, 9), 48);
    evening.promote_to_daily();
    evening
        .move_to_lane(Lane::Evening)
        .expect("daily task can move");
    let pool = due_in("Pool", (9, 9, 9), 48);
    let tasks = vec![morning, evening, pool];

    let view = lane_view(&tasks, Lane::Morning, PriorityWeights::default(), now());

    let titles: Vec<&str> = view.iter().map(|entry| entry.task.title()).collect();
    assert_eq!(titles, ["Morning"]);
}

#[test]
fn pool_view_splits_active_and_completed() {
    let clock = ManualClock::new(now());
    let active = due_in("Active", (5, 5, 5), 48);
    let mut done = due_in("Done", (9, 9, 9), 48);
    done.complete(&clock);
    let mut daily = due_in("Daily", (9, 9, 9), 48);
    daily.promote_to_daily();
    let tasks = vec![active, done, daily];

    let view = pool_view(&tasks, PriorityWeights::default(), now());

    assert_eq!(view.active.len(), 1);
    assert_eq!(view.completed.len(), 1);
    assert_eq!(
        view.active.first().map(|entry| entry.task.title()),
        Some("Active")
    );
    assert_eq!(
        view.completed.first().map(|entry| entry.task.title()),
        Some("Done")
    );
}
