//! Once-per-local-day reset policy for the daily board.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Decides whether the daily reset is due.
///
/// The reset runs when it has never run, or when it last ran on an earlier
/// local date. A clock that moved backwards never triggers a reset.
#[must_use]
pub fn should_run_daily_reset(last_reset: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_reset.is_none_or(|last| last < today)
}

/// Returns the calendar date of `instant` in the user's local offset.
#[must_use]
pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}
