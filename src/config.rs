//! Session configuration.
//!
//! [`PlannerConfig`] carries the values a planning session needs beyond the
//! user's own settings document: the offset that defines the user's local
//! calendar day, the upper bound on one atomic batch and the first day of the
//! analytics week.

use chrono::{FixedOffset, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted distance from UTC, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Default upper bound on writes in one atomic batch.
const DEFAULT_MAX_BATCH_WRITES: usize = 500;

/// Errors returned while building or parsing a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The UTC offset lies outside ±18 hours.
    #[error("UTC offset of {0} minutes is outside the supported ±18h range")]
    InvalidUtcOffset(i32),

    /// The batch limit must allow at least one write.
    #[error("batch write limit must be at least 1")]
    ZeroBatchLimit,

    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(String),
}

/// Configuration for a planning session.
///
/// # Examples
///
/// ```
/// use tassko::config::PlannerConfig;
///
/// let config = PlannerConfig::default();
/// assert_eq!(config.max_batch_writes(), 500);
///
/// let shifted = PlannerConfig::default()
///     .with_utc_offset_minutes(120)
///     .expect("offset within range");
/// assert_eq!(shifted.local_offset().local_minus_utc(), 7200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlannerConfig", into = "RawPlannerConfig")]
pub struct PlannerConfig {
    utc_offset_minutes: i32,
    max_batch_writes: usize,
    week_starts_on: Weekday,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPlannerConfig {
    utc_offset_minutes: i32,
    max_batch_writes: usize,
    week_starts_on: Weekday,
}

impl Default for RawPlannerConfig {
    fn default() -> Self {
        PlannerConfig::default().into()
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            max_batch_writes: DEFAULT_MAX_BATCH_WRITES,
            week_starts_on: Weekday::Mon,
        }
    }
}

impl PlannerConfig {
    /// Parses a JSON configuration document. Absent fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching
    /// validation error for out-of-range values.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let raw: RawPlannerConfig =
            serde_json::from_str(document).map_err(|err| ConfigError::Parse(err.to_string()))?;
        Self::try_from(raw)
    }

    /// Sets the offset from UTC that defines the user's local day.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUtcOffset`] outside ±18 hours.
    pub const fn with_utc_offset_minutes(mut self, minutes: i32) -> Result<Self, ConfigError> {
        if minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
            return Err(ConfigError::InvalidUtcOffset(minutes));
        }
        self.utc_offset_minutes = minutes;
        Ok(self)
    }

    /// Sets the maximum number of writes accepted in one atomic batch.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBatchLimit`] when `limit` is zero.
    pub const fn with_max_batch_writes(mut self, limit: usize) -> Result<Self, ConfigError> {
        if limit == 0 {
            return Err(ConfigError::ZeroBatchLimit);
        }
        self.max_batch_writes = limit;
        Ok(self)
    }

    /// Sets the first day of the analytics week.
    #[must_use]
    pub const fn with_week_starts_on(mut self, weekday: Weekday) -> Self {
        self.week_starts_on = weekday;
        self
    }

    /// Returns the configured offset in minutes.
    #[must_use]
    pub const fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    /// Returns the offset that defines the user's local calendar day.
    #[must_use]
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }

    /// Returns the maximum number of writes in one atomic batch.
    #[must_use]
    pub const fn max_batch_writes(&self) -> usize {
        self.max_batch_writes
    }

    /// Returns the first day of the analytics week.
    #[must_use]
    pub const fn week_starts_on(&self) -> Weekday {
        self.week_starts_on
    }
}

impl TryFrom<RawPlannerConfig> for PlannerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawPlannerConfig) -> Result<Self, Self::Error> {
        Self::default()
            .with_utc_offset_minutes(raw.utc_offset_minutes)?
            .with_max_batch_writes(raw.max_batch_writes)
            .map(|config| config.with_week_starts_on(raw.week_starts_on))
    }
}

impl From<PlannerConfig> for RawPlannerConfig {
    fn from(config: PlannerConfig) -> Self {
        Self {
            utc_offset_minutes: config.utc_offset_minutes,
            max_batch_writes: config.max_batch_writes,
            week_starts_on: config.week_starts_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PlannerConfig};
    use chrono::Weekday;
    use rstest::rstest;

    #[rstest]
    fn empty_document_yields_defaults() {
        let config = PlannerConfig::from_json_str("{}").expect("empty document parses");
        assert_eq!(config, PlannerConfig::default());
    }

    #[rstest]
    fn document_overrides_selected_fields() {
        let config = PlannerConfig::from_json_str(
            r#"{"utcOffsetMinutes": -300, "weekStartsOn": "Sun"}"#,
        )
        .expect("valid document");

        assert_eq!(config.utc_offset_minutes(), -300);
        assert_eq!(config.week_starts_on(), Weekday::Sun);
        assert_eq!(config.max_batch_writes(), 500);
    }

    #[rstest]
    #[case(1081)]
    #[case(-1081)]
    fn offsets_beyond_eighteen_hours_are_rejected(#[case] minutes: i32) {
        let result = PlannerConfig::default().with_utc_offset_minutes(minutes);
        assert_eq!(result, Err(ConfigError::InvalidUtcOffset(minutes)));
    }

    #[rstest]
    fn zero_batch_limit_is_rejected() {
        let result = PlannerConfig::from_json_str(r#"{"maxBatchWrites": 0}"#);
        assert_eq!(result, Err(ConfigError::ZeroBatchLimit));
    }

    #[rstest]
    fn malformed_document_is_a_parse_error() {
        let result = PlannerConfig::from_json_str("not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
