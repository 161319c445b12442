//! Time-of-day lanes of the daily board.

use super::ParseLaneError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three fixed time-of-day buckets of the daily board.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Lane {
    /// Morning lane; the default for new and reset tasks.
    #[default]
    Morning,
    /// Midday lane.
    Midday,
    /// Evening lane.
    Evening,
}

impl Lane {
    /// All lanes in board order.
    pub const ALL: [Self; 3] = [Self::Morning, Self::Midday, Self::Evening];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Midday => "Midday",
            Self::Evening => "Evening",
        }
    }
}

impl TryFrom<&str> for Lane {
    type Error = ParseLaneError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "morning" => Ok(Self::Morning),
            "midday" => Ok(Self::Midday),
            "evening" => Ok(Self::Evening),
            _ => Err(ParseLaneError(value.to_owned())),
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
