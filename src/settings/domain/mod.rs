//! Domain model for the per-user settings aggregate.
//!
//! Settings own the category definitions tasks refer to, the scoring weights,
//! the lane time windows and the daily objectives. Every mutation is
//! validated here before it reaches storage.

mod category;
mod error;
mod settings;

pub use category::{Category, CategoryColor, CategoryId, CategoryName, CategoryPatch};
pub use error::SettingsDomainError;
pub use settings::{
    DailyObjectives, LaneWindow, PriorityWeights, Settings, SettingsRecord, SwimlaneTimes,
    WeightFactor, WeightsPatch,
};
