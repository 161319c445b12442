//! Application services for the task engine.

mod engine;
mod rollover;

pub use engine::{
    CreateTaskRequest, DailyBoardReset, PromotionOutcome, RolloverOutcome, TaskEngine,
    TaskEngineError, TaskEngineResult,
};
pub use rollover::{local_date, should_run_daily_reset};
