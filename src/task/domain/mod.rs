//! Domain model for the task pool and the daily board.
//!
//! Tasks live in a general pool and may be promoted to a daily board split
//! into three time-of-day lanes. The domain enforces the completion pairing
//! (status completed iff a completion timestamp exists), the priority range
//! and the lane rules, and keeps all infrastructure concerns outside.

mod attachment;
mod error;
mod ids;
mod lane;
mod priority;
mod record;
mod task;

pub use attachment::{Attachment, AttachmentSource};
pub use error::{ParseLaneError, ParseTaskStatusError, TaskDomainError};
pub use ids::{AttachmentId, TaskId, UserId};
pub use lane::Lane;
pub use priority::{PriorityFactor, PriorityLevel, PriorityParams};
pub use record::TaskRecord;
pub use task::{Task, TaskDraft, TaskPatch, TaskStatus};
