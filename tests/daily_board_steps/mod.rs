//! Step definitions for daily board scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
