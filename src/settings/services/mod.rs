//! Application services for settings maintenance.

mod store;

pub use store::{SettingsService, SettingsServiceError, SettingsServiceResult};
