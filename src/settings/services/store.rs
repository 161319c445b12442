//! Settings service: validated read-modify-write of the settings document.

use crate::error::FailureKind;
use crate::settings::domain::{
    Category, CategoryId, CategoryPatch, Settings, SettingsDomainError, WeightsPatch,
};
use crate::sync::{
    ports::DocumentStore,
    services::{Mutation, SyncAdapter, SyncError},
};
use crate::task::domain::Lane;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for settings operations.
#[derive(Debug, Clone, Error)]
pub enum SettingsServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SettingsDomainError),
    /// Loading or persisting failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl SettingsServiceError {
    /// Classifies the error for presentation.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Sync(err) => err.kind(),
        }
    }
}

/// Result type for settings service operations.
pub type SettingsServiceResult<T> = Result<T, SettingsServiceError>;

/// Settings maintenance service.
///
/// Each operation loads the stored settings, applies one validated change
/// and writes the whole document back. Nothing is written when validation
/// fails.
#[derive(Debug)]
pub struct SettingsService<S> {
    sync: SyncAdapter<S>,
}

impl<S> Clone for SettingsService<S> {
    fn clone(&self) -> Self {
        Self {
            sync: self.sync.clone(),
        }
    }
}

impl<S> SettingsService<S>
where
    S: DocumentStore + 'static,
{
    /// Creates a settings service over a sync adapter.
    #[must_use]
    pub const fn new(sync: SyncAdapter<S>) -> Self {
        Self { sync }
    }

    /// Returns the current settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsServiceError::Sync`] when loading fails.
    pub async fn settings(&self) -> SettingsServiceResult<Settings> {
        Ok(self.sync.load_settings().await?)
    }

    /// Adds a category with a generated identifier.
    ///
    /// # Errors
    ///
    /// Returns validation errors for the name or color, a duplicate-name
    /// error, or a sync failure.
    pub async fn add_category(
        &self,
        name: impl Into<String> + Send,
        color: impl Into<String> + Send,
    ) -> SettingsServiceResult<Category> {
        let category = self
            .modify(|settings| settings.add_category(name, color))
            .await?;
        info!(category_id = %category.id(), name = %category.name(), "category added");
        Ok(category)
    }

    /// Renames or recolors a category.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::CategoryNotFound`], validation errors,
    /// or a sync failure.
    pub async fn update_category(
        &self,
        id: &CategoryId,
        patch: CategoryPatch,
    ) -> SettingsServiceResult<Category> {
        let category = self
            .modify(|settings| settings.update_category(id, patch))
            .await?;
        debug!(category_id = %id, "category updated");
        Ok(category)
    }

    /// Deletes a category that no task references.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::CategoryInUse`] while any task
    /// references the category, [`SettingsDomainError::LastCategory`] for
    /// the only remaining category, [`SettingsDomainError::CategoryNotFound`]
    /// or a sync failure. Categories and tasks are unchanged on error.
    pub async fn delete_category(&self, id: &CategoryId) -> SettingsServiceResult<Category> {
        let tasks = self.sync.load_tasks().await?;
        let referencing = tasks
            .iter()
            .filter(|task| task.category_id() == id)
            .count();
        let removed = self
            .modify(|settings| settings.remove_category(id, referencing))
            .await?;
        info!(category_id = %id, "category deleted");
        Ok(removed)
    }

    /// Merges new scoring weights.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::InvalidWeight`] or a sync failure.
    pub async fn update_weights(&self, patch: &WeightsPatch) -> SettingsServiceResult<Settings> {
        let settings = self
            .modify(|settings| {
                settings.update_weights(patch)?;
                Ok(settings.clone())
            })
            .await?;
        debug!("priority weights updated");
        Ok(settings)
    }

    /// Replaces the hour window of one lane.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::InvalidRange`] or a sync failure.
    pub async fn update_swimlane_times(
        &self,
        lane: Lane,
        start: i32,
        end: i32,
    ) -> SettingsServiceResult<Settings> {
        let settings = self
            .modify(|settings| {
                settings.update_swimlane_times(lane, start, end)?;
                Ok(settings.clone())
            })
            .await?;
        debug!(lane = %lane, start, end, "lane window updated");
        Ok(settings)
    }

    /// Replaces the daily objectives.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::InvalidHoursObjective`] or a sync
    /// failure.
    pub async fn update_daily_objectives(
        &self,
        tasks: u32,
        hours: f64,
    ) -> SettingsServiceResult<Settings> {
        let settings = self
            .modify(|settings| {
                settings.update_daily_objectives(tasks, hours)?;
                Ok(settings.clone())
            })
            .await?;
        debug!(tasks, hours, "daily objectives updated");
        Ok(settings)
    }

    /// Stores the sound preference.
    ///
    /// # Errors
    ///
    /// Returns a sync failure.
    pub async fn set_sound_enabled(&self, enabled: bool) -> SettingsServiceResult<Settings> {
        self.modify(|settings| {
            settings.set_sound_enabled(enabled);
            Ok(settings.clone())
        })
        .await
    }

    async fn modify<T>(
        &self,
        change: impl FnOnce(&mut Settings) -> Result<T, SettingsDomainError> + Send,
    ) -> SettingsServiceResult<T> {
        let mut settings = self.sync.load_settings().await?;
        let outcome = change(&mut settings)?;
        self.sync
            .apply_mutation(Mutation::replace_settings(&settings)?)
            .await?;
        Ok(outcome)
    }
}
