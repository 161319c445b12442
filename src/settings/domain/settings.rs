//! Settings aggregate root and its value types.

use super::{Category, CategoryColor, CategoryId, CategoryName, CategoryPatch, SettingsDomainError};
use crate::task::domain::Lane;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightFactor {
    /// Weight applied to task urgency.
    Urgency,
    /// Weight applied to task importance.
    Importance,
    /// Weight applied to task impact.
    Impact,
    /// Weight applied to the deadline factor.
    Deadline,
}

impl WeightFactor {
    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgency => "urgency",
            Self::Importance => "importance",
            Self::Impact => "impact",
            Self::Deadline => "deadline",
        }
    }
}

impl fmt::Display for WeightFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring weights.
///
/// Fields missing from a stored document decode as zero. Every value must be
/// a finite, non-negative number; decoding a settings document rejects any
/// other value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Weight applied to urgency.
    #[serde(default)]
    pub urgency: f64,
    /// Weight applied to importance.
    #[serde(default)]
    pub importance: f64,
    /// Weight applied to impact.
    #[serde(default)]
    pub impact: f64,
    /// Weight applied to the deadline factor.
    #[serde(default)]
    pub deadline: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            urgency: 1.0,
            importance: 1.0,
            impact: 1.0,
            deadline: 1.0,
        }
    }
}

impl PriorityWeights {
    /// Returns the weights with every invalid value replaced by zero.
    #[must_use]
    pub fn effective(self) -> Self {
        Self {
            urgency: sanitize_weight(self.urgency),
            importance: sanitize_weight(self.importance),
            impact: sanitize_weight(self.impact),
            deadline: sanitize_weight(self.deadline),
        }
    }

    /// Checks that every weight is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::InvalidWeight`] for the first offending
    /// factor.
    pub fn validate(&self) -> Result<(), SettingsDomainError> {
        [
            (WeightFactor::Urgency, self.urgency),
            (WeightFactor::Importance, self.importance),
            (WeightFactor::Impact, self.impact),
            (WeightFactor::Deadline, self.deadline),
        ]
        .into_iter()
        .find(|&(_, value)| !is_valid_weight(value))
        .map_or(Ok(()), |(factor, value)| {
            Err(SettingsDomainError::InvalidWeight { factor, value })
        })
    }

    const fn get_mut(&mut self, factor: WeightFactor) -> &mut f64 {
        match factor {
            WeightFactor::Urgency => &mut self.urgency,
            WeightFactor::Importance => &mut self.importance,
            WeightFactor::Impact => &mut self.impact,
            WeightFactor::Deadline => &mut self.deadline,
        }
    }
}

fn is_valid_weight(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn sanitize_weight(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Partial update of the scoring weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightsPatch {
    updates: Vec<(WeightFactor, f64)>,
}

impl WeightsPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one weight. Later calls for the same factor win.
    #[must_use]
    pub fn with(mut self, factor: WeightFactor, value: f64) -> Self {
        self.updates.push((factor, value));
        self
    }
}

/// Hour-of-day window of one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneWindow {
    start: u8,
    end: u8,
}

impl LaneWindow {
    /// Creates a validated window for `lane`; `end` 24 means midnight.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::InvalidRange`] unless
    /// `0 <= start < end <= 24`.
    pub fn new(lane: Lane, start: i32, end: i32) -> Result<Self, SettingsDomainError> {
        let invalid = SettingsDomainError::InvalidRange { lane, start, end };
        let start_hour = u8::try_from(start).map_err(|_| invalid.clone())?;
        let end_hour = u8::try_from(end).map_err(|_| invalid.clone())?;
        if start_hour >= 24 || end_hour > 24 || start_hour >= end_hour {
            return Err(invalid);
        }
        Ok(Self {
            start: start_hour,
            end: end_hour,
        })
    }

    /// Returns the start hour.
    #[must_use]
    pub const fn start(self) -> u8 {
        self.start
    }

    /// Returns the end hour; 24 means midnight.
    #[must_use]
    pub const fn end(self) -> u8 {
        self.end
    }

    /// Returns `true` when `hour` falls inside the window.
    #[must_use]
    pub fn contains_hour(self, hour: u32) -> bool {
        (u32::from(self.start)..u32::from(self.end)).contains(&hour)
    }

    const fn unchecked(start: u8, end: u8) -> Self {
        Self { start, end }
    }
}

/// Hour windows for the three lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwimlaneTimes {
    #[serde(rename = "Morning")]
    morning: LaneWindow,
    #[serde(rename = "Midday")]
    midday: LaneWindow,
    #[serde(rename = "Evening")]
    evening: LaneWindow,
}

impl Default for SwimlaneTimes {
    fn default() -> Self {
        Self {
            morning: LaneWindow::unchecked(6, 12),
            midday: LaneWindow::unchecked(12, 18),
            evening: LaneWindow::unchecked(18, 24),
        }
    }
}

impl SwimlaneTimes {
    /// Returns the window of `lane`.
    #[must_use]
    pub const fn window(&self, lane: Lane) -> LaneWindow {
        match lane {
            Lane::Morning => self.morning,
            Lane::Midday => self.midday,
            Lane::Evening => self.evening,
        }
    }

    /// Replaces the window of `lane`.
    pub const fn set_window(&mut self, lane: Lane, window: LaneWindow) {
        match lane {
            Lane::Morning => self.morning = window,
            Lane::Midday => self.midday = window,
            Lane::Evening => self.evening = window,
        }
    }

    /// Returns the first lane whose window contains `hour`.
    #[must_use]
    pub fn lane_for_hour(&self, hour: u32) -> Option<Lane> {
        Lane::ALL
            .into_iter()
            .find(|lane| self.window(*lane).contains_hour(hour))
    }

    fn validate(&self) -> Result<(), SettingsDomainError> {
        for lane in Lane::ALL {
            let window = self.window(lane);
            LaneWindow::new(lane, i32::from(window.start), i32::from(window.end))?;
        }
        Ok(())
    }
}

/// Daily completion targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyObjectives {
    tasks: u32,
    hours: f64,
}

impl Default for DailyObjectives {
    fn default() -> Self {
        Self {
            tasks: 5,
            hours: 8.0,
        }
    }
}

impl DailyObjectives {
    /// Creates validated objectives.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::InvalidHoursObjective`] for negative or
    /// non-finite hours.
    pub fn new(tasks: u32, hours: f64) -> Result<Self, SettingsDomainError> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(SettingsDomainError::InvalidHoursObjective(hours));
        }
        Ok(Self { tasks, hours })
    }

    /// Returns the task-count objective.
    #[must_use]
    pub const fn tasks(self) -> u32 {
        self.tasks
    }

    /// Returns the hours objective.
    #[must_use]
    pub const fn hours(self) -> f64 {
        self.hours
    }
}

/// Per-user settings aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SettingsRecord", into = "SettingsRecord")]
pub struct Settings {
    priority_weights: PriorityWeights,
    swimlane_times: SwimlaneTimes,
    categories: Vec<Category>,
    daily_objectives: DailyObjectives,
    sound_enabled: bool,
}

/// Document form of [`Settings`]. Missing groups take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    /// Scoring weights.
    #[serde(default)]
    pub priority_weights: PriorityWeights,
    /// Lane windows.
    #[serde(default)]
    pub swimlane_times: SwimlaneTimes,
    /// Category definitions.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    /// Daily objectives.
    #[serde(default)]
    pub daily_objectives: DailyObjectives,
    /// Sound preference for the presentation layer.
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
}

const fn default_sound_enabled() -> bool {
    true
}

fn default_categories() -> Vec<Category> {
    [
        ("work", "Work", "#3b82f6"),
        ("personal", "Personal", "#10b981"),
        ("study", "Study", "#f97316"),
        ("health", "Health & Fitness", "#ef4444"),
    ]
    .into_iter()
    .filter_map(|(id, name, color)| {
        Some(Category::new(
            CategoryId::new(id).ok()?,
            CategoryName::new(name).ok()?,
            CategoryColor::new(color).ok()?,
        ))
    })
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            priority_weights: PriorityWeights::default(),
            swimlane_times: SwimlaneTimes::default(),
            categories: default_categories(),
            daily_objectives: DailyObjectives::default(),
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Returns the scoring weights as stored.
    #[must_use]
    pub const fn priority_weights(&self) -> PriorityWeights {
        self.priority_weights
    }

    /// Returns the lane windows.
    #[must_use]
    pub const fn swimlane_times(&self) -> SwimlaneTimes {
        self.swimlane_times
    }

    /// Returns the categories in display order. Never empty.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Returns the daily objectives.
    #[must_use]
    pub const fn daily_objectives(&self) -> DailyObjectives {
        self.daily_objectives
    }

    /// Returns the sound preference.
    #[must_use]
    pub const fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Finds a category by identifier.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id() == id)
    }

    /// Returns `true` when the category exists.
    #[must_use]
    pub fn has_category(&self, id: &CategoryId) -> bool {
        self.category(id).is_some()
    }

    /// Adds a category under a new identifier.
    ///
    /// # Errors
    ///
    /// Returns name, color or duplicate-name validation errors.
    pub fn add_category(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<Category, SettingsDomainError> {
        let category_name = CategoryName::new(name)?;
        let category_color = CategoryColor::new(color)?;
        self.ensure_unique_name(&category_name, None)?;

        let category = Category::new(CategoryId::generate(), category_name, category_color);
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Renames or recolors a category.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::CategoryNotFound`] for unknown ids and
    /// validation errors for the new values. Settings are unchanged on
    /// error.
    pub fn update_category(
        &mut self,
        id: &CategoryId,
        patch: CategoryPatch,
    ) -> Result<Category, SettingsDomainError> {
        if !self.has_category(id) {
            return Err(SettingsDomainError::CategoryNotFound(id.clone()));
        }
        let (name, color) = patch.into_parts()?;
        if let Some(new_name) = &name {
            self.ensure_unique_name(new_name, Some(id))?;
        }

        let category = self
            .categories
            .iter_mut()
            .find(|category| category.id() == id)
            .ok_or_else(|| SettingsDomainError::CategoryNotFound(id.clone()))?;
        if let Some(new_name) = name {
            category.rename(new_name);
        }
        if let Some(new_color) = color {
            category.recolor(new_color);
        }
        Ok(category.clone())
    }

    /// Removes a category that no task references.
    ///
    /// `referencing_tasks` is the number of tasks currently pointing at the
    /// category.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::CategoryNotFound`],
    /// [`SettingsDomainError::CategoryInUse`] or
    /// [`SettingsDomainError::LastCategory`]. Settings are unchanged on
    /// error.
    pub fn remove_category(
        &mut self,
        id: &CategoryId,
        referencing_tasks: usize,
    ) -> Result<Category, SettingsDomainError> {
        let position = self
            .categories
            .iter()
            .position(|category| category.id() == id)
            .ok_or_else(|| SettingsDomainError::CategoryNotFound(id.clone()))?;
        if referencing_tasks > 0 {
            return Err(SettingsDomainError::CategoryInUse {
                category_id: id.clone(),
                task_count: referencing_tasks,
            });
        }
        if self.categories.len() == 1 {
            return Err(SettingsDomainError::LastCategory(id.clone()));
        }
        Ok(self.categories.remove(position))
    }

    /// Merges new weight values into the current weights.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::InvalidWeight`] for the first negative
    /// or non-finite value. Settings are unchanged on error.
    pub fn update_weights(&mut self, patch: &WeightsPatch) -> Result<(), SettingsDomainError> {
        if let Some(&(factor, value)) = patch
            .updates
            .iter()
            .find(|&&(_, value)| !is_valid_weight(value))
        {
            return Err(SettingsDomainError::InvalidWeight { factor, value });
        }
        for &(factor, value) in &patch.updates {
            *self.priority_weights.get_mut(factor) = value;
        }
        Ok(())
    }

    /// Replaces the window of one lane.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::InvalidRange`] for malformed windows.
    pub fn update_swimlane_times(
        &mut self,
        lane: Lane,
        start: i32,
        end: i32,
    ) -> Result<(), SettingsDomainError> {
        let window = LaneWindow::new(lane, start, end)?;
        self.swimlane_times.set_window(lane, window);
        Ok(())
    }

    /// Replaces the daily objectives.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::InvalidHoursObjective`] for invalid
    /// hours.
    pub fn update_daily_objectives(
        &mut self,
        tasks: u32,
        hours: f64,
    ) -> Result<(), SettingsDomainError> {
        self.daily_objectives = DailyObjectives::new(tasks, hours)?;
        Ok(())
    }

    /// Sets the sound preference.
    pub const fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    fn ensure_unique_name(
        &self,
        name: &CategoryName,
        except: Option<&CategoryId>,
    ) -> Result<(), SettingsDomainError> {
        let clash = self
            .categories
            .iter()
            .filter(|category| Some(category.id()) != except)
            .any(|category| category.name().same_as(name));
        if clash {
            return Err(SettingsDomainError::DuplicateCategoryName(
                name.as_str().to_owned(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<SettingsRecord> for Settings {
    type Error = SettingsDomainError;

    fn try_from(record: SettingsRecord) -> Result<Self, Self::Error> {
        if record.categories.is_empty() {
            return Err(SettingsDomainError::NoCategories);
        }
        record.priority_weights.validate()?;
        record.swimlane_times.validate()?;
        DailyObjectives::new(record.daily_objectives.tasks, record.daily_objectives.hours)?;

        let mut settings = Self {
            priority_weights: record.priority_weights,
            swimlane_times: record.swimlane_times,
            categories: Vec::with_capacity(record.categories.len()),
            daily_objectives: record.daily_objectives,
            sound_enabled: record.sound_enabled,
        };
        for category in record.categories {
            if settings.has_category(category.id()) {
                return Err(SettingsDomainError::DuplicateCategoryId(
                    category.id().clone(),
                ));
            }
            settings.ensure_unique_name(category.name(), None)?;
            settings.categories.push(category);
        }
        Ok(settings)
    }
}

impl From<Settings> for SettingsRecord {
    fn from(settings: Settings) -> Self {
        Self {
            priority_weights: settings.priority_weights,
            swimlane_times: settings.swimlane_times,
            categories: settings.categories,
            daily_objectives: settings.daily_objectives,
            sound_enabled: settings.sound_enabled,
        }
    }
}
