//! Category definitions owned by the settings aggregate.

use super::SettingsDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a category, referenced by tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryId(String);

impl CategoryId {
    /// Creates a validated category identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::EmptyCategoryId`] for blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, SettingsDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SettingsDomainError::EmptyCategoryId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Creates a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryId {
    type Error = SettingsDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name of a category, non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Creates a validated category name.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::EmptyCategoryName`] for blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, SettingsDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SettingsDomainError::EmptyCategoryName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when both names are equal ignoring case.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl TryFrom<String> for CategoryName {
    type Error = SettingsDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryName> for String {
    fn from(name: CategoryName) -> Self {
        name.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// RGB color in `#rrggbb` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryColor(String);

impl CategoryColor {
    /// Creates a validated color. Hex digits are stored lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::InvalidColor`] unless the value is `#`
    /// followed by exactly six hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, SettingsDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let is_valid = trimmed
            .strip_prefix('#')
            .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|ch| ch.is_ascii_hexdigit()));
        if !is_valid {
            return Err(SettingsDomainError::InvalidColor(raw));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the color as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryColor {
    type Error = SettingsDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryColor> for String {
    fn from(color: CategoryColor) -> Self {
        color.0
    }
}

impl fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A task category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: CategoryName,
    color: CategoryColor,
}

impl Category {
    /// Creates a category from validated parts.
    #[must_use]
    pub const fn new(id: CategoryId, name: CategoryName, color: CategoryColor) -> Self {
        Self { id, name, color }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Returns the color.
    #[must_use]
    pub const fn color(&self) -> &CategoryColor {
        &self.color
    }

    pub(super) fn rename(&mut self, name: CategoryName) {
        self.name = name;
    }

    pub(super) fn recolor(&mut self, color: CategoryColor) {
        self.color = color;
    }
}

/// Field-level update for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    name: Option<String>,
    color: Option<String>,
}

impl CategoryPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the category.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the category color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub(super) fn into_parts(
        self,
    ) -> Result<(Option<CategoryName>, Option<CategoryColor>), SettingsDomainError> {
        let name = self.name.map(CategoryName::new).transpose()?;
        let color = self.color.map(CategoryColor::new).transpose()?;
        Ok((name, color))
    }
}
