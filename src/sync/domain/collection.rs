//! Collections, documents and write operations.

use crate::task::domain::UserId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier of the single settings document in the settings collection.
pub const SETTINGS_DOCUMENT_ID: &str = "preferences";

/// Identifier of the rollover marker document in the meta collection.
pub const RESET_MARKER_DOCUMENT_ID: &str = "dailyReset";

/// Field map of one stored document.
pub type DocumentFields = Map<String, Value>;

/// The collections each user owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// One document per task.
    Tasks,
    /// The settings document.
    Settings,
    /// Bookkeeping documents such as the rollover marker.
    Meta,
}

impl CollectionKind {
    /// Returns the canonical collection name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Settings => "settings",
            Self::Meta => "meta",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collection owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionRef {
    owner: UserId,
    kind: CollectionKind,
}

impl CollectionRef {
    /// Creates a collection reference.
    #[must_use]
    pub const fn new(owner: UserId, kind: CollectionKind) -> Self {
        Self { owner, kind }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns the collection kind.
    #[must_use]
    pub const fn kind(&self) -> CollectionKind {
        self.kind
    }
}

impl fmt::Display for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "users/{}/{}", self.owner, self.kind)
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Document identifier within its collection.
    pub id: String,
    /// Document fields.
    pub fields: DocumentFields,
}

/// One write of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Creates or replaces a document.
    Put {
        /// Target collection.
        collection: CollectionRef,
        /// Document identifier.
        id: String,
        /// Complete field map.
        fields: DocumentFields,
    },
    /// Merges fields into an existing document; `null` removes a field.
    Merge {
        /// Target collection.
        collection: CollectionRef,
        /// Document identifier.
        id: String,
        /// Fields to set or remove.
        fields: DocumentFields,
    },
    /// Removes a document. Removing a missing document succeeds.
    Delete {
        /// Target collection.
        collection: CollectionRef,
        /// Document identifier.
        id: String,
    },
}

impl WriteOp {
    /// Returns the collection the write targets.
    #[must_use]
    pub const fn collection(&self) -> &CollectionRef {
        match self {
            Self::Put { collection, .. }
            | Self::Merge { collection, .. }
            | Self::Delete { collection, .. } => collection,
        }
    }

    /// Returns the targeted document identifier.
    #[must_use]
    pub fn document_id(&self) -> &str {
        match self {
            Self::Put { id, .. } | Self::Merge { id, .. } | Self::Delete { id, .. } => id,
        }
    }
}

/// Notification that documents of a collection changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Collection that changed.
    pub collection: CollectionRef,
    /// Documents written or removed by the change.
    pub document_ids: Vec<String>,
}
