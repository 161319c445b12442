//! Domain model for store synchronisation.
//!
//! Stored state is a set of JSON documents grouped into per-user
//! collections. This module names the collections, describes write
//! operations and change events, and defines the export snapshot.

mod collection;
mod snapshot;

pub use collection::{
    ChangeEvent, CollectionKind, CollectionRef, Document, DocumentFields, WriteOp,
    RESET_MARKER_DOCUMENT_ID, SETTINGS_DOCUMENT_ID,
};
pub use snapshot::{ImportReport, Snapshot};
