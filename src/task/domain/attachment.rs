//! Links and files attached to a task.

use super::{AttachmentId, TaskDomainError};
use serde::{Deserialize, Serialize};

/// Where an attachment's payload lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttachmentSource {
    /// External link.
    Link {
        /// Target URL.
        url: String,
    },
    /// Embedded or stored file.
    File {
        /// MIME type of the payload.
        #[serde(rename = "mimeType")]
        mime_type: String,
        /// Opaque payload reference: embedded data or a storage pointer.
        content: String,
    },
}

/// An attachment exclusively owned by its parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    id: AttachmentId,
    name: String,
    #[serde(flatten)]
    source: AttachmentSource,
}

impl Attachment {
    /// Creates a link attachment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyAttachmentName`] or
    /// [`TaskDomainError::EmptyAttachmentUrl`] for blank values.
    pub fn link(name: impl Into<String>, url: impl Into<String>) -> Result<Self, TaskDomainError> {
        let attachment = Self {
            id: AttachmentId::new(),
            name: name.into().trim().to_owned(),
            source: AttachmentSource::Link {
                url: url.into().trim().to_owned(),
            },
        };
        attachment.validate()?;
        Ok(attachment)
    }

    /// Creates a file attachment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyAttachmentName`] or
    /// [`TaskDomainError::EmptyAttachmentMimeType`] for blank values.
    pub fn file(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        let attachment = Self {
            id: AttachmentId::new(),
            name: name.into().trim().to_owned(),
            source: AttachmentSource::File {
                mime_type: mime_type.into().trim().to_owned(),
                content: content.into(),
            },
        };
        attachment.validate()?;
        Ok(attachment)
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the payload source.
    #[must_use]
    pub const fn source(&self) -> &AttachmentSource {
        &self.source
    }

    /// Checks the attachment invariants. Decoded attachments bypass the
    /// constructors, so the task record conversion calls this too.
    pub(crate) fn validate(&self) -> Result<(), TaskDomainError> {
        if self.name.trim().is_empty() {
            return Err(TaskDomainError::EmptyAttachmentName);
        }
        match &self.source {
            AttachmentSource::Link { url } if url.trim().is_empty() => {
                Err(TaskDomainError::EmptyAttachmentUrl)
            }
            AttachmentSource::File { mime_type, .. } if mime_type.trim().is_empty() => {
                Err(TaskDomainError::EmptyAttachmentMimeType)
            }
            AttachmentSource::Link { .. } | AttachmentSource::File { .. } => Ok(()),
        }
    }
}
