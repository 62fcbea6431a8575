use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::UploadError;
use super::preview::PreviewHandle;
use crate::consts::PROGRESS_COMPLETE;

/// A file offered to an upload session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCandidate {
    pub name: String,
    /// Declared MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// Per-file state. Moves forward only: Pending → Uploading → Success | Error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Success,
    Error,
}

impl UploadStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Uploading)
                | (Self::Pending, Self::Error)
                | (Self::Uploading, Self::Success)
                | (Self::Uploading, Self::Error)
        )
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Uploading => write!(f, "uploading"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One entry of an upload session. Owns its preview URL.
#[derive(Debug)]
pub struct UploadFile {
    id: String,
    source: FileCandidate,
    preview: PreviewHandle,
    caption: String,
    status: UploadStatus,
    progress: f64,
    error: Option<UploadError>,
}

impl UploadFile {
    pub(crate) fn new(
        id: String,
        source: FileCandidate,
        preview: PreviewHandle,
        validation: Result<(), UploadError>,
    ) -> Self {
        let (status, error) = match validation {
            Ok(()) => (UploadStatus::Pending, None),
            Err(err) => (UploadStatus::Error, Some(err)),
        };
        Self {
            id,
            source,
            preview,
            caption: String::new(),
            status,
            progress: 0.0,
            error,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &FileCandidate {
        &self.source
    }

    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// Percentage in [0, 100].
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    pub(crate) fn set_caption(&mut self, caption: String) {
        self.caption = caption;
    }

    /// Move to `next` if allowed. Returns whether the status changed.
    pub(crate) fn transition(&mut self, next: UploadStatus) -> bool {
        if !self.status.can_transition_to(next) {
            return false;
        }
        self.status = next;
        true
    }

    /// Record in-flight progress. Ignored unless the file is uploading.
    pub(crate) fn set_progress(&mut self, percent: f64) -> bool {
        if self.status != UploadStatus::Uploading {
            return false;
        }
        self.progress = percent.clamp(0.0, PROGRESS_COMPLETE);
        true
    }

    pub(crate) fn succeed(&mut self) -> bool {
        if !self.transition(UploadStatus::Success) {
            return false;
        }
        self.progress = PROGRESS_COMPLETE;
        self.error = None;
        true
    }

    pub(crate) fn fail(&mut self, error: UploadError) -> bool {
        if !self.transition(UploadStatus::Error) {
            return false;
        }
        self.progress = 0.0;
        self.error = Some(error);
        true
    }
}
