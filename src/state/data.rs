//! Shared data structures for the portfolio state
//!
//! These structs represent the data model that flows between
//! the persistence layer and the preview layer.

use serde::{Deserialize, Serialize};

/// One stored image for a slot, exactly as it lives in the catalog blob
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Data URL (`data:<mime>;base64,<payload>`)
    #[serde(default)]
    pub url: String,
    /// Original filename as picked or dropped (e.g., "DSC_0001.jpg")
    #[serde(default)]
    pub filename: String,
    /// Save time in milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp: i64,
}

impl ImageRecord {
    pub fn new(url: impl Into<String>, filename: impl Into<String>, timestamp: i64) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            timestamp,
        }
    }

    /// Records with an empty URL are never restored
    pub fn has_image(&self) -> bool {
        !self.url.is_empty()
    }
}

/// A file handed to the widget by a picker or a drop, before reading.
///
/// Mirrors what a browser `File` exposes without touching its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    /// MIME type as reported by the platform (may be empty)
    pub mime: String,
    pub size: u64,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }
}
