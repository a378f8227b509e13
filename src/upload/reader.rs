//! Desktop file reading
//!
//! Picks and drops hand us a path. Metadata is read up front so the
//! validator can run before any bytes are loaded; the full read happens on
//! the async runtime.

use std::path::{Path, PathBuf};

use super::encoder::{encode_data_url, mime_for_path};
use crate::error::Result;
use crate::state::data::FileCandidate;

/// Describe a file on disk the way a browser `File` would
pub fn inspect(path: &Path) -> Result<FileCandidate> {
    let metadata = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(FileCandidate::new(name, mime_for_path(path), metadata.len()))
}

/// Read a whole file and encode it as a data URL
pub async fn read_as_data_url(path: PathBuf, mime: String) -> Result<String> {
    let bytes = tokio::fs::read(&path).await?;
    tracing::debug!("📖 Read {} bytes from {}", bytes.len(), path.display());
    Ok(encode_data_url(&mime, &bytes))
}
