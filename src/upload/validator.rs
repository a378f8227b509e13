use thiserror::Error;

use crate::config::PortfolioConfig;
use crate::state::data::FileCandidate;

/// Why a candidate file was turned away
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("`{mime}` is not an image type")]
    NotAnImage { mime: String },
    #[error("{size} bytes is not below the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
}

/// Accepts files whose MIME type starts with the configured prefix and
/// whose size is strictly below the configured ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileValidator {
    mime_prefix: String,
    max_bytes: u64,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::from_config(&PortfolioConfig::default())
    }
}

impl FileValidator {
    pub fn new(mime_prefix: impl Into<String>, max_bytes: u64) -> Self {
        Self {
            mime_prefix: mime_prefix.into(),
            max_bytes,
        }
    }

    pub fn from_config(config: &PortfolioConfig) -> Self {
        Self::new(config.accepted_mime_prefix.clone(), config.max_file_bytes)
    }

    pub fn validate(&self, candidate: &FileCandidate) -> Result<(), Rejection> {
        if !candidate.mime.starts_with(&self.mime_prefix) {
            return Err(Rejection::NotAnImage {
                mime: candidate.mime.clone(),
            });
        }
        if candidate.size >= self.max_bytes {
            return Err(Rejection::TooLarge {
                size: candidate.size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    pub fn is_valid(&self, candidate: &FileCandidate) -> bool {
        self.validate(candidate).is_ok()
    }
}

/// Check a file against the default rules (`image/*`, under 10 MiB)
pub fn is_valid_image(candidate: &FileCandidate) -> bool {
    FileValidator::default().is_valid(candidate)
}
