use thiserror::Error;

/// Errors produced while reading, encoding or persisting slot images.
///
/// Invalid files are not errors: they are reported as a
/// [`Rejection`](crate::upload::validator::Rejection) and dropped.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// The stored catalog blob exists but is not a valid JSON object of records
    #[error("stored catalog under key `{key}` is corrupt: {source}")]
    CorruptCatalog {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The key-value backend refused a read or write (quota, unavailable storage, ...)
    #[error("storage backend error: {0}")]
    Storage(String),

    /// SQLite failure in the desktop library
    #[error("database error: {0}")]
    Database(String),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a base64 data URL")]
    MalformedDataUrl,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

#[cfg(not(target_arch = "wasm32"))]
impl From<rusqlite::Error> for PortfolioError {
    fn from(e: rusqlite::Error) -> Self {
        PortfolioError::Database(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
