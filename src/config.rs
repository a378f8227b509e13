//! Runtime configuration for the portfolio widget.
//!
//! Every field has a default matching the page contract (`portfolioImages`,
//! 10 MiB, `image/`), so a partial or missing config file is fine.

use serde::{Deserialize, Serialize};

/// Storage key the catalog blob lives under
pub const DEFAULT_STORAGE_KEY: &str = "portfolioImages";

/// Upper bound (exclusive) on accepted file size: 10 MiB
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

pub const DEFAULT_MIME_PREFIX: &str = "image/";

/// Fixed text of the "view full image" link
pub const DEFAULT_LINK_LABEL: &str = "View Full Image";

/// CSS class toggled on a drop zone while a drag hovers it
pub const DEFAULT_DRAG_ACTIVE_CLASS: &str = "drag-over";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PortfolioConfig {
    pub storage_key: String,
    pub max_file_bytes: u64,
    pub accepted_mime_prefix: String,
    pub link_label: String,
    pub drag_active_class: String,
    /// Slot base names shown by the desktop page (`photo1` -> `photo1Upload`, ...)
    pub slots: Vec<String>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            accepted_mime_prefix: DEFAULT_MIME_PREFIX.to_string(),
            link_label: DEFAULT_LINK_LABEL.to_string(),
            drag_active_class: DEFAULT_DRAG_ACTIVE_CLASS.to_string(),
            slots: (1..=6).map(|i| format!("photo{}", i)).collect(),
        }
    }
}

impl PortfolioConfig {
    /// Parse from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load `<config_dir>/portfolio-images/config.json` if present.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// logged and also yields the defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(mut path) = dirs::config_dir().or_else(dirs::home_dir) else {
            return Self::default();
        };
        path.push("portfolio-images");
        path.push("config.json");

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    tracing::info!("⚙️  Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("⚠️  Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("⚠️  Could not read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_contract() {
        let config = PortfolioConfig::default();
        assert_eq!(config.storage_key, "portfolioImages");
        assert_eq!(config.max_file_bytes, 10_485_760);
        assert_eq!(config.accepted_mime_prefix, "image/");
        assert_eq!(config.link_label, "View Full Image");
        assert_eq!(config.slots.len(), 6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PortfolioConfig::from_json(r#"{"max_file_bytes": 1024, "slots": ["hero"]}"#).unwrap();
        assert_eq!(config.max_file_bytes, 1024);
        assert_eq!(config.slots, vec!["hero".to_string()]);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }
}
