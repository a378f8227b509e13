//! The portfolio image manager
//!
//! Holds the slot registry and the catalog store, and runs the
//! validate -> record -> render transitions. Reading and encoding happen
//! outside (they are async on both front ends); the manager is handed the
//! finished data URL.

use crate::config::PortfolioConfig;
use crate::error::Result;
use crate::preview::{render_preview, PreviewSurface};
use crate::state::catalog::{KeyValueStore, PersistedCatalog};
use crate::state::data::{FileCandidate, ImageRecord};
use crate::state::slots::SlotRegistry;
use crate::upload::validator::{FileValidator, Rejection};

/// Outcome of restoring the catalog onto a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Slot ids whose preview was shown
    pub restored: Vec<String>,
    /// Slot ids with a stored image but no matching elements
    pub skipped: Vec<String>,
}

pub struct PortfolioManager<S> {
    config: PortfolioConfig,
    validator: FileValidator,
    registry: SlotRegistry,
    store: S,
}

impl<S: KeyValueStore> PortfolioManager<S> {
    pub fn new(config: PortfolioConfig, registry: SlotRegistry, store: S) -> Self {
        Self {
            validator: FileValidator::from_config(&config),
            config,
            registry,
            store,
        }
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decide whether a picked or dropped file should be read at all
    pub fn check(&self, candidate: &FileCandidate) -> std::result::Result<(), Rejection> {
        let verdict = self.validator.validate(candidate);
        if let Err(rejection) = &verdict {
            tracing::debug!("🚫 Ignoring `{}`: {}", candidate.name, rejection);
        }
        verdict
    }

    /// Current catalog as stored
    pub fn catalog(&self) -> Result<PersistedCatalog> {
        PersistedCatalog::load(&self.store, &self.config.storage_key)
    }

    /// Persist a record for a slot, stamped with the current time
    pub fn save(&mut self, slot_id: &str, url: &str, filename: &str) -> Result<ImageRecord> {
        self.save_at(slot_id, url, filename, chrono::Utc::now().timestamp_millis())
    }

    /// Read-modify-write of the catalog. A corrupt stored catalog is
    /// returned as an error and left untouched.
    pub fn save_at(&mut self, slot_id: &str, url: &str, filename: &str, timestamp: i64) -> Result<ImageRecord> {
        let key = self.config.storage_key.clone();
        let mut catalog = PersistedCatalog::load(&self.store, &key)?;

        let record = ImageRecord::new(url, filename, timestamp);
        catalog.insert(slot_id, record.clone());
        catalog.store(&mut self.store, &key)?;

        tracing::info!("💾 Saved `{}` for slot `{}` ({} slots stored)", filename, slot_id, catalog.len());
        Ok(record)
    }

    /// Finish an upload: show the encoded image and persist it.
    ///
    /// The record is saved even when the slot's preview or link element is
    /// missing from the page; only the preview is skipped.
    pub fn complete_upload(
        &mut self,
        surface: &mut impl PreviewSurface,
        slot_id: &str,
        filename: &str,
        url: &str,
    ) -> Result<ImageRecord> {
        self.complete_upload_at(surface, slot_id, filename, url, chrono::Utc::now().timestamp_millis())
    }

    pub fn complete_upload_at(
        &mut self,
        surface: &mut impl PreviewSurface,
        slot_id: &str,
        filename: &str,
        url: &str,
        timestamp: i64,
    ) -> Result<ImageRecord> {
        match self.registry.resolve(slot_id) {
            Some(slot) => {
                if !render_preview(surface, &slot, url, &self.config.link_label) {
                    tracing::warn!("⚠️  No preview for `{}`, saving `{}` anyway", slot_id, filename);
                }
            }
            None => tracing::debug!("`{}` does not name a slot, storing without preview", slot_id),
        }
        self.save_at(slot_id, url, filename, timestamp)
    }

    /// Show every stored image whose slot elements exist on the surface
    pub fn restore_all(&self, surface: &mut impl PreviewSurface) -> Result<RestoreReport> {
        let catalog = self.catalog()?;
        let mut report = RestoreReport::default();

        for (slot_id, record) in catalog.iter() {
            if !record.has_image() {
                continue;
            }
            let shown = match self.registry.resolve(slot_id) {
                Some(slot) => render_preview(surface, &slot, &record.url, &self.config.link_label),
                None => false,
            };

            if shown {
                report.restored.push(slot_id.to_string());
            } else {
                report.skipped.push(slot_id.to_string());
            }
        }

        tracing::info!(
            "🖼️  Restored {} slot previews, skipped {}",
            report.restored.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}

impl<S> std::fmt::Debug for PortfolioManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioManager")
            .field("config", &self.config)
            .field("slots", &self.registry.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortfolioError;
    use crate::preview::PageModel;
    use crate::state::catalog::MemoryStore;
    use crate::state::slots::Slot;
    use crate::upload::encoder::encode_data_url;

    const KEY: &str = "portfolioImages";

    fn page_with(bases: &[&str]) -> PageModel {
        let mut page = PageModel::new();
        for base in bases {
            page.add_slot(&Slot::from_base(*base));
        }
        page
    }

    fn manager(bases: &[&str]) -> PortfolioManager<MemoryStore> {
        PortfolioManager::new(
            PortfolioConfig::default(),
            SlotRegistry::from_bases(bases.iter().copied()),
            MemoryStore::new(),
        )
    }

    #[test]
    fn test_selecting_a_jpeg_shows_and_stores_it() {
        let mut page = page_with(&["photo1"]);
        let mut manager = manager(&["photo1"]);

        let candidate = FileCandidate::new("headshot.jpg", "image/jpeg", 2 * 1024 * 1024);
        assert!(manager.check(&candidate).is_ok());

        let url = encode_data_url(&candidate.mime, &[0xFF, 0xD8, 0xFF, 0xE0]);
        manager
            .complete_upload_at(&mut page, "photo1Upload", &candidate.name, &url, 1_700_000_000_000)
            .unwrap();

        let image = page.image("photo1Preview").unwrap();
        assert!(!image.hidden);
        assert!(image.src.starts_with("data:image/jpeg;base64,"));
        assert_eq!(page.link("photo1Link").unwrap().text, "View Full Image");

        let raw = manager.store().get_item(KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["photo1Upload"]["url"], url.as_str());
        assert_eq!(json["photo1Upload"]["filename"], "headshot.jpg");
        assert_eq!(json["photo1Upload"]["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_oversized_png_is_rejected_before_any_write() {
        let manager = manager(&["photo1"]);
        let candidate = FileCandidate::new("poster.png", "image/png", 15 * 1024 * 1024);

        assert!(matches!(manager.check(&candidate), Err(Rejection::TooLarge { .. })));
        assert!(manager.store().items().is_empty());
    }

    #[test]
    fn test_save_then_restore_round_trip() {
        let mut manager = manager(&["photo1", "photo2"]);
        manager.save("photo1Upload", "data:image/png;base64,AAAA", "a.png").unwrap();
        manager.save("photo2Upload", "data:image/gif;base64,R0lG", "b.gif").unwrap();

        let mut page = page_with(&["photo1", "photo2"]);
        let report = manager.restore_all(&mut page).unwrap();

        assert_eq!(report.restored, vec!["photo1Upload".to_string(), "photo2Upload".to_string()]);
        assert_eq!(page.image("photo2Preview").unwrap().src, "data:image/gif;base64,R0lG");
        assert_eq!(page.link("photo1Link").unwrap().href, "data:image/png;base64,AAAA");
        assert_eq!(page.link("photo1Link").unwrap().text, "View Full Image");
    }

    #[test]
    fn test_last_write_wins_per_slot() {
        let mut manager = manager(&["photo1"]);
        manager.save_at("photo1Upload", "data:image/png;base64,MQ==", "one.png", 1).unwrap();
        manager.save_at("photo1Upload", "data:image/png;base64,Mg==", "two.png", 2).unwrap();

        let catalog = manager.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        let record = catalog.get("photo1Upload").unwrap();
        assert_eq!(record.filename, "two.png");
        assert_eq!(record.timestamp, 2);

        let mut page = page_with(&["photo1"]);
        manager.restore_all(&mut page).unwrap();
        assert_eq!(page.image("photo1Preview").unwrap().src, "data:image/png;base64,Mg==");
    }

    #[test]
    fn test_restore_skips_slots_missing_from_markup() {
        let mut manager = manager(&["photo1", "photo2"]);
        manager.save("photo1Upload", "data:image/png;base64,AAAA", "a.png").unwrap();
        manager.save("photo2Upload", "data:image/png;base64,BBBB", "b.png").unwrap();

        // photo2 has a link but no preview element in the current markup
        let mut page = page_with(&["photo1"]);
        page.add_link("photo2Link");

        let report = manager.restore_all(&mut page).unwrap();
        assert_eq!(report.restored, vec!["photo1Upload".to_string()]);
        assert_eq!(report.skipped, vec!["photo2Upload".to_string()]);
        assert_eq!(page.link("photo2Link").unwrap().text, "");
    }

    #[test]
    fn test_restore_ignores_empty_urls_and_unknown_ids() {
        let mut store = MemoryStore::new();
        store
            .set_item(
                KEY,
                r#"{"photo1Upload":{"url":"","filename":"gone.png","timestamp":1},"legacy":{"url":"data:image/png;base64,AA==","filename":"x","timestamp":2}}"#,
            )
            .unwrap();
        let manager = PortfolioManager::new(PortfolioConfig::default(), SlotRegistry::from_bases(["photo1"]), store);

        let mut page = page_with(&["photo1"]);
        let report = manager.restore_all(&mut page).unwrap();
        assert!(report.restored.is_empty());
        assert_eq!(report.skipped, vec!["legacy".to_string()]);
        assert!(page.image("photo1Preview").unwrap().hidden);
    }

    #[test]
    fn test_restore_derives_slots_not_in_registry() {
        let mut manager = manager(&["photo1"]);
        manager.save("photo7Upload", "data:image/png;base64,AAAA", "a.png").unwrap();

        let mut page = page_with(&["photo7"]);
        let report = manager.restore_all(&mut page).unwrap();
        assert_eq!(report.restored, vec!["photo7Upload".to_string()]);
    }

    #[test]
    fn test_corrupt_catalog_aborts_restore_and_is_not_overwritten() {
        let mut store = MemoryStore::new();
        store.set_item(KEY, "{\"photo1Upload\": ").unwrap();
        let mut manager = PortfolioManager::new(PortfolioConfig::default(), SlotRegistry::from_bases(["photo1"]), store);

        let mut page = page_with(&["photo1"]);
        assert!(matches!(manager.restore_all(&mut page), Err(PortfolioError::CorruptCatalog { .. })));

        let result = manager.save("photo1Upload", "data:image/png;base64,AAAA", "a.png");
        assert!(result.is_err());
        assert_eq!(manager.store().get_item(KEY).unwrap().as_deref(), Some("{\"photo1Upload\": "));
    }

    #[test]
    fn test_save_over_empty_stored_value() {
        let mut store = MemoryStore::new();
        store.set_item(KEY, "").unwrap();
        let mut manager = PortfolioManager::new(PortfolioConfig::default(), SlotRegistry::from_bases(["photo1"]), store);

        let mut page = page_with(&["photo1"]);
        assert!(manager.restore_all(&mut page).unwrap().restored.is_empty());

        manager.save("photo1Upload", "data:image/png;base64,AAAA", "a.png").unwrap();
        let catalog = manager.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("photo1Upload").unwrap().filename, "a.png");
    }

    #[test]
    fn test_upload_without_preview_elements_is_still_saved() {
        let mut manager = manager(&["photo1"]);
        let mut page = PageModel::new();

        manager
            .complete_upload_at(&mut page, "photo1Upload", "a.png", "data:image/png;base64,AAAA", 5)
            .unwrap();

        assert_eq!(manager.catalog().unwrap().get("photo1Upload").unwrap().timestamp, 5);
    }

    #[test]
    fn test_custom_storage_key_and_label() {
        let config = PortfolioConfig {
            storage_key: "altKey".into(),
            link_label: "Open".into(),
            ..PortfolioConfig::default()
        };
        let mut manager = PortfolioManager::new(config, SlotRegistry::from_bases(["photo1"]), MemoryStore::new());
        let mut page = page_with(&["photo1"]);

        manager
            .complete_upload(&mut page, "photo1Upload", "a.png", "data:image/png;base64,AAAA")
            .unwrap();

        assert!(manager.store().get_item("altKey").unwrap().is_some());
        assert!(manager.store().get_item(KEY).unwrap().is_none());
        assert_eq!(page.link("photo1Link").unwrap().text, "Open");
    }
}
