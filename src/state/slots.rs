//! Upload slots and the element ids that belong to each one.
//!
//! A slot is named by its upload input id (`photo1Upload`). The preview
//! image and the full-view link share the same base with a different
//! suffix (`photo1Preview`, `photo1Link`).

const UPLOAD_SUFFIX: &str = "Upload";
const PREVIEW_SUFFIX: &str = "Preview";
const LINK_SUFFIX: &str = "Link";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub base: String,
    pub upload_id: String,
    pub preview_id: String,
    pub link_id: String,
}

impl Slot {
    /// Build a slot from its base name (`photo1`)
    pub fn from_base(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            upload_id: format!("{}{}", base, UPLOAD_SUFFIX),
            preview_id: format!("{}{}", base, PREVIEW_SUFFIX),
            link_id: format!("{}{}", base, LINK_SUFFIX),
            base,
        }
    }

    /// Derive a slot from an upload input id. Ids without the `Upload`
    /// suffix (or with nothing before it) do not name a slot.
    pub fn from_upload_id(upload_id: &str) -> Option<Self> {
        let base = upload_id.strip_suffix(UPLOAD_SUFFIX)?;
        if base.is_empty() {
            return None;
        }
        Some(Self::from_base(base))
    }
}

/// The slots present on the page, built once at initialization.
#[derive(Debug, Clone, Default)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
}

impl SlotRegistry {
    /// Register every upload id that follows the naming pattern, in order.
    /// Duplicates and non-conforming ids are skipped.
    pub fn from_upload_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut registry = Self::default();
        for id in ids {
            match Slot::from_upload_id(id) {
                Some(slot) if registry.get(&slot.upload_id).is_none() => registry.slots.push(slot),
                Some(_) => {}
                None => tracing::debug!("Skipping file input `{}`: no `Upload` suffix", id),
            }
        }
        registry
    }

    pub fn from_bases<'a>(bases: impl IntoIterator<Item = &'a str>) -> Self {
        let mut registry = Self::default();
        for base in bases {
            let slot = Slot::from_base(base);
            if registry.get(&slot.upload_id).is_none() {
                registry.slots.push(slot);
            }
        }
        registry
    }

    /// Look up a slot by its upload id
    pub fn get(&self, upload_id: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.upload_id == upload_id)
    }

    /// The registered slot, or the one derived from the id for catalog
    /// entries whose input is no longer on the page.
    pub fn resolve(&self, upload_id: &str) -> Option<Slot> {
        self.get(upload_id)
            .cloned()
            .or_else(|| Slot::from_upload_id(upload_id))
    }

    pub fn position(&self, upload_id: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.upload_id == upload_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
