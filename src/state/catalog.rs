use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::data::ImageRecord;
use crate::error::{PortfolioError, Result};

/// A string key-value store shaped like the browser's `localStorage`.
///
/// The catalog is one blob under one key, so this is all the persistence
/// layer needs.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Process-local store, used by tests and as a fallback when no real
/// backend is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw view of everything written so far
    #[cfg(test)]
    pub fn items(&self) -> &HashMap<String, String> {
        &self.items
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// Slot id -> record map, serialized as a single JSON object.
///
/// Sorted keys keep the stored blob stable between saves.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct PersistedCatalog {
    entries: BTreeMap<String, ImageRecord>,
}

impl PersistedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the catalog stored under `key`.
    ///
    /// An absent key or an empty value is an empty catalog. Any other
    /// unparseable blob is an error: the caller must not treat it as empty
    /// and overwrite it.
    pub fn load(store: &impl KeyValueStore, key: &str) -> Result<Self> {
        match store.get_item(key)? {
            None => Ok(Self::default()),
            Some(raw) if raw.is_empty() => Ok(Self::default()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| PortfolioError::CorruptCatalog {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Write the whole catalog back under `key`
    pub fn store(&self, store: &mut impl KeyValueStore, key: &str) -> Result<()> {
        let json = serde_json::to_string(self)?;
        store.set_item(key, &json)
    }

    /// Set or overwrite the record for a slot
    pub fn insert(&mut self, slot_id: impl Into<String>, record: ImageRecord) -> Option<ImageRecord> {
        self.entries.insert(slot_id.into(), record)
    }

    pub fn get(&self, slot_id: &str) -> Option<&ImageRecord> {
        self.entries.get(slot_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ImageRecord)> {
        self.entries.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
