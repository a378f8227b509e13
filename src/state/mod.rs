//! State management module
//!
//! This module handles all persistent widget state:
//! - Records and file candidates (data.rs)
//! - The persisted catalog and the key-value store seam (catalog.rs)
//! - Slot ids and the registry built at startup (slots.rs)
//! - The desktop SQLite key-value store (library.rs)

pub mod catalog;
pub mod data;
#[cfg(not(target_arch = "wasm32"))]
pub mod library;
pub mod slots;
