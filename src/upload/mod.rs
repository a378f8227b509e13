//! File intake module
//!
//! This module handles:
//! - Accepting or rejecting candidate files (validator.rs)
//! - Encoding file bytes as data URLs (encoder.rs)
//! - Reading files from disk on the desktop (reader.rs)

pub mod encoder;
#[cfg(not(target_arch = "wasm32"))]
pub mod reader;
pub mod validator;
