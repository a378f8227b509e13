//! Portfolio image slots: pick or drop an image onto a slot, see it
//! immediately, and get it back after a reload.
//!
//! The core ([`manager`], [`events`], [`upload`], [`state`], [`preview`])
//! has no platform dependencies. The browser front end lives in `web`
//! (wasm32 only); the desktop front end is the `portfolio-images` binary.

pub mod config;
pub mod error;
pub mod events;
pub mod manager;
pub mod preview;
pub mod state;
pub mod upload;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::PortfolioConfig;
pub use error::{PortfolioError, Result};
pub use manager::{PortfolioManager, RestoreReport};
