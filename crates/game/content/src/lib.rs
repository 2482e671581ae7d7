//! Data-driven content for the dungeon crawl.
//!
//! This crate loads tunable rules from data files:
//! - Game configuration (TOML)
//! - Bestiary and ground-item spawn tables (RON)
//!
//! Both formats deserialize straight into `crawl-core` types. Defaults ship
//! embedded under `data/` so a data directory is optional.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{Bestiary, BestiaryLoader, ConfigLoader, ContentFactory, LoadResult};
