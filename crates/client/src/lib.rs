//! Headless terminal driver for the dungeon crawl.
//!
//! The `crawl` binary prints ASCII views of a [`crawl_core::Game`] and reads
//! one command per line from stdin. Rendering and parsing live here so they
//! can be tested without a terminal.

pub mod config;
pub mod input;
pub mod render;

pub use config::CliConfig;
