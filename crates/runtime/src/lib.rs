//! Session orchestration and persistence for the dungeon crawl.
//!
//! This crate wraps a [`crawl_core::Game`] in a [`Session`] that handles the
//! out-of-turn commands (new game, save, load, return to menu) and stores
//! snapshots through a [`SaveRepository`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the session and its commands
//! - [`repository`] provides file and in-memory save backends
//! - [`error`] unifies failures surfaced to clients
pub mod error;
pub mod repository;
pub mod runtime;

pub use error::{Result, RuntimeError};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use runtime::{DEFAULT_SLOT, Session, SessionCommand, SessionConfig};
