//! Repository layer for saved games.
//!
//! Repositories handle data that changes during play. Static content
//! (configuration, spawn tables) comes from `crawl-content` instead.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
