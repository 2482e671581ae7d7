//! Repository contract for saving and loading games.

use crawl_core::GameSnapshot;

use super::Result;

/// Persistence for [`GameSnapshot`]s, keyed by slot name.
///
/// Implementations must never hand back a partially written snapshot: a
/// save either replaces the slot completely or leaves the previous one.
pub trait SaveRepository: Send + Sync {
    /// Store `snapshot` in `slot`, replacing any previous save.
    fn save(&self, slot: &str, snapshot: &GameSnapshot) -> Result<()>;

    /// Load the snapshot in `slot`. Missing slots are `RepositoryError::NotFound`.
    fn load(&self, slot: &str) -> Result<GameSnapshot>;

    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all occupied slots, sorted.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
