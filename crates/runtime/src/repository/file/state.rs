//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crawl_core::GameSnapshot;
use sha2::{Digest, Sha256};

use crate::repository::{RepositoryError, Result, SaveRepository};

const MAGIC: [u8; 4] = *b"CRWL";
const VERSION: u16 = 1;
const DIGEST_LEN: usize = 32;
const HEADER_LEN: usize = MAGIC.len() + 2 + DIGEST_LEN;
const EXTENSION: &str = "sav";

/// File-based implementation of SaveRepository.
///
/// Each slot is stored as `{slot}.sav` in the base directory.
///
/// # File Format
///
/// ```text
/// [4 bytes magic "CRWL"][u16 LE version][32 bytes SHA-256 of payload][bincode GameSnapshot]
/// ```
///
/// Writes go to a temp file first and are renamed into place, so an
/// interrupted save leaves the previous file intact.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Repository in the platform data directory.
    ///
    /// - Linux: `~/.local/share/crawl/saves`
    /// - macOS: `~/Library/Application Support/crawl/saves`
    /// - Windows: `%APPDATA%\crawl\saves`
    /// - Fallback: `./save_data/saves`
    pub fn default_location() -> Result<Self> {
        let dir = directories::ProjectDirs::from("", "", "crawl")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"));
        Self::new(dir.join("saves"))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a slot file.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}.{EXTENSION}"))
    }
}

fn encode(snapshot: &GameSnapshot) -> Result<Vec<u8>> {
    let payload =
        bincode::serialize(snapshot).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    let digest = Sha256::digest(&payload);

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&digest);
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

fn decode(bytes: &[u8]) -> Result<GameSnapshot> {
    if bytes.len() < HEADER_LEN {
        return Err(RepositoryError::CorruptedData(format!(
            "file too short ({} bytes)",
            bytes.len()
        )));
    }
    let (magic, rest) = bytes.split_at(MAGIC.len());
    if magic != MAGIC {
        return Err(RepositoryError::CorruptedData("bad magic tag".into()));
    }
    let (version, rest) = rest.split_at(2);
    let version = u16::from_le_bytes([version[0], version[1]]);
    if version != VERSION {
        return Err(RepositoryError::UnsupportedVersion {
            found: version,
            expected: VERSION,
        });
    }
    let (digest, payload) = rest.split_at(DIGEST_LEN);
    if Sha256::digest(payload).as_slice() != digest {
        return Err(RepositoryError::CorruptedData("checksum mismatch".into()));
    }
    bincode::deserialize(payload).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, snapshot: &GameSnapshot) -> Result<()> {
        let path = self.slot_path(slot);
        let temp_path = path.with_extension(format!("{EXTENSION}.tmp"));

        let bytes = encode(snapshot)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved slot '{}' to {}", slot, path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<GameSnapshot> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Err(RepositoryError::NotFound(slot.to_owned()));
        }

        let bytes = fs::read(&path)?;
        let snapshot = decode(&bytes)?;

        tracing::debug!("Loaded slot '{}' from {}", slot, path.display());
        Ok(snapshot)
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted slot '{}'", slot);
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some(EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                slots.push(stem.to_owned());
            }
        }
        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawl_core::{Game, GameConfig};
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileSaveRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileSaveRepository::new(temp_dir.path()).unwrap();
        (temp_dir, repo)
    }

    fn snapshot() -> GameSnapshot {
        Game::new_game(GameConfig::default(), 3).snapshot()
    }

    #[test]
    fn test_save_and_load() {
        let (_temp, repo) = setup();
        let original = snapshot();
        repo.save("slot", &original).unwrap();

        assert!(repo.exists("slot"));
        assert_eq!(repo.load("slot").unwrap(), original);
        assert!(!repo.slot_path("slot").with_extension("sav.tmp").exists());
    }

    #[test]
    fn test_missing_slot() {
        let (_temp, repo) = setup();
        assert!(matches!(repo.load("nope"), Err(RepositoryError::NotFound(slot)) if slot == "nope"));
        repo.delete("nope").unwrap();
    }

    #[test]
    fn test_list_and_delete() {
        let (_temp, repo) = setup();
        let snapshot = snapshot();
        repo.save("b", &snapshot).unwrap();
        repo.save("a", &snapshot).unwrap();
        assert_eq!(repo.list_slots().unwrap(), vec!["a".to_string(), "b".to_string()]);

        repo.delete("a").unwrap();
        assert_eq!(repo.list_slots().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_flipped_payload_byte_is_detected() {
        let (_temp, repo) = setup();
        repo.save("slot", &snapshot()).unwrap();
        let path = repo.slot_path("slot");
        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        assert!(matches!(repo.load("slot"), Err(RepositoryError::CorruptedData(_))));
    }

    #[test]
    fn test_header_checks() {
        assert!(matches!(decode(b"CRWL"), Err(RepositoryError::CorruptedData(_))));

        let mut bytes = encode(&snapshot()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(decode(&bytes), Err(RepositoryError::CorruptedData(_))));

        let mut bytes = encode(&snapshot()).unwrap();
        bytes[4..6].copy_from_slice(&9u16.to_le_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(RepositoryError::UnsupportedVersion { found: 9, expected: 1 })
        ));
    }
}
