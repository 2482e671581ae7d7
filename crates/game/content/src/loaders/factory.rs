//! Builds a complete [`GameConfig`] from a data directory.

use std::path::{Path, PathBuf};

use crawl_core::GameConfig;

use crate::loaders::{BestiaryLoader, ConfigLoader, LoadResult};

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml    (optional, GameConfig overrides)
/// └── bestiary.ron   (optional, hostile and item tables)
/// ```
///
/// Missing files fall back to the embedded defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads `config.toml` and then layers `bestiary.ron` on top of it.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let config_path = self.data_dir.join("config.toml");
        let mut config = if config_path.exists() {
            ConfigLoader::load(&config_path)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using embedded defaults");
            ConfigLoader::embedded()?
        };

        let bestiary_path = self.data_dir.join("bestiary.ron");
        if bestiary_path.exists() {
            BestiaryLoader::load(&bestiary_path)?.apply_to(&mut config.population);
        }
        Ok(config)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
