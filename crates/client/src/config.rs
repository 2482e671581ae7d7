//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use anyhow::Result;
use crawl_content::{ConfigLoader, ContentFactory};
use crawl_core::GameConfig;

/// Configuration required to start a session.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// A `config.toml` file or a data directory with `config.toml`/`bestiary.ron`.
    pub content_path: Option<PathBuf>,
    pub save_dir: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CRAWL_CONFIG` - config file or data directory (default: embedded content)
    /// - `CRAWL_SAVE_PATH` - directory for save files (default: platform-specific)
    /// - `CRAWL_SEED` - seed for new games (default: derived from the clock)
    pub fn from_env() -> Self {
        Self {
            content_path: env::var("CRAWL_CONFIG").ok().map(PathBuf::from),
            save_dir: env::var("CRAWL_SAVE_PATH").ok().map(PathBuf::from),
            seed: read_env::<u64>("CRAWL_SEED"),
        }
    }

    /// Loads the game configuration from `content_path`, or the embedded defaults.
    pub fn game_config(&self) -> Result<GameConfig> {
        match &self.content_path {
            Some(path) if path.is_dir() => ContentFactory::new(path).load_config(),
            Some(path) => ConfigLoader::load(path),
            None => ConfigLoader::embedded(),
        }
    }

    /// Seed from the command line, then the environment, then the clock.
    pub fn resolve_seed(&self, flag: Option<u64>) -> u64 {
        flag.or(self.seed).unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_environment_seed() {
        let config = CliConfig {
            seed: Some(7),
            ..CliConfig::default()
        };
        assert_eq!(config.resolve_seed(Some(3)), 3);
        assert_eq!(config.resolve_seed(None), 7);
    }

    #[test]
    fn content_path_may_be_a_file_or_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        std::fs::write(&file, "num_floors = 4\n").unwrap();

        let from_file = CliConfig {
            content_path: Some(file),
            ..CliConfig::default()
        };
        assert_eq!(from_file.game_config().unwrap().num_floors, 4);

        let from_dir = CliConfig {
            content_path: Some(dir.path().to_path_buf()),
            ..CliConfig::default()
        };
        assert_eq!(from_dir.game_config().unwrap(), GameConfig::default());
    }
}
