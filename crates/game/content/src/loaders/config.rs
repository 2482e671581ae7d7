//! Game configuration loader.

use std::path::Path;

use crawl_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`GameConfig`] from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a [`GameConfig`] from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::check(&config)?;
        Ok(config)
    }

    /// The configuration shipped with the crate.
    pub fn embedded() -> LoadResult<GameConfig> {
        Self::parse(EMBEDDED_CONFIG)
    }

    fn check(config: &GameConfig) -> LoadResult<()> {
        let generation = &config.generation;
        anyhow::ensure!(config.num_floors > 0, "num_floors must be at least 1");
        anyhow::ensure!(
            generation.dimensions.width > 0 && generation.dimensions.height > 0,
            "map dimensions must be non-zero"
        );
        anyhow::ensure!(generation.min_leaf_size > 0, "min_leaf_size must be at least 1");
        anyhow::ensure!(
            (0.0..=1.0).contains(&generation.door_chance),
            "door_chance {} outside [0, 1]",
            generation.door_chance
        );
        anyhow::ensure!(
            config.population.item_bonus_min <= config.population.item_bonus_max,
            "item_bonus_min exceeds item_bonus_max"
        );
        Ok(())
    }
}
