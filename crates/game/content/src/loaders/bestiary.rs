//! Hostile templates and ground-item spawn tables.

use std::path::Path;

use crawl_core::{HostileTemplate, ItemTableEntry, PopulationConfig};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_BESTIARY: &str = include_str!("../../data/bestiary.ron");

/// Spawn tables as stored in RON files.
///
/// ```ron
/// (
///     hostiles: [(kind: Goblin, max_health: 20, attack: 5, sight_radius: 8, attack_range: 1.5, weight: 70)],
///     items: [(weight: 15, item: Some(Key)), (weight: 5, item: None)],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bestiary {
    pub hostiles: Vec<HostileTemplate>,
    #[serde(default)]
    pub items: Vec<ItemTableEntry>,
}

impl Bestiary {
    /// Replaces the spawn tables of `population`. An empty item table keeps
    /// the existing one.
    pub fn apply_to(self, population: &mut PopulationConfig) {
        population.bestiary = self.hostiles;
        if !self.items.is_empty() {
            population.item_table = self.items;
        }
    }
}

/// Loader for [`Bestiary`] RON files.
pub struct BestiaryLoader;

impl BestiaryLoader {
    pub fn load(path: &Path) -> LoadResult<Bestiary> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Bestiary> {
        let bestiary: Bestiary = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary RON: {}", e))?;
        anyhow::ensure!(
            bestiary.hostiles.iter().any(|template| template.weight > 0),
            "bestiary needs at least one hostile with a non-zero weight"
        );
        anyhow::ensure!(
            bestiary
                .hostiles
                .iter()
                .all(|template| template.max_health > 0 && template.attack_range >= 1.0),
            "hostiles need positive health and an attack range of at least 1"
        );
        Ok(bestiary)
    }

    /// The tables shipped with the crate.
    pub fn embedded() -> LoadResult<Bestiary> {
        Self::parse(EMBEDDED_BESTIARY)
    }
}
