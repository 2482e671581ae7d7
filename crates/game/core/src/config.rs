use crate::map::MapDimensions;
use crate::state::{HostileKind, ItemKind};

/// Game configuration constants and tunable parameters.
///
/// Defaults reproduce the classic ruleset: an 80×60 map, three floors, a
/// 100 HP player and goblin/orc hostiles. Every section can be overridden
/// from TOML through `crawl-content`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub generation: GenerationConfig,
    pub player: PlayerConfig,
    pub population: PopulationConfig,
    /// Number of floors; descending past the last one wins the game.
    pub num_floors: u32,
    /// Half extents of the window marked explored around the player after each turn.
    pub reveal_half_width: u32,
    pub reveal_half_height: u32,
    /// Lifetime of floating text effects, in presentation frames.
    pub floating_text_frames: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 5;
    pub const MESSAGE_LOG_CAPACITY: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_NUM_FLOORS: u32 = 3;
    pub const DEFAULT_ATTACK_RANGE: f32 = 1.5;
    pub const DEFAULT_FLOATING_TEXT_FRAMES: u32 = 60;

    pub fn new() -> Self {
        Self {
            generation: GenerationConfig::default(),
            player: PlayerConfig::default(),
            population: PopulationConfig::default(),
            num_floors: Self::DEFAULT_NUM_FLOORS,
            reveal_half_width: 16,
            reveal_half_height: 10,
            floating_text_frames: Self::DEFAULT_FLOATING_TEXT_FRAMES,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.generation.dimensions = MapDimensions::new(width, height);
        self
    }

    pub fn with_num_floors(mut self, num_floors: u32) -> Self {
        self.num_floors = num_floors;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters of the partition/carving pass.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationConfig {
    pub dimensions: MapDimensions,
    /// Smallest extent a partition region may have along either axis.
    pub min_leaf_size: u32,
    pub room_min_size: u32,
    /// Margin kept between a room and the edge of its leaf region.
    pub room_padding: u32,
    /// Probability of turning a qualifying corridor-side wall into a door.
    pub door_chance: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            dimensions: MapDimensions::new(80, 60),
            min_leaf_size: 10,
            room_min_size: 5,
            room_padding: 2,
            door_chance: 0.2,
        }
    }
}

/// Starting stats of the controllable character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    pub name: String,
    pub max_health: u32,
    pub attack: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Player".to_owned(),
            max_health: 100,
            attack: 10,
        }
    }
}

/// Per-floor spawn counts, floor scaling and weighted spawn tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopulationConfig {
    /// Hostiles per floor: `floor * hostiles_per_floor + U[0, hostile_bonus_max]`.
    pub hostiles_per_floor: u32,
    pub hostile_bonus_max: u32,
    /// Extra max health granted to hostiles per floor number.
    pub health_per_floor: u32,
    /// Hostile attack grows by `floor / attack_floor_divisor`.
    pub attack_floor_divisor: u32,
    /// Items per floor: `floor * items_per_floor + U[item_bonus_min, item_bonus_max]`.
    pub items_per_floor: u32,
    pub item_bonus_min: u32,
    pub item_bonus_max: u32,
    pub bestiary: Vec<HostileTemplate>,
    pub item_table: Vec<ItemTableEntry>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            hostiles_per_floor: 3,
            hostile_bonus_max: 2,
            health_per_floor: 2,
            attack_floor_divisor: 2,
            items_per_floor: 1,
            item_bonus_min: 1,
            item_bonus_max: 3,
            bestiary: vec![HostileTemplate::goblin(), HostileTemplate::orc()],
            item_table: vec![
                ItemTableEntry::new(55, Some(ItemKind::HealthPotion { amount: 40 })),
                ItemTableEntry::new(
                    25,
                    Some(ItemKind::Weapon {
                        name: "Sword".to_owned(),
                        attack_bonus: 10,
                    }),
                ),
                ItemTableEntry::new(15, Some(ItemKind::Key)),
                ItemTableEntry::new(5, None),
            ],
        }
    }
}

/// Base stats of a hostile kind before floor scaling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostileTemplate {
    pub kind: HostileKind,
    pub max_health: u32,
    pub attack: u32,
    pub sight_radius: u32,
    pub attack_range: f32,
    /// Relative spawn weight within the bestiary.
    pub weight: u32,
}

impl HostileTemplate {
    pub fn goblin() -> Self {
        Self {
            kind: HostileKind::Goblin,
            max_health: 20,
            attack: 5,
            sight_radius: 8,
            attack_range: GameConfig::DEFAULT_ATTACK_RANGE,
            weight: 70,
        }
    }

    pub fn orc() -> Self {
        Self {
            kind: HostileKind::Orc,
            max_health: 40,
            attack: 7,
            sight_radius: 7,
            attack_range: GameConfig::DEFAULT_ATTACK_RANGE,
            weight: 30,
        }
    }
}

/// One row of the ground-item spawn table; `None` spawns nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTableEntry {
    pub weight: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item: Option<ItemKind>,
}

impl ItemTableEntry {
    pub fn new(weight: u32, item: Option<ItemKind>) -> Self {
        Self { weight, item }
    }
}
