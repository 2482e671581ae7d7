//! Deterministic rules and data types of the dungeon crawl.
//!
//! `crawl-core` generates levels, resolves movement, combat and inventory
//! rules, drives hostile AI and schedules turns. It performs no I/O; the
//! runtime persists [`GameSnapshot`]s and clients render the read-only views
//! exposed by [`Game`] and [`WorldState`]. All state mutation flows through
//! [`Game`].
pub mod action;
pub mod ai;
pub mod config;
pub mod dungeon;
pub mod engine;
pub mod error;
pub mod map;
pub mod pathfinding;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use action::{
    ActionResult, CombatError, CommandError, DamageEvent, InventoryError, PickupResult,
    UseOutcome,
};
pub use config::{
    GameConfig, GenerationConfig, HostileTemplate, ItemTableEntry, PlayerConfig,
    PopulationConfig,
};
pub use dungeon::DungeonGenerator;
pub use engine::{Command, CommandOutcome, Game, LevelState, TurnPhase};
pub use error::{ErrorSeverity, GameError};
pub use map::{Grid, MapDimensions, Room, Tile, TileKind};
pub use pathfinding::find_path;
pub use rng::GameRng;
pub use snapshot::{GameSnapshot, SnapshotError};
pub use state::{
    AiState, Controllable, Entity, EntityId, Faction, FloatingText, Hostile, HostileKind,
    Inventory, Item, ItemId, ItemKind, Message, MessageLog, MessageTone, Position, Role,
    WorldState,
};
