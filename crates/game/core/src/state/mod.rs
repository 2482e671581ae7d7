//! Authoritative game state representation.
//!
//! This module owns the data structures that describe entities, ground
//! items, the message log and the level grid. Runtime layers clone or query
//! this state; gameplay mutates it through the rules in `action`, `ai` and
//! `engine`.
pub mod types;

pub use types::{
    AiState, Controllable, Entity, EntityId, Faction, FloatingText, Hostile, HostileKind,
    Inventory, Item, ItemId, ItemKind, Message, MessageLog, MessageTone, Position, Role,
    WorldState,
};
