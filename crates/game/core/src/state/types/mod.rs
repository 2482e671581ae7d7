pub mod common;
pub mod entities;
pub mod inventory;
pub mod item;
pub mod log;
pub mod world;

pub use common::{EntityId, ItemId, Position};
pub use entities::{AiState, Controllable, Entity, Faction, Hostile, HostileKind, Role};
pub use inventory::Inventory;
pub use item::{Item, ItemKind};
pub use log::{FloatingText, Message, MessageLog, MessageTone};
pub use world::WorldState;
