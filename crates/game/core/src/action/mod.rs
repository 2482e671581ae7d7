//! Gameplay rules that mutate [`WorldState`](crate::state::WorldState).
//!
//! - `movement`: single steps, bump attacks, door unlocking
//! - `combat`: attack resolution and death
//! - `inventory`: pick-up, item use, weapon equipping
//! - `error`: rule-level error types

pub mod combat;
pub mod error;
pub mod inventory;
pub mod movement;

pub use combat::{DamageEvent, attack};
pub use error::{CombatError, CommandError, InventoryError};
pub use inventory::{PickupResult, UseOutcome, equip_weapon, pick_up, use_item};
pub use movement::{ActionResult, attempt_move};
