//! Single-step movement, bump attacks and door unlocking.

use super::CommandError;
use super::combat::{DamageEvent, attack};
use crate::map::TileKind;
use crate::state::{EntityId, MessageTone, Position, WorldState};

/// Result of a movement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    /// The entity relocated to the target cell.
    Moved,
    /// A key was spent and the door opened; the entity stays put.
    OpenedDoor,
    AttackedTarget(DamageEvent),
    BlockedByWall,
    BlockedByLockedDoor,
    /// Target occupied by a non-opposing entity, or the mover cannot act.
    NoOp,
}

impl ActionResult {
    /// Whether the attempt counts as the mover's turn.
    pub fn consumes_turn(&self) -> bool {
        matches!(
            self,
            Self::Moved | Self::OpenedDoor | Self::AttackedTarget(_)
        )
    }

    /// Maps a non-consuming result to the command error reported to callers.
    pub fn into_command_result(self) -> Result<Self, CommandError> {
        match self {
            Self::BlockedByWall => Err(CommandError::InvalidMove),
            Self::BlockedByLockedDoor => Err(CommandError::LockedDoor),
            Self::NoOp => Err(CommandError::NoOp),
            consumed => Ok(consumed),
        }
    }
}

/// Attempts to move entity `id` by `(dx, dy)`.
///
/// Closed doors open for a controllable entity holding a key. A living,
/// blocking entity of the opposing faction on the target is attacked.
pub fn attempt_move(world: &mut WorldState, id: EntityId, dx: i32, dy: i32) -> ActionResult {
    let Some(mover) = world.entity(id) else {
        return ActionResult::NoOp;
    };
    if !mover.is_alive() || (dx == 0 && dy == 0) {
        return ActionResult::NoOp;
    }
    let target = mover.position.offset(dx, dy);
    let faction = mover.faction();

    match world.grid.kind(target) {
        None => return ActionResult::BlockedByWall,
        Some(TileKind::DoorClosed) => return unlock_door(world, id, target),
        Some(_) if !world.grid.is_walkable(target) => return ActionResult::BlockedByWall,
        Some(_) => {}
    }

    if let Some(occupant) = world.blocking_entity_at(target) {
        if occupant.faction() == faction {
            return ActionResult::NoOp;
        }
        let defender = occupant.id;
        return match attack(world, id, defender) {
            Ok(event) => ActionResult::AttackedTarget(event),
            Err(err) => {
                tracing::debug!(%id, %defender, error = %err, "bump attack rejected");
                ActionResult::NoOp
            }
        };
    }

    if let Some(mover) = world.entity_mut(id) {
        mover.position = target;
    }
    ActionResult::Moved
}

fn unlock_door(world: &mut WorldState, id: EntityId, door: Position) -> ActionResult {
    let Some(controllable) = world
        .entity_mut(id)
        .and_then(|entity| entity.as_controllable_mut())
    else {
        return ActionResult::BlockedByLockedDoor;
    };

    if controllable.keys == 0 {
        world.message("The door is locked. Find a key!", MessageTone::Warning);
        return ActionResult::BlockedByLockedDoor;
    }

    controllable.keys -= 1;
    world.grid.set_kind(door, TileKind::DoorOpen);
    world.message("You unlocked the door.", MessageTone::Loot);
    ActionResult::OpenedDoor
}
