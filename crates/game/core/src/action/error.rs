//! Rule-level errors.
//!
//! Every variant here is rejected without a turn cost. The scheduler turns
//! them into advisory log lines rather than propagating them further.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, ItemId};

/// Reasons a controllable-turn command was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("the destination is off the map or not walkable")]
    InvalidMove,

    #[error("the door is locked")]
    LockedDoor,

    #[error("the inventory is full")]
    InventoryFull,

    #[error("there is nothing here to pick up")]
    NothingToPickUp,

    #[error("no item in slot {index} (inventory holds {len})")]
    ItemIndexOutOfRange { index: usize, len: usize },

    #[error("already at full health")]
    AlreadyAtFullHealth,

    #[error("no game is being played")]
    NotPlaying,

    #[error("it is not the controllable entity's turn")]
    NotYourTurn,

    #[error("nothing happened")]
    NoOp,

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            InvalidMove | LockedDoor | InventoryFull | NothingToPickUp => {
                ErrorSeverity::Recoverable
            }
            AlreadyAtFullHealth | NoOp => ErrorSeverity::Recoverable,
            ItemIndexOutOfRange { .. } | NotPlaying | NotYourTurn => ErrorSeverity::Validation,
            Inventory(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            InvalidMove => "COMMAND_INVALID_MOVE",
            LockedDoor => "COMMAND_LOCKED_DOOR",
            InventoryFull => "COMMAND_INVENTORY_FULL",
            NothingToPickUp => "COMMAND_NOTHING_TO_PICK_UP",
            ItemIndexOutOfRange { .. } => "COMMAND_ITEM_INDEX_OUT_OF_RANGE",
            AlreadyAtFullHealth => "COMMAND_ALREADY_AT_FULL_HEALTH",
            NotPlaying => "COMMAND_NOT_PLAYING",
            NotYourTurn => "COMMAND_NOT_YOUR_TURN",
            NoOp => "COMMAND_NO_OP",
            Inventory(err) => err.error_code(),
        }
    }
}

/// Attack preconditions that failed. No state is touched when returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("attacker {0} not found")]
    AttackerNotFound(EntityId),

    #[error("defender {0} not found")]
    DefenderNotFound(EntityId),

    #[error("attacker {0} is dead")]
    AttackerDead(EntityId),

    #[error("defender {0} is already dead")]
    DefenderDead(EntityId),

    #[error("{0} cannot attack itself")]
    SelfTarget(EntityId),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AttackerNotFound(_) => "COMBAT_ATTACKER_NOT_FOUND",
            Self::DefenderNotFound(_) => "COMBAT_DEFENDER_NOT_FOUND",
            Self::AttackerDead(_) => "COMBAT_ATTACKER_DEAD",
            Self::DefenderDead(_) => "COMBAT_DEFENDER_DEAD",
            Self::SelfTarget(_) => "COMBAT_SELF_TARGET",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("{0} carries no inventory")]
    NoInventory(EntityId),

    #[error("{0} is not in the inventory")]
    NotInInventory(ItemId),

    #[error("{0} is not a weapon")]
    NotAWeapon(ItemId),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoInventory(_) => "INVENTORY_NONE",
            Self::NotInInventory(_) => "INVENTORY_ITEM_MISSING",
            Self::NotAWeapon(_) => "INVENTORY_NOT_A_WEAPON",
        }
    }
}
