//! Item-related state types.
//!
//! Ground items and inventory items share one representation. An [`Item`]
//! lives either in `WorldState::items` or in exactly one inventory; pickup
//! moves the value, so both can never hold it at once.

use super::{ItemId, Position};

/// Variant payload of an item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    HealthPotion { amount: u32 },
    Weapon { name: String, attack_bonus: u32 },
    Key,
}

impl ItemKind {
    /// Display name used in log lines and inventory listings.
    pub fn name(&self) -> &str {
        match self {
            Self::HealthPotion { .. } => "Health Potion",
            Self::Weapon { name, .. } => name,
            Self::Key => "Key",
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Self::Key)
    }

    /// Attack bonus granted when equipped, if this is a weapon.
    pub fn attack_bonus(&self) -> Option<u32> {
        match self {
            Self::Weapon { attack_bonus, .. } => Some(*attack_bonus),
            _ => None,
        }
    }

    /// Glyph used by text renderers.
    pub fn glyph(&self) -> char {
        match self {
            Self::HealthPotion { .. } => '!',
            Self::Weapon { .. } => '/',
            Self::Key => 'k',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    /// Ground position; kept as the pickup location once the item is carried.
    pub position: Position,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(id: ItemId, position: Position, kind: ItemKind) -> Self {
        Self { id, position, kind }
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }
}
