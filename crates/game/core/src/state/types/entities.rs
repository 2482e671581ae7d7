//! Entities: the controllable character and autonomous hostiles.
//!
//! Both share one [`Entity`] record; faction-specific data lives in the
//! [`Role`] payload. Dead entities stay in their container as corpses.

use std::collections::VecDeque;

use super::{EntityId, Inventory, ItemId, Position};
use crate::config::{HostileTemplate, PlayerConfig};

/// Kinds of hostile creatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostileKind {
    Goblin,
    Orc,
}

impl HostileKind {
    pub fn glyph(self) -> char {
        match self {
            Self::Goblin => 'g',
            Self::Orc => 'O',
        }
    }
}

/// Last decision taken by a hostile. Re-evaluated every turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AiState {
    #[default]
    Idle,
    Chasing,
    Attacking,
}

/// Side an entity fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Faction {
    Controllable,
    Hostile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Controllable {
    /// Attack power without any weapon.
    pub base_attack: u32,
    pub inventory: Inventory,
    pub keys: u32,
    /// Equipped weapon; always an inventory member.
    pub equipped: Option<ItemId>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hostile {
    pub kind: HostileKind,
    pub sight_radius: u32,
    pub attack_range: f32,
    pub ai_state: AiState,
    /// Remaining steps of the cached pursuit path.
    pub path: Option<VecDeque<Position>>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Controllable(Controllable),
    Hostile(Hostile),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub name: String,
    max_health: u32,
    health: u32,
    attack_power: u32,
    blocks_movement: bool,
    alive: bool,
    pub role: Role,
}

impl Entity {
    pub fn player(config: &PlayerConfig, position: Position) -> Self {
        Self {
            id: EntityId::PLAYER,
            position,
            name: config.name.clone(),
            max_health: config.max_health,
            health: config.max_health,
            attack_power: config.attack,
            blocks_movement: true,
            alive: true,
            role: Role::Controllable(Controllable {
                base_attack: config.attack,
                inventory: Inventory::new(),
                keys: 0,
                equipped: None,
            }),
        }
    }

    /// Creates a hostile from a template, scaled for the given floor.
    pub fn hostile(
        id: EntityId,
        template: &HostileTemplate,
        position: Position,
        health_bonus: u32,
        attack_bonus: u32,
    ) -> Self {
        let max_health = template.max_health + health_bonus;
        Self {
            id,
            position,
            name: template.kind.to_string(),
            max_health,
            health: max_health,
            attack_power: template.attack + attack_bonus,
            blocks_movement: true,
            alive: true,
            role: Role::Hostile(Hostile {
                kind: template.kind,
                sight_radius: template.sight_radius,
                attack_range: template.attack_range,
                ai_state: AiState::Idle,
                path: None,
            }),
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn attack_power(&self) -> u32 {
        self.attack_power
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn blocks_movement(&self) -> bool {
        self.blocks_movement
    }

    pub fn faction(&self) -> Faction {
        match self.role {
            Role::Controllable(_) => Faction::Controllable,
            Role::Hostile(_) => Faction::Hostile,
        }
    }

    pub fn is_hostile_to(&self, other: &Entity) -> bool {
        self.faction() != other.faction()
    }

    pub fn as_controllable(&self) -> Option<&Controllable> {
        match &self.role {
            Role::Controllable(controllable) => Some(controllable),
            Role::Hostile(_) => None,
        }
    }

    pub fn as_controllable_mut(&mut self) -> Option<&mut Controllable> {
        match &mut self.role {
            Role::Controllable(controllable) => Some(controllable),
            Role::Hostile(_) => None,
        }
    }

    pub fn as_hostile(&self) -> Option<&Hostile> {
        match &self.role {
            Role::Hostile(hostile) => Some(hostile),
            Role::Controllable(_) => None,
        }
    }

    pub fn as_hostile_mut(&mut self) -> Option<&mut Hostile> {
        match &mut self.role {
            Role::Hostile(hostile) => Some(hostile),
            Role::Controllable(_) => None,
        }
    }

    /// Restores up to `amount` health without exceeding the maximum.
    /// Returns the amount actually restored; 0 means nothing was consumed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let restored = amount.min(self.max_health - self.health);
        self.health += restored;
        restored
    }

    /// Subtracts `amount` health, flooring at zero. Returns true only on the
    /// hit that kills the entity.
    pub(crate) fn take_damage(&mut self, amount: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.die();
            return true;
        }
        false
    }

    /// Marks the entity dead and turns it into a non-blocking corpse.
    fn die(&mut self) {
        self.alive = false;
        self.blocks_movement = false;
        self.name = format!("remains of {}", self.name);
        if let Some(hostile) = self.as_hostile_mut() {
            hostile.path = None;
            hostile.ai_state = AiState::Idle;
        }
    }

    /// Overrides attack power; the next weapon change recomputes it again.
    #[cfg(test)]
    pub(crate) fn set_attack_power(&mut self, attack_power: u32) {
        self.attack_power = attack_power;
    }

    /// Recomputes attack power from the base value plus a weapon bonus.
    pub(crate) fn set_weapon_bonus(&mut self, bonus: u32) {
        if let Some(base) = self.as_controllable().map(|c| c.base_attack) {
            self.attack_power = base + bonus;
        }
    }

    /// Structural check used when restoring snapshots.
    pub(crate) fn is_consistent(&self) -> bool {
        self.health <= self.max_health
            && self.alive == (self.health > 0)
            && (self.alive || !self.blocks_movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Entity {
        Entity::player(&PlayerConfig::default(), Position::new(1, 1))
    }

    #[test]
    fn heal_is_capped_and_idempotent_at_max() {
        let mut entity = player();
        entity.take_damage(30);
        assert_eq!(entity.heal(40), 30);
        assert_eq!(entity.health(), 100);
        assert_eq!(entity.heal(40), 0);
        assert_eq!(entity.health(), 100);
    }

    #[test]
    fn lethal_damage_fires_once_and_leaves_a_corpse() {
        let mut entity = player();
        assert!(!entity.take_damage(40));
        assert_eq!(entity.health(), 60);
        assert!(entity.take_damage(70));
        assert_eq!(entity.health(), 0);
        assert!(!entity.is_alive());
        assert!(!entity.blocks_movement());
        assert_eq!(entity.name, "remains of Player");
        assert!(!entity.take_damage(5));
        assert_eq!(entity.name, "remains of Player");
        assert!(entity.is_consistent());
    }

    #[test]
    fn hostile_scaling_applies_bonuses() {
        let orc = Entity::hostile(
            EntityId(3),
            &HostileTemplate::orc(),
            Position::new(4, 4),
            6,
            1,
        );
        assert_eq!(orc.max_health(), 46);
        assert_eq!(orc.health(), 46);
        assert_eq!(orc.attack_power(), 8);
        assert_eq!(orc.name, "Orc");
        assert!(orc.is_hostile_to(&player()));
        assert_eq!(orc.as_hostile().map(|h| h.sight_radius), Some(7));
    }

    #[test]
    fn weapon_bonus_recomputes_from_base() {
        let mut entity = player();
        entity.set_weapon_bonus(10);
        entity.set_weapon_bonus(10);
        assert_eq!(entity.attack_power(), 20);
        entity.set_weapon_bonus(4);
        assert_eq!(entity.attack_power(), 14);
    }
}
