//! Attack resolution.
//!
//! Damage equals the attacker's current attack power; there is no
//! mitigation. Health floors at zero and death fires exactly once.

use super::CombatError;
use crate::state::{EntityId, Faction, MessageTone, WorldState};

/// Outcome of a single attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEvent {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub amount: u32,
    /// True only on the hit that killed the defender.
    pub defender_died: bool,
    pub remaining_health: u32,
}

/// Applies one attack from `attacker` to `defender`.
///
/// Emits the attack log line, a floating damage number on the defender's
/// tile and, on death, the death line. The defender's corpse keeps its slot.
pub fn attack(
    world: &mut WorldState,
    attacker: EntityId,
    defender: EntityId,
) -> Result<DamageEvent, CombatError> {
    if attacker == defender {
        return Err(CombatError::SelfTarget(attacker));
    }

    let source = world
        .entity(attacker)
        .ok_or(CombatError::AttackerNotFound(attacker))?;
    if !source.is_alive() {
        return Err(CombatError::AttackerDead(attacker));
    }
    let attacker_name = source.name.clone();
    let amount = source.attack_power();
    let attacker_faction = source.faction();

    let target = world
        .entity_mut(defender)
        .ok_or(CombatError::DefenderNotFound(defender))?;
    if !target.is_alive() {
        return Err(CombatError::DefenderDead(defender));
    }
    let defender_name = target.name.clone();
    let defender_faction = target.faction();
    let position = target.position;
    let defender_died = target.take_damage(amount);
    let remaining_health = target.health();

    let tone = match attacker_faction {
        Faction::Controllable => MessageTone::Info,
        Faction::Hostile => MessageTone::Danger,
    };
    world.message(
        format!("{attacker_name} attacks {defender_name} for {amount} damage!"),
        tone,
    );
    world.float_text(amount.to_string(), position, MessageTone::Danger);

    if defender_died {
        let tone = match defender_faction {
            Faction::Hostile => MessageTone::Warning,
            Faction::Controllable => MessageTone::Danger,
        };
        world.message(format!("{defender_name} dies!"), tone);
        tracing::debug!(%attacker, %defender, "entity died");
    }

    Ok(DamageEvent {
        attacker,
        defender,
        amount,
        defender_died,
        remaining_health,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HostileTemplate, PlayerConfig};
    use crate::map::{Grid, MapDimensions};
    use crate::state::{Entity, Position};

    fn arena() -> (WorldState, EntityId) {
        let grid = Grid::new(MapDimensions::new(8, 8));
        let player = Entity::player(&PlayerConfig::default(), Position::ORIGIN);
        let mut world = WorldState::new(grid, player, 60);
        let id = world.allocate_entity_id();
        let orc = Entity::hostile(id, &HostileTemplate::orc(), Position::new(4, 5), 0, 0);
        world.hostiles.push(orc);
        (world, id)
    }

    fn set_attack(world: &mut WorldState, id: EntityId, attack: u32) {
        if let Some(entity) = world.entity_mut(id) {
            entity.set_attack_power(attack);
        }
    }

    #[test]
    fn damage_is_exactly_attack_power() {
        let (mut world, orc) = arena();
        let before = world.entity(orc).map(Entity::health).unwrap_or_default();
        let event = attack(&mut world, EntityId::PLAYER, orc).expect("attack");
        assert_eq!(event.amount, 10);
        assert_eq!(event.remaining_health, before - 10);
        assert!(!event.defender_died);
        assert_eq!(
            world.log().latest().map(|m| m.text.as_str()),
            Some("Player attacks Orc for 10 damage!")
        );
        assert_eq!(world.floating_texts()[0].text, "10");
    }

    #[test]
    fn hundred_health_hit_for_forty_then_seventy() {
        let (mut world, orc) = arena();
        set_attack(&mut world, orc, 40);
        let first = attack(&mut world, orc, EntityId::PLAYER).expect("first hit");
        assert_eq!(first.remaining_health, 60);
        assert!(!first.defender_died);

        set_attack(&mut world, orc, 70);
        let second = attack(&mut world, orc, EntityId::PLAYER).expect("second hit");
        assert!(second.defender_died);
        assert!(!world.player().is_alive());
        assert_eq!(world.log().latest().map(|m| m.text.as_str()), Some("Player dies!"));
    }

    #[test]
    fn dead_defenders_are_rejected_without_changes() {
        let (mut world, orc) = arena();
        set_attack(&mut world, EntityId::PLAYER, 100);
        let event = attack(&mut world, EntityId::PLAYER, orc).expect("lethal");
        assert!(event.defender_died);
        let snapshot = world.clone();

        assert_eq!(
            attack(&mut world, EntityId::PLAYER, orc),
            Err(CombatError::DefenderDead(orc))
        );
        assert_eq!(world, snapshot);
        assert_eq!(
            world.entity(orc).map(|e| e.name.as_str()),
            Some("remains of Orc")
        );
    }

    #[test]
    fn missing_and_self_targets_are_errors() {
        let (mut world, _) = arena();
        assert_eq!(
            attack(&mut world, EntityId::PLAYER, EntityId(42)),
            Err(CombatError::DefenderNotFound(EntityId(42)))
        );
        assert_eq!(
            attack(&mut world, EntityId::PLAYER, EntityId::PLAYER),
            Err(CombatError::SelfTarget(EntityId::PLAYER))
        );
    }
}
