//! Pick-up, item use and weapon equipping for the controllable entity.

use super::{CommandError, InventoryError};
use crate::state::{Entity, ItemId, ItemKind, MessageTone, WorldState};

/// Result of a pick-up attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickupResult {
    Picked(ItemKind),
    InventoryFull,
    Nothing,
}

/// Effect of a successfully used inventory item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UseOutcome {
    Healed(u32),
    Equipped { item: ItemId, attack_bonus: u32 },
}

/// Equips a carried weapon. Attack power becomes base plus the weapon's
/// bonus, so equipping the same weapon twice changes nothing.
pub fn equip_weapon(entity: &mut Entity, item: ItemId) -> Result<u32, InventoryError> {
    let id = entity.id;
    let controllable = entity
        .as_controllable_mut()
        .ok_or(InventoryError::NoInventory(id))?;
    let bonus = controllable
        .inventory
        .find(item)
        .ok_or(InventoryError::NotInInventory(item))?
        .kind
        .attack_bonus()
        .ok_or(InventoryError::NotAWeapon(item))?;

    controllable.equipped = Some(item);
    entity.set_weapon_bonus(bonus);
    Ok(bonus)
}

/// Equips `item` on the controllable entity and logs the change.
fn equip_and_announce(world: &mut WorldState, item: ItemId) -> Result<u32, InventoryError> {
    let bonus = equip_weapon(&mut world.player, item)?;
    let name = world
        .player
        .as_controllable()
        .and_then(|c| c.inventory.find(item))
        .map(|carried| carried.name().to_owned())
        .unwrap_or_default();
    world.message(
        format!("You equipped the {name} (+{bonus} attack)."),
        MessageTone::Equipment,
    );
    Ok(bonus)
}

/// Picks up the ground item under the controllable entity.
///
/// Keys go to the key counter regardless of capacity. A picked weapon is
/// equipped when nothing is equipped or when its bonus is strictly higher.
pub fn pick_up(world: &mut WorldState) -> PickupResult {
    let Some(index) = world.item_at(world.player.position) else {
        world.message("There is nothing here to pick up.", MessageTone::Muted);
        return PickupResult::Nothing;
    };

    let Some(carrier) = world.player.as_controllable() else {
        return PickupResult::Nothing;
    };
    let is_key = world.items[index].kind.is_key();
    if !is_key && carrier.inventory.is_full() {
        world.message("Your inventory is full.", MessageTone::Muted);
        return PickupResult::InventoryFull;
    }
    let equipped_bonus = carrier
        .equipped
        .and_then(|id| carrier.inventory.find(id))
        .and_then(|item| item.kind.attack_bonus());

    let item = world.items.remove(index);
    let kind = item.kind.clone();
    let id = item.id;
    world.message(format!("You picked up a {}!", item.name()), MessageTone::Loot);

    let Some(carrier) = world.player.as_controllable_mut() else {
        return PickupResult::Nothing;
    };
    if is_key {
        carrier.keys += 1;
        return PickupResult::Picked(kind);
    }
    if let Err(rejected) = carrier.inventory.push(item) {
        world.items.insert(index, rejected);
        return PickupResult::InventoryFull;
    }

    if let Some(bonus) = kind.attack_bonus()
        && equipped_bonus.is_none_or(|current| bonus > current)
        && let Err(err) = equip_and_announce(world, id)
    {
        tracing::warn!(error = %err, "auto-equip failed");
    }

    PickupResult::Picked(kind)
}

/// Uses the inventory item in slot `index`.
///
/// Potions are consumed only when they restore health. Weapons are equipped
/// and stay in the inventory.
pub fn use_item(world: &mut WorldState, index: usize) -> Result<UseOutcome, CommandError> {
    let Some(carrier) = world.player.as_controllable() else {
        return Err(CommandError::NoOp);
    };
    let len = carrier.inventory.len();
    let item = carrier
        .inventory
        .get(index)
        .cloned()
        .ok_or(CommandError::ItemIndexOutOfRange { index, len })?;

    match item.kind {
        ItemKind::HealthPotion { amount } => {
            let healed = world.player.heal(amount);
            if healed == 0 {
                world.message("You are already at full health.", MessageTone::Muted);
                return Err(CommandError::AlreadyAtFullHealth);
            }
            if let Some(carrier) = world.player.as_controllable_mut() {
                carrier.inventory.remove(index);
            }
            world.message(
                format!("You used a {}, healing {healed} HP.", item.name()),
                MessageTone::Healing,
            );
            Ok(UseOutcome::Healed(healed))
        }
        ItemKind::Weapon { .. } => {
            let attack_bonus = equip_and_announce(world, item.id)?;
            Ok(UseOutcome::Equipped {
                item: item.id,
                attack_bonus,
            })
        }
        ItemKind::Key => Err(CommandError::NoOp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, PlayerConfig};
    use crate::map::{Grid, MapDimensions, TileKind};
    use crate::state::{Item, Position};

    fn world() -> WorldState {
        let mut grid = Grid::new(MapDimensions::new(5, 5));
        grid.set_kind(Position::new(2, 2), TileKind::Floor);
        let player = Entity::player(&PlayerConfig::default(), Position::ORIGIN);
        WorldState::new(grid, player, 60)
    }

    fn drop_item(world: &mut WorldState, kind: ItemKind) -> ItemId {
        let id = world.allocate_item_id();
        let position = world.player.position;
        world.items.push(Item::new(id, position, kind));
        id
    }

    fn sword(bonus: u32) -> ItemKind {
        ItemKind::Weapon {
            name: "Sword".into(),
            attack_bonus: bonus,
        }
    }

    fn potion() -> ItemKind {
        ItemKind::HealthPotion { amount: 40 }
    }

    fn carried(world: &WorldState) -> usize {
        world
            .player
            .as_controllable()
            .map(|c| c.inventory.len())
            .unwrap_or_default()
    }

    #[test]
    fn nothing_to_pick_up() {
        let mut world = world();
        assert_eq!(pick_up(&mut world), PickupResult::Nothing);
        assert_eq!(
            world.log().latest().map(|m| m.text.as_str()),
            Some("There is nothing here to pick up.")
        );
    }

    #[test]
    fn full_inventory_leaves_potion_on_the_ground() {
        let mut world = world();
        for _ in 0..GameConfig::MAX_INVENTORY_SLOTS {
            drop_item(&mut world, potion());
            assert!(matches!(pick_up(&mut world), PickupResult::Picked(_)));
        }
        let inventory_before = world.player.as_controllable().cloned();
        let ground = drop_item(&mut world, potion());

        assert_eq!(pick_up(&mut world), PickupResult::InventoryFull);
        assert_eq!(world.items.len(), 1);
        assert_eq!(world.items[0].id, ground);
        assert_eq!(world.player.as_controllable().cloned(), inventory_before);
    }

    #[test]
    fn keys_ignore_capacity() {
        let mut world = world();
        for _ in 0..GameConfig::MAX_INVENTORY_SLOTS {
            drop_item(&mut world, potion());
            pick_up(&mut world);
        }
        drop_item(&mut world, ItemKind::Key);
        assert_eq!(pick_up(&mut world), PickupResult::Picked(ItemKind::Key));
        assert!(world.items.is_empty());
        assert_eq!(world.player.as_controllable().map(|c| c.keys), Some(1));
        assert_eq!(carried(&world), GameConfig::MAX_INVENTORY_SLOTS);
    }

    #[test]
    fn weapons_auto_equip_only_when_strictly_better() {
        let mut world = world();
        let first = drop_item(&mut world, sword(10));
        pick_up(&mut world);
        assert_eq!(world.player.attack_power(), 20);

        drop_item(&mut world, sword(10));
        pick_up(&mut world);
        assert_eq!(
            world.player.as_controllable().and_then(|c| c.equipped),
            Some(first)
        );

        let better = drop_item(&mut world, sword(15));
        pick_up(&mut world);
        assert_eq!(
            world.player.as_controllable().and_then(|c| c.equipped),
            Some(better)
        );
        assert_eq!(world.player.attack_power(), 25);
        assert_eq!(
            world.log().latest().map(|m| m.text.as_str()),
            Some("You equipped the Sword (+15 attack).")
        );
    }

    #[test]
    fn equipping_twice_is_idempotent() {
        let mut world = world();
        let id = drop_item(&mut world, sword(10));
        pick_up(&mut world);
        let once = world.player.attack_power();
        equip_weapon(&mut world.player, id).expect("carried weapon");
        equip_weapon(&mut world.player, id).expect("carried weapon");
        assert_eq!(world.player.attack_power(), once);
    }

    #[test]
    fn equip_requires_a_carried_weapon() {
        let mut world = world();
        let potion_id = drop_item(&mut world, potion());
        pick_up(&mut world);
        assert_eq!(
            equip_weapon(&mut world.player, potion_id),
            Err(InventoryError::NotAWeapon(potion_id))
        );
        assert_eq!(
            equip_weapon(&mut world.player, ItemId(77)),
            Err(InventoryError::NotInInventory(ItemId(77)))
        );
        assert_eq!(world.player.attack_power(), 10);
    }

    #[test]
    fn potion_at_full_health_is_kept() {
        let mut world = world();
        drop_item(&mut world, potion());
        pick_up(&mut world);
        assert_eq!(use_item(&mut world, 0), Err(CommandError::AlreadyAtFullHealth));
        assert_eq!(carried(&world), 1);
    }

    #[test]
    fn potion_heals_and_is_consumed() {
        let mut world = world();
        drop_item(&mut world, potion());
        pick_up(&mut world);
        world.player.take_damage(25);
        assert_eq!(use_item(&mut world, 0), Ok(UseOutcome::Healed(25)));
        assert_eq!(world.player.health(), 100);
        assert_eq!(carried(&world), 0);
        assert_eq!(
            world.log().latest().map(|m| m.text.as_str()),
            Some("You used a Health Potion, healing 25 HP.")
        );
    }

    #[test]
    fn using_a_weapon_keeps_it() {
        let mut world = world();
        let id = drop_item(&mut world, sword(10));
        pick_up(&mut world);
        assert_eq!(
            use_item(&mut world, 0),
            Ok(UseOutcome::Equipped {
                item: id,
                attack_bonus: 10
            })
        );
        assert_eq!(carried(&world), 1);
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut world = world();
        assert_eq!(
            use_item(&mut world, 3),
            Err(CommandError::ItemIndexOutOfRange { index: 3, len: 0 })
        );
    }
}
