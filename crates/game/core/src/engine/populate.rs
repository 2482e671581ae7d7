//! Floor population: hostiles and ground items.

use rand::Rng;

use crate::config::PopulationConfig;
use crate::map::Room;
use crate::rng::{range_inclusive, weighted_index};
use crate::state::{Entity, Item, Position, WorldState};

fn random_cell<R: Rng + ?Sized>(rooms: &[Room], rng: &mut R) -> Option<Position> {
    if rooms.is_empty() {
        return None;
    }
    let room = rooms[rng.gen_range(0..rooms.len())];
    let x = range_inclusive(rng, room.x + 1, room.x + room.w - 1);
    let y = range_inclusive(rng, room.y + 1, room.y + room.h - 1);
    Some(Position::new(x, y))
}

/// Spawns hostiles and items for `floor` into the current level.
///
/// Each spawn picks a random room interior cell and is skipped when the cell
/// is already taken, so counts are upper bounds. Returns the number of
/// hostiles and items actually placed.
pub fn populate_floor<R: Rng + ?Sized>(
    world: &mut WorldState,
    config: &PopulationConfig,
    floor: u32,
    rng: &mut R,
) -> (usize, usize) {
    let rooms = world.grid.rooms().to_vec();
    if rooms.is_empty() {
        tracing::warn!(floor, "level has no rooms; nothing spawned");
        return (0, 0);
    }

    let hostile_budget = floor * config.hostiles_per_floor
        + range_inclusive(rng, 0, config.hostile_bonus_max as i32) as u32;
    let health_bonus = floor * config.health_per_floor;
    let attack_bonus = floor / config.attack_floor_divisor.max(1);

    let mut hostiles = 0;
    for _ in 0..hostile_budget {
        let Some(cell) = random_cell(&rooms, rng) else {
            continue;
        };
        if world.blocking_entity_at(cell).is_some() {
            continue;
        }
        let Some(index) = weighted_index(rng, &config.bestiary, |template| template.weight) else {
            continue;
        };
        let id = world.allocate_entity_id();
        let hostile = Entity::hostile(
            id,
            &config.bestiary[index],
            cell,
            health_bonus,
            attack_bonus,
        );
        world.hostiles.push(hostile);
        hostiles += 1;
    }

    let item_budget = floor * config.items_per_floor
        + range_inclusive(
            rng,
            config.item_bonus_min as i32,
            config.item_bonus_max as i32,
        ) as u32;

    let mut items = 0;
    for _ in 0..item_budget {
        let Some(cell) = random_cell(&rooms, rng) else {
            continue;
        };
        if world.blocking_entity_at(cell).is_some() || world.item_at(cell).is_some() {
            continue;
        }
        let Some(kind) = weighted_index(rng, &config.item_table, |entry| entry.weight)
            .and_then(|index| config.item_table[index].item.clone())
        else {
            continue;
        };
        let id = world.allocate_item_id();
        world.items.push(Item::new(id, cell, kind));
        items += 1;
    }

    tracing::debug!(floor, hostiles, items, "populated floor");
    (hostiles, items)
}
