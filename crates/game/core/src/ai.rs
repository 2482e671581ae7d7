//! Per-hostile decision logic.
//!
//! Each turn a hostile looks at the controllable entity again: out of sight
//! it idles, in attack range it steps into the target, otherwise it follows
//! a cached breadth-first path. "In sight" means within the sight radius and
//! standing on an explored tile; there is no line-of-sight test.

use std::collections::VecDeque;

use crate::action::{ActionResult, attempt_move};
use crate::map::Tile;
use crate::pathfinding::find_path;
use crate::state::{AiState, Entity, EntityId, Hostile, Position, WorldState};

/// Distance under which a failed attack step does not fall back to pursuit.
const ADJACENT_RANGE: f32 = 1.5;

fn hostile_mut(world: &mut WorldState, id: EntityId) -> Option<&mut Hostile> {
    world.entity_mut(id).and_then(Entity::as_hostile_mut)
}

fn set_state(world: &mut WorldState, id: EntityId, state: AiState, clear_path: bool) {
    if let Some(hostile) = hostile_mut(world, id) {
        hostile.ai_state = state;
        if clear_path {
            hostile.path = None;
        }
    }
}

/// Runs one turn for hostile `id`. Returns the resulting state, or `None`
/// when the entity is missing, dead, or not a hostile.
pub fn take_turn(world: &mut WorldState, id: EntityId) -> Option<AiState> {
    let entity = world.entity(id).filter(|entity| entity.is_alive())?;
    let profile = entity.as_hostile()?;
    let (sight_radius, attack_range) = (profile.sight_radius, profile.attack_range);
    let origin = entity.position;

    let target = world.player.position;
    let distance = origin.chebyshev(target);
    let target_seen = world.player.is_alive()
        && distance <= sight_radius
        && world.grid.tile(target).is_some_and(Tile::is_explored);

    if !target_seen {
        set_state(world, id, AiState::Idle, true);
        return Some(AiState::Idle);
    }

    if distance as f32 <= attack_range {
        let dx = (target.x - origin.x).signum();
        let dy = (target.y - origin.y).signum();
        let result = attempt_move(world, id, dx, dy);
        if result.consumes_turn() {
            tracing::debug!(%id, ?result, "hostile engaged");
            set_state(world, id, AiState::Attacking, true);
            return Some(AiState::Attacking);
        }
        set_state(world, id, AiState::Chasing, false);
        if distance as f32 > ADJACENT_RANGE {
            pursue(world, id, origin, target);
        }
        return Some(AiState::Chasing);
    }

    set_state(world, id, AiState::Chasing, false);
    pursue(world, id, origin, target);
    Some(AiState::Chasing)
}

/// Consumes one step of the cached path, requesting a fresh one first when
/// the cache is empty. Any step that does not end in `Moved` drops the cache.
fn pursue(world: &mut WorldState, id: EntityId, origin: Position, target: Position) {
    let needs_path = hostile_mut(world, id)
        .is_some_and(|hostile| hostile.path.as_ref().is_none_or(VecDeque::is_empty));
    if needs_path {
        let path = find_path(&world.grid, origin, target).map(VecDeque::from);
        tracing::debug!(%id, from = %origin, to = %target, found = path.is_some(), "path requested");
        if let Some(hostile) = hostile_mut(world, id) {
            hostile.path = path;
        }
    }

    let Some(step) = hostile_mut(world, id)
        .and_then(|hostile| hostile.path.as_mut())
        .and_then(VecDeque::pop_front)
    else {
        set_state(world, id, AiState::Chasing, true);
        return;
    };

    if !origin.is_adjacent(step) {
        set_state(world, id, AiState::Chasing, true);
        return;
    }

    let result = attempt_move(world, id, step.x - origin.x, step.y - origin.y);
    if let Some(hostile) = hostile_mut(world, id) {
        let exhausted = hostile.path.as_ref().is_none_or(VecDeque::is_empty);
        if result != ActionResult::Moved || exhausted {
            hostile.path = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HostileTemplate, PlayerConfig};
    use crate::map::{Grid, MapDimensions, TileKind};

    /// Open 20x9 hall, fully explored, player at (2, 4).
    fn hall() -> WorldState {
        let mut grid = Grid::new(MapDimensions::new(20, 9));
        for y in 1..8 {
            for x in 1..19 {
                grid.set_kind(Position::new(x, y), TileKind::Floor);
            }
        }
        let player = Entity::player(&PlayerConfig::default(), Position::ORIGIN);
        let mut world = WorldState::new(grid, player, 60);
        world.player.position = Position::new(2, 4);
        world.grid.reveal_window(Position::new(10, 4), 10, 4);
        world
    }

    fn spawn(world: &mut WorldState, position: Position) -> EntityId {
        let id = world.allocate_entity_id();
        world.hostiles.push(Entity::hostile(
            id,
            &HostileTemplate::goblin(),
            position,
            0,
            0,
        ));
        id
    }

    fn hostile(world: &WorldState, id: EntityId) -> &Hostile {
        world
            .entity(id)
            .and_then(Entity::as_hostile)
            .expect("hostile exists")
    }

    #[test]
    fn unexplored_target_keeps_hostile_idle() {
        let mut grid = Grid::new(MapDimensions::new(10, 5));
        for x in 1..9 {
            grid.set_kind(Position::new(x, 2), TileKind::Floor);
        }
        let player = Entity::player(&PlayerConfig::default(), Position::ORIGIN);
        let mut world = WorldState::new(grid, player, 60);
        world.player.position = Position::new(1, 2);
        let goblin = spawn(&mut world, Position::new(4, 2));

        assert_eq!(take_turn(&mut world, goblin), Some(AiState::Idle));
        assert_eq!(world.entity(goblin).map(|e| e.position), Some(Position::new(4, 2)));
    }

    #[test]
    fn out_of_sight_radius_is_idle_and_forgets_path() {
        let mut world = hall();
        let goblin = spawn(&mut world, Position::new(17, 4));
        if let Some(h) = hostile_mut(&mut world, goblin) {
            h.path = Some(VecDeque::from([Position::new(16, 4)]));
        }
        assert_eq!(take_turn(&mut world, goblin), Some(AiState::Idle));
        assert!(hostile(&world, goblin).path.is_none());
    }

    #[test]
    fn adjacent_hostile_attacks_including_diagonals() {
        let mut world = hall();
        let goblin = spawn(&mut world, Position::new(3, 5));
        assert_eq!(take_turn(&mut world, goblin), Some(AiState::Attacking));
        assert_eq!(world.player.health(), 95);
        assert_eq!(world.entity(goblin).map(|e| e.position), Some(Position::new(3, 5)));
    }

    #[test]
    fn chasing_hostile_steps_closer_and_caches_the_rest() {
        let mut world = hall();
        let goblin = spawn(&mut world, Position::new(8, 4));
        assert_eq!(take_turn(&mut world, goblin), Some(AiState::Chasing));

        let moved = world.entity(goblin).map(|e| e.position).expect("goblin");
        assert_eq!(moved.chebyshev(world.player.position), 5);
        assert_eq!(hostile(&world, goblin).path.as_ref().map(VecDeque::len), Some(5));
        assert_eq!(world.player.health(), 100);
    }

    #[test]
    fn blocked_step_discards_the_cached_path() {
        let mut world = hall();
        let goblin = spawn(&mut world, Position::new(8, 4));
        spawn(&mut world, Position::new(7, 4));
        if let Some(h) = hostile_mut(&mut world, goblin) {
            h.path = Some(VecDeque::from([Position::new(7, 4), Position::new(6, 4)]));
        }

        assert_eq!(take_turn(&mut world, goblin), Some(AiState::Chasing));
        assert_eq!(world.entity(goblin).map(|e| e.position), Some(Position::new(8, 4)));
        assert!(hostile(&world, goblin).path.is_none());
    }

    #[test]
    fn stale_non_adjacent_step_is_dropped() {
        let mut world = hall();
        let goblin = spawn(&mut world, Position::new(8, 4));
        if let Some(h) = hostile_mut(&mut world, goblin) {
            h.path = Some(VecDeque::from([Position::new(12, 1)]));
        }
        take_turn(&mut world, goblin);
        assert_eq!(world.entity(goblin).map(|e| e.position), Some(Position::new(8, 4)));
        assert!(hostile(&world, goblin).path.is_none());
    }

    #[test]
    fn dead_hostiles_do_not_act() {
        let mut world = hall();
        let goblin = spawn(&mut world, Position::new(3, 4));
        if let Some(g) = world.entity_mut(goblin) {
            g.take_damage(500);
        }
        assert_eq!(take_turn(&mut world, goblin), None);
        assert_eq!(world.player.health(), 100);
    }
}
