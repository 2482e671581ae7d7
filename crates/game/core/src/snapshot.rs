//! Whole-game snapshots for persistence.
//!
//! A [`GameSnapshot`] carries everything needed to continue a game exactly
//! where it stopped, generator state included. Restoring goes through
//! [`GameSnapshot::validate`] first, so a malformed snapshot never replaces
//! a running game.

use crate::config::GameConfig;
use crate::engine::{Game, LevelState, TurnPhase};
use crate::error::{ErrorSeverity, GameError};
use crate::rng::GameRng;
use crate::state::{EntityId, ItemId, Position, WorldState};

/// Structural problems found in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("grid tiles do not match its dimensions or markers")]
    InconsistentGrid,

    #[error("floor {floor} outside 1..={num_floors}")]
    FloorOutOfRange { floor: u32, num_floors: u32 },

    #[error("entity {id} at {position} is off the grid")]
    EntityOutOfBounds { id: EntityId, position: Position },

    #[error("item {id} at {position} is off the grid")]
    ItemOutOfBounds { id: ItemId, position: Position },

    #[error("entity {0} has inconsistent health or liveness")]
    InconsistentEntity(EntityId),

    #[error("entity {0} is in the wrong container for its faction")]
    MisplacedEntity(EntityId),

    #[error("entity id {0} appears more than once")]
    DuplicateEntity(EntityId),

    #[error("equipped item {0} is not carried")]
    EquippedNotCarried(ItemId),

    #[error("id {0} was not issued by the snapshot's allocator")]
    UnallocatedId(u32),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InconsistentGrid => "SNAPSHOT_INCONSISTENT_GRID",
            Self::FloorOutOfRange { .. } => "SNAPSHOT_FLOOR_OUT_OF_RANGE",
            Self::EntityOutOfBounds { .. } => "SNAPSHOT_ENTITY_OUT_OF_BOUNDS",
            Self::ItemOutOfBounds { .. } => "SNAPSHOT_ITEM_OUT_OF_BOUNDS",
            Self::InconsistentEntity(_) => "SNAPSHOT_INCONSISTENT_ENTITY",
            Self::MisplacedEntity(_) => "SNAPSHOT_MISPLACED_ENTITY",
            Self::DuplicateEntity(_) => "SNAPSHOT_DUPLICATE_ENTITY",
            Self::EquippedNotCarried(_) => "SNAPSHOT_EQUIPPED_NOT_CARRIED",
            Self::UnallocatedId(_) => "SNAPSHOT_UNALLOCATED_ID",
        }
    }
}

/// Serializable copy of a [`Game`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub seed: u64,
    pub floor: u32,
    pub level_state: LevelState,
    pub phase: TurnPhase,
    pub world: WorldState,
    pub rng: GameRng,
}

impl GameSnapshot {
    /// Checks the invariants a running game relies on.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let world = &self.world;
        let grid = &world.grid;
        if !grid.is_consistent() {
            return Err(SnapshotError::InconsistentGrid);
        }

        // Winning bumps the floor one past the last.
        let max_floor = match self.level_state {
            LevelState::Victory => self.config.num_floors + 1,
            _ => self.config.num_floors,
        };
        if self.floor == 0 || self.floor > max_floor {
            return Err(SnapshotError::FloorOutOfRange {
                floor: self.floor,
                num_floors: self.config.num_floors,
            });
        }

        let (next_entity, next_item) = world.id_allocators();
        let mut seen = Vec::with_capacity(world.hostiles.len() + 1);
        for entity in std::iter::once(&world.player).chain(&world.hostiles) {
            if !grid.contains(entity.position) {
                return Err(SnapshotError::EntityOutOfBounds {
                    id: entity.id,
                    position: entity.position,
                });
            }
            if !entity.is_consistent() {
                return Err(SnapshotError::InconsistentEntity(entity.id));
            }
            if seen.contains(&entity.id) {
                return Err(SnapshotError::DuplicateEntity(entity.id));
            }
            if entity.id != EntityId::PLAYER && entity.id.0 >= next_entity {
                return Err(SnapshotError::UnallocatedId(entity.id.0));
            }
            seen.push(entity.id);
        }

        if world.player.id != EntityId::PLAYER || world.player.as_controllable().is_none() {
            return Err(SnapshotError::MisplacedEntity(world.player.id));
        }
        if let Some(misplaced) = world.hostiles.iter().find(|h| h.as_hostile().is_none()) {
            return Err(SnapshotError::MisplacedEntity(misplaced.id));
        }

        for item in &world.items {
            if !grid.contains(item.position) {
                return Err(SnapshotError::ItemOutOfBounds {
                    id: item.id,
                    position: item.position,
                });
            }
        }

        if let Some(carrier) = world.player.as_controllable() {
            if let Some(equipped) = carrier.equipped
                && !carrier.inventory.contains(equipped)
            {
                return Err(SnapshotError::EquippedNotCarried(equipped));
            }
            let carried = carrier.inventory.iter().map(|item| item.id);
            for id in world.items.iter().map(|item| item.id).chain(carried) {
                if id.0 >= next_item {
                    return Err(SnapshotError::UnallocatedId(id.0));
                }
            }
        }

        Ok(())
    }
}

impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config().clone(),
            seed: self.seed(),
            floor: self.floor(),
            level_state: self.level_state(),
            phase: self.phase(),
            world: self.world().clone(),
            rng: self.rng().clone(),
        }
    }

    /// Builds a game from a validated snapshot.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let GameSnapshot {
            config,
            seed,
            floor,
            level_state,
            phase,
            world,
            rng,
        } = snapshot;
        Ok(Self::from_parts(
            config,
            seed,
            floor,
            level_state,
            phase,
            world,
            rng,
        ))
    }

    /// Replaces this game with `snapshot`. On error nothing changes.
    pub fn restore(&mut self, snapshot: GameSnapshot) -> Result<(), SnapshotError> {
        *self = Self::from_snapshot(snapshot)?;
        tracing::info!(floor = self.floor(), "game restored from snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Command;
    use crate::state::{Item, ItemKind};

    fn game() -> Game {
        Game::new_game(GameConfig::default(), 21)
    }

    #[test]
    fn restored_game_continues_identically() {
        let mut original = game();
        original.submit(Command::Wait).expect("wait");
        let snapshot = original.snapshot();
        assert_eq!(snapshot.validate(), Ok(()));

        let mut restored = Game::from_snapshot(snapshot).expect("valid snapshot");
        for _ in 0..3 {
            let a = original.submit(Command::Wait);
            let b = restored.submit(Command::Wait);
            assert_eq!(a, b);
        }
        assert_eq!(original.snapshot(), restored.snapshot());
    }

    #[test]
    fn player_off_the_grid_is_rejected() {
        let mut snapshot = game().snapshot();
        snapshot.world.player.position = Position::new(-4, 2);
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::EntityOutOfBounds { id: EntityId::PLAYER, .. })
        ));
    }

    #[test]
    fn equipped_weapon_must_be_carried() {
        let mut snapshot = game().snapshot();
        if let Some(carrier) = snapshot.world.player.as_controllable_mut() {
            carrier.equipped = Some(ItemId(0));
        }
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::EquippedNotCarried(ItemId(0)))
        );
    }

    #[test]
    fn ids_must_come_from_the_allocator() {
        let mut snapshot = game().snapshot();
        let stray = Item::new(ItemId(9_999), snapshot.world.player.position, ItemKind::Key);
        snapshot.world.items.push(stray);
        assert_eq!(snapshot.validate(), Err(SnapshotError::UnallocatedId(9_999)));
    }

    #[test]
    fn floor_must_be_in_range() {
        let mut snapshot = game().snapshot();
        snapshot.floor = 0;
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::FloorOutOfRange { floor: 0, .. })
        ));

        snapshot.floor = snapshot.config.num_floors + 1;
        assert!(snapshot.validate().is_err());
        snapshot.level_state = LevelState::Victory;
        assert_eq!(snapshot.validate(), Ok(()));
    }

    #[test]
    fn failed_restore_keeps_the_running_game() {
        let mut running = game();
        let before = running.snapshot();
        let mut broken = Game::new_game(GameConfig::default(), 22).snapshot();
        broken.world.player.position = Position::new(500, 500);

        let err = running.restore(broken).expect_err("invalid snapshot");
        assert_eq!(err.severity(), ErrorSeverity::Internal);
        assert_eq!(running.snapshot(), before);
    }
}
