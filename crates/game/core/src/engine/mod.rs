//! Turn scheduling.
//!
//! [`Game`] is the authoritative aggregate: it owns the world, the seeded
//! generator and the coarse level state. The controllable entity acts
//! through [`Game::apply_command`]; hostiles then act in insertion order in
//! [`Game::resolve_autonomous_turn`]. A rejected command leaves every field
//! untouched apart from an advisory log line.

pub mod populate;

pub use populate::populate_floor;

use crate::action::{
    ActionResult, CommandError, PickupResult, UseOutcome, attempt_move, pick_up, use_item,
};
use crate::ai;
use crate::config::GameConfig;
use crate::dungeon::DungeonGenerator;
use crate::error::GameError;
use crate::rng::{GameRng, seeded};
use crate::state::{Entity, EntityId, ItemKind, MessageTone, WorldState};

/// Coarse state of the session. Only `Playing` accepts commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LevelState {
    MainMenu,
    Playing,
    LevelTransition,
    Defeat,
    Victory,
}

impl LevelState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Defeat | Self::Victory)
    }
}

/// Who acts next while playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    ControllableTurn,
    AutonomousTurn,
}

/// One controllable-turn command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveBy(i32, i32),
    PickUp,
    /// Zero-based inventory slot.
    UseItem(usize),
    Wait,
}

/// What an accepted command did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Acted(ActionResult),
    PickedUp(ItemKind),
    Used(UseOutcome),
    Waited,
    /// The move reached the stairs and a new floor was generated.
    Descended { floor: u32 },
    /// The move reached the stairs of the last floor.
    Escaped,
}

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    floor: u32,
    level_state: LevelState,
    phase: TurnPhase,
    world: WorldState,
    rng: GameRng,
}

impl Game {
    /// Starts a game on floor 1 from `seed`.
    pub fn new_game(config: GameConfig, seed: u64) -> Self {
        let mut rng = seeded(seed);
        let grid = DungeonGenerator::new(&config.generation).generate(&mut rng);
        let player = Entity::player(&config.player, grid.spawn());
        let mut world = WorldState::new(grid, player, config.floating_text_frames);
        populate_floor(&mut world, &config.population, 1, &mut rng);
        world.reveal_around_player(config.reveal_half_width, config.reveal_half_height);

        world.message("Welcome to the Dungeon!", MessageTone::Info);
        world.message(
            format!(
                "Find the stairs and descend {} floors to escape.",
                config.num_floors
            ),
            MessageTone::Muted,
        );
        tracing::info!(seed, floors = config.num_floors, "new game started");

        Self {
            config,
            seed,
            floor: 1,
            level_state: LevelState::Playing,
            phase: TurnPhase::ControllableTurn,
            world,
            rng,
        }
    }

    pub(crate) fn from_parts(
        config: GameConfig,
        seed: u64,
        floor: u32,
        level_state: LevelState,
        phase: TurnPhase,
        world: WorldState,
        rng: GameRng,
    ) -> Self {
        Self {
            config,
            seed,
            floor,
            level_state,
            phase,
            world,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn level_state(&self) -> LevelState {
        self.level_state
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub(crate) fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Leaves the current game; commands are rejected until a new one starts.
    pub fn return_to_menu(&mut self) {
        tracing::info!(floor = self.floor, "returned to menu");
        self.level_state = LevelState::MainMenu;
    }

    /// Applies one command on the controllable turn.
    ///
    /// Rejected commands cost no turn. An accepted command reveals the view
    /// window around the controllable entity; a move onto the stairs advances
    /// the floor, anything else hands the turn to the hostiles.
    pub fn apply_command(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        if self.level_state != LevelState::Playing {
            return Err(CommandError::NotPlaying);
        }
        if self.phase != TurnPhase::ControllableTurn {
            return Err(CommandError::NotYourTurn);
        }

        let outcome = match self.execute(command) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(?command, code = err.error_code(), error = %err, "command rejected");
                if let Some(text) = advisory(&err) {
                    self.world.message(text, MessageTone::Muted);
                }
                return Err(err);
            }
        };

        self.world.reveal_around_player(
            self.config.reveal_half_width,
            self.config.reveal_half_height,
        );

        let on_stairs = self.world.grid.stairs() == Some(self.world.player.position);
        if outcome == CommandOutcome::Acted(ActionResult::Moved) && on_stairs {
            return Ok(self.advance_floor());
        }

        self.phase = TurnPhase::AutonomousTurn;
        Ok(outcome)
    }

    fn execute(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        let world = &mut self.world;
        match command {
            Command::MoveBy(dx, dy) => attempt_move(world, EntityId::PLAYER, dx, dy)
                .into_command_result()
                .map(CommandOutcome::Acted),
            Command::PickUp => match pick_up(world) {
                PickupResult::Picked(kind) => Ok(CommandOutcome::PickedUp(kind)),
                PickupResult::InventoryFull => Err(CommandError::InventoryFull),
                PickupResult::Nothing => Err(CommandError::NothingToPickUp),
            },
            Command::UseItem(index) => use_item(world, index).map(CommandOutcome::Used),
            Command::Wait => Ok(CommandOutcome::Waited),
        }
    }

    /// Lets every living hostile act once, in insertion order.
    ///
    /// The pass stops as soon as the controllable entity dies, which ends
    /// the game in `Defeat`. Otherwise the turn returns to the player.
    pub fn resolve_autonomous_turn(&mut self) -> LevelState {
        if self.level_state != LevelState::Playing || self.phase != TurnPhase::AutonomousTurn {
            return self.level_state;
        }

        let order: Vec<EntityId> = self
            .world
            .hostiles
            .iter()
            .filter(|hostile| hostile.is_alive())
            .map(|hostile| hostile.id)
            .collect();
        for id in order {
            if !self.world.player.is_alive() {
                break;
            }
            ai::take_turn(&mut self.world, id);
        }

        if self.world.player.is_alive() {
            self.phase = TurnPhase::ControllableTurn;
        } else {
            self.level_state = LevelState::Defeat;
            tracing::info!(floor = self.floor, "controllable entity died");
        }
        self.level_state
    }

    /// Applies `command` and, when it consumed the turn, lets hostiles act.
    pub fn submit(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        let outcome = self.apply_command(command)?;
        if self.phase == TurnPhase::AutonomousTurn {
            self.resolve_autonomous_turn();
        }
        Ok(outcome)
    }

    fn advance_floor(&mut self) -> CommandOutcome {
        self.floor += 1;
        if self.floor > self.config.num_floors {
            self.level_state = LevelState::Victory;
            self.world
                .message("You escaped the dungeon!", MessageTone::Victory);
            tracing::info!(floors = self.config.num_floors, "victory");
            return CommandOutcome::Escaped;
        }

        self.level_state = LevelState::LevelTransition;
        self.world.message(
            format!("You descend to floor {}...", self.floor),
            MessageTone::Descend,
        );

        let grid = DungeonGenerator::new(&self.config.generation).generate(&mut self.rng);
        self.world.enter_level(grid);
        let (hostiles, items) =
            populate_floor(&mut self.world, &self.config.population, self.floor, &mut self.rng);
        self.world.reveal_around_player(
            self.config.reveal_half_width,
            self.config.reveal_half_height,
        );

        self.level_state = LevelState::Playing;
        self.phase = TurnPhase::ControllableTurn;
        tracing::info!(floor = self.floor, hostiles, items, "descended");
        CommandOutcome::Descended { floor: self.floor }
    }
}

/// Log line for rejections the rules did not already report.
fn advisory(err: &CommandError) -> Option<String> {
    match err {
        CommandError::InvalidMove => Some("You can't move there.".to_owned()),
        CommandError::ItemIndexOutOfRange { index, .. } => {
            Some(format!("You have no item in slot {}.", index + 1))
        }
        CommandError::NoOp => Some("Nothing happens.".to_owned()),
        CommandError::Inventory(_) => Some("You can't use that.".to_owned()),
        _ => None,
    }
}
