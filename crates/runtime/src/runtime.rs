//! Session orchestration.
//!
//! A [`Session`] owns the running [`Game`] and a save repository. It routes
//! in-turn commands to the game and handles the out-of-turn commands
//! (new game, save, load, return to menu) that the core knows nothing about.

use crawl_core::{Command, CommandOutcome, Game, GameConfig, LevelState, MessageTone};

use crate::error::{Result, RuntimeError};
use crate::repository::{RepositoryError, SaveRepository};

/// Slot used when none is configured.
pub const DEFAULT_SLOT: &str = "savegame";

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub game_config: GameConfig,
    pub save_slot: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            save_slot: DEFAULT_SLOT.to_owned(),
        }
    }
}

/// Commands handled outside the turn loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    NewGame { seed: u64 },
    Save,
    Load,
    ReturnToMenu,
}

pub struct Session<R> {
    config: SessionConfig,
    repository: R,
    game: Option<Game>,
}

impl<R: SaveRepository> Session<R> {
    pub fn new(config: SessionConfig, repository: R) -> Self {
        Self {
            config,
            repository,
            game: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Whether the configured slot holds a save (drives the "Load" menu entry).
    pub fn has_save(&self) -> bool {
        self.repository.exists(&self.config.save_slot)
    }

    pub fn handle(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::NewGame { seed } => {
                self.new_game(seed);
                Ok(())
            }
            SessionCommand::Save => self.save(),
            SessionCommand::Load => self.load(),
            SessionCommand::ReturnToMenu => {
                self.return_to_menu();
                Ok(())
            }
        }
    }

    /// Starts a fresh game, discarding the current one.
    pub fn new_game(&mut self, seed: u64) -> &Game {
        self.game.insert(Game::new_game(self.config.game_config.clone(), seed))
    }

    /// Applies an in-turn command and resolves the hostile turn that follows.
    pub fn submit(&mut self, command: Command) -> Result<CommandOutcome> {
        let game = self.game.as_mut().ok_or(RuntimeError::NoActiveGame)?;
        Ok(game.submit(command)?)
    }

    /// Saves the running game. Only a game in progress can be saved.
    pub fn save(&mut self) -> Result<()> {
        let game = self.game.as_mut().ok_or(RuntimeError::NoActiveGame)?;
        if game.level_state() != LevelState::Playing {
            return Err(RuntimeError::NotPlaying(game.level_state()));
        }

        let snapshot = game.snapshot();
        match self.repository.save(&self.config.save_slot, &snapshot) {
            Ok(()) => {
                game.world_mut().message("Game Saved!", MessageTone::Info);
                tracing::info!(slot = %self.config.save_slot, floor = game.floor(), "game saved");
                Ok(())
            }
            Err(err) => {
                game.world_mut().message("Error saving game!", MessageTone::Danger);
                tracing::warn!(slot = %self.config.save_slot, error = %err, "save failed");
                Err(err.into())
            }
        }
    }

    /// Replaces the running game with the saved one.
    ///
    /// Any failure (missing slot, unreadable file, invalid snapshot) leaves
    /// the current game exactly as it was, apart from an error line in its log.
    pub fn load(&mut self) -> Result<()> {
        let loaded = self
            .repository
            .load(&self.config.save_slot)
            .map_err(RuntimeError::from)
            .and_then(|snapshot| Ok(Game::from_snapshot(snapshot)?));

        match loaded {
            Ok(mut game) => {
                game.world_mut().message("Game Loaded!", MessageTone::Info);
                tracing::info!(slot = %self.config.save_slot, floor = game.floor(), "game loaded");
                self.game = Some(game);
                Ok(())
            }
            Err(err) => {
                let text = match err {
                    RuntimeError::PersistenceFailure(RepositoryError::NotFound(_)) => {
                        "No save file found!"
                    }
                    _ => "Error loading game!",
                };
                if let Some(game) = self.game.as_mut() {
                    game.world_mut().message(text, MessageTone::Danger);
                }
                tracing::warn!(slot = %self.config.save_slot, error = %err, "load rejected");
                Err(err)
            }
        }
    }

    /// Ages floating texts by `frames` presentation frames.
    pub fn tick_effects(&mut self, frames: u32) {
        if let Some(game) = self.game.as_mut() {
            game.world_mut().tick_effects(frames);
        }
    }

    pub fn return_to_menu(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.return_to_menu();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemorySaveRepository;

    fn session() -> Session<InMemorySaveRepository> {
        Session::new(SessionConfig::default(), InMemorySaveRepository::new())
    }

    #[test]
    fn commands_need_a_game() {
        let mut session = session();
        assert!(matches!(
            session.submit(Command::Wait),
            Err(RuntimeError::NoActiveGame)
        ));
        assert!(matches!(session.save(), Err(RuntimeError::NoActiveGame)));
    }

    #[test]
    fn save_then_load_restores_the_saved_turn() {
        let mut session = session();
        session.handle(SessionCommand::NewGame { seed: 4 }).unwrap();
        session.handle(SessionCommand::Save).unwrap();
        assert!(session.has_save());
        let saved_player = session.game().unwrap().world().player.clone();

        session.submit(Command::Wait).unwrap();
        session.handle(SessionCommand::Load).unwrap();

        let game = session.game().unwrap();
        assert_eq!(game.world().player, saved_player);
        assert_eq!(
            game.world().log().latest().map(|m| m.text.as_str()),
            Some("Game Loaded!")
        );
    }

    #[test]
    fn missing_save_keeps_the_current_game() {
        let mut session = session();
        session.new_game(5);
        let before = session.game().unwrap().snapshot();

        assert!(matches!(
            session.load(),
            Err(RuntimeError::PersistenceFailure(RepositoryError::NotFound(_)))
        ));
        let game = session.game().unwrap();
        assert_eq!(game.world().grid, before.world.grid);
        assert_eq!(game.world().player, before.world.player);
        assert_eq!(
            game.world().log().latest().map(|m| m.text.as_str()),
            Some("No save file found!")
        );
    }

    #[test]
    fn menu_blocks_play_and_save() {
        let mut session = session();
        session.new_game(6);
        session.handle(SessionCommand::ReturnToMenu).unwrap();
        assert_eq!(session.game().unwrap().level_state(), LevelState::MainMenu);
        assert!(matches!(
            session.save(),
            Err(RuntimeError::NotPlaying(LevelState::MainMenu))
        ));
        assert!(session.submit(Command::Wait).is_err());
    }
}
