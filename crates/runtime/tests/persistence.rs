use std::fs;

use crawl_core::{Command, GameConfig, LevelState, TurnPhase};
use crawl_runtime::{
    FileSaveRepository, RepositoryError, RuntimeError, SaveRepository, Session, SessionCommand,
    SessionConfig,
};
use tempfile::TempDir;

fn file_session(dir: &TempDir) -> Session<FileSaveRepository> {
    let repository = FileSaveRepository::new(dir.path()).expect("repository");
    Session::new(SessionConfig::default(), repository)
}

/// Plays a few turns, saves, keeps playing, and reloads from disk.
#[test]
fn save_and_load_through_files() {
    let dir = TempDir::new().unwrap();
    let mut session = file_session(&dir);
    session.handle(SessionCommand::NewGame { seed: 17 }).unwrap();
    for _ in 0..3 {
        session.submit(Command::Wait).unwrap();
    }
    session.handle(SessionCommand::Save).unwrap();
    let saved = session.game().unwrap().snapshot();

    for _ in 0..3 {
        session.submit(Command::Wait).unwrap();
    }

    // A second session over the same directory sees the save.
    let mut reloaded = file_session(&dir);
    assert!(reloaded.has_save());
    reloaded.handle(SessionCommand::Load).unwrap();

    let game = reloaded.game().unwrap();
    assert_eq!(game.floor(), saved.floor);
    assert_eq!(game.level_state(), LevelState::Playing);
    assert_eq!(game.phase(), TurnPhase::ControllableTurn);
    assert_eq!(game.world().grid, saved.world.grid);
    assert_eq!(game.world().player, saved.world.player);
    assert_eq!(game.world().hostiles, saved.world.hostiles);
    assert_eq!(game.world().items, saved.world.items);
}

/// Restored games draw the same random numbers as the original would have.
#[test]
fn loaded_game_replays_identically() {
    let dir = TempDir::new().unwrap();
    let mut session = file_session(&dir);
    session.new_game(23);
    session.save().unwrap();

    let mut twin = file_session(&dir);
    twin.load().unwrap();

    for _ in 0..5 {
        let a = session.submit(Command::Wait).ok();
        let b = twin.submit(Command::Wait).ok();
        assert_eq!(a, b);
    }
    assert_eq!(
        session.game().unwrap().world().hostiles,
        twin.game().unwrap().world().hostiles
    );
}

#[test]
fn corrupted_save_is_rejected_and_game_kept() {
    let dir = TempDir::new().unwrap();
    let mut session = file_session(&dir);
    session.new_game(31);
    session.save().unwrap();

    let path = session.repository().slot_path(crawl_runtime::DEFAULT_SLOT);
    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0x5A;
    fs::write(&path, bytes).unwrap();

    session.submit(Command::Wait).unwrap();
    let before = session.game().unwrap().snapshot();

    let err = session.load().unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::PersistenceFailure(RepositoryError::CorruptedData(_))
    ));

    let game = session.game().unwrap();
    assert_eq!(game.world().player, before.world.player);
    assert_eq!(game.world().hostiles, before.world.hostiles);
    assert_eq!(
        game.world().log().latest().map(|m| m.text.as_str()),
        Some("Error loading game!")
    );
}

#[test]
fn truncated_save_is_rejected() {
    let dir = TempDir::new().unwrap();
    let repository = FileSaveRepository::new(dir.path()).unwrap();
    fs::write(repository.slot_path("broken"), b"CRW").unwrap();
    assert!(matches!(
        repository.load("broken"),
        Err(RepositoryError::CorruptedData(_))
    ));
}

#[test]
fn custom_config_survives_the_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = SessionConfig {
        game_config: GameConfig::default().with_dimensions(50, 40).with_num_floors(2),
        save_slot: "short-run".into(),
    };
    let repository = FileSaveRepository::new(dir.path()).unwrap();
    let mut session = Session::new(config, repository);
    session.new_game(2);
    session.save().unwrap();

    assert!(session.repository().exists("short-run"));
    let snapshot = session.repository().load("short-run").unwrap();
    assert_eq!(snapshot.config.num_floors, 2);
    assert_eq!(snapshot.world.grid.width(), 50);
}
