//! Crawl client binary.
//!
//! # Examples
//!
//! ```bash
//! # Print a fully revealed level for a seed
//! cargo run -p crawl-client -- map --seed 7
//!
//! # Play on stdin, saving under ./saves
//! CRAWL_SAVE_PATH=./saves cargo run -p crawl-client -- play --seed 7
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use crawl_client::CliConfig;
use crawl_client::input::{self, Input};
use crawl_client::render::{render_effects, render_log, render_map, render_status};
use crawl_core::{Game, GameError, LevelState};
use crawl_runtime::{FileSaveRepository, Session, SessionCommand, SessionConfig};

/// Turn-based dungeon crawl
#[derive(Parser)]
#[command(name = "crawl")]
#[command(about = "Headless driver for the dungeon crawl", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Generate a level and print it fully revealed
    Map {
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Play on stdin, one command per line
    Play {
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::from_env();
    let game_config = config.game_config()?;

    match cli.command {
        Mode::Map { seed } => {
            let seed = config.resolve_seed(seed);
            let game = Game::new_game(game_config, seed);
            print!("{}", render_map(game.world(), true));
            println!("seed {seed}, {} rooms", game.world().grid.rooms().len());
            Ok(())
        }
        Mode::Play { seed } => {
            let seed = config.resolve_seed(seed);
            let repository = match &config.save_dir {
                Some(dir) => FileSaveRepository::new(dir)?,
                None => FileSaveRepository::default_location()?,
            };
            tracing::info!(saves = %repository.base_dir().display(), "save directory");
            let session_config = SessionConfig {
                game_config,
                ..SessionConfig::default()
            };
            play(Session::new(session_config, repository), seed)
        }
    }
}

/// Frames a floating text lives through per command line.
const FRAMES_PER_INPUT: u32 = 20;

fn play(mut session: Session<FileSaveRepository>, seed: u64) -> Result<()> {
    session.handle(SessionCommand::NewGame { seed })?;
    draw(&session)?;

    let mut next_seed = seed.wrapping_add(1);
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match input::parse(&line, next_seed) {
            Some(Input::Quit) => break,
            Some(Input::Help) => println!("{}", input::HELP),
            Some(Input::Turn(command)) => {
                if let Err(err) = session.submit(command) {
                    tracing::debug!(code = err.error_code(), "{err}");
                }
            }
            Some(Input::Session(command)) => {
                if matches!(command, SessionCommand::NewGame { .. }) {
                    next_seed = next_seed.wrapping_add(1);
                }
                if let Err(err) = session.handle(command) {
                    println!("{err}");
                }
            }
            None => println!("unknown command, type 'help'"),
        }
        draw(&session)?;
        session.tick_effects(FRAMES_PER_INPUT);
    }
    Ok(())
}

fn draw(session: &Session<FileSaveRepository>) -> Result<()> {
    let mut out = io::stdout().lock();
    let Some(game) = session.game() else {
        writeln!(out, "no game; type 'new' or 'load'")?;
        return Ok(());
    };
    match game.level_state() {
        LevelState::MainMenu => writeln!(out, "main menu: new [seed] | load | quit")?,
        LevelState::Defeat => writeln!(out, "You died on floor {}. new | load | quit", game.floor())?,
        LevelState::Victory => writeln!(out, "Victory! new | quit")?,
        LevelState::Playing | LevelState::LevelTransition => {
            write!(out, "{}", render_map(game.world(), false))?;
            writeln!(out, "{}", render_status(game))?;
            writeln!(out, "{}", render_log(game.world()))?;
            let effects = render_effects(game.world());
            if !effects.is_empty() {
                writeln!(out, "{effects}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
