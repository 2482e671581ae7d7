//! Errors surfaced by the session API.

use crawl_core::{CommandError, ErrorSeverity, GameError, LevelState, SnapshotError};
use thiserror::Error;

use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no game in progress")]
    NoActiveGame,

    #[error("cannot save while the game is {0}")]
    NotPlaying(LevelState),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("persistence failure: {0}")]
    PersistenceFailure(#[from] RepositoryError),

    #[error("saved game is invalid: {0}")]
    InvalidSnapshot(#[from] SnapshotError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoActiveGame | Self::NotPlaying(_) => ErrorSeverity::Validation,
            Self::Command(err) => err.severity(),
            Self::PersistenceFailure(err) => err.severity(),
            Self::InvalidSnapshot(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveGame => "RUNTIME_NO_ACTIVE_GAME",
            Self::NotPlaying(_) => "RUNTIME_NOT_PLAYING",
            Self::Command(err) => err.error_code(),
            Self::PersistenceFailure(err) => err.error_code(),
            Self::InvalidSnapshot(err) => err.error_code(),
        }
    }
}
