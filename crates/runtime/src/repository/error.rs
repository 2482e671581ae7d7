//! Error types raised by repository implementations.

use crawl_core::{ErrorSeverity, GameError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("no save in slot '{0}'")]
    NotFound(String),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(_) => ErrorSeverity::Recoverable,
            Self::CorruptedData(_) | Self::UnsupportedVersion { .. } => ErrorSeverity::Validation,
            Self::LockPoisoned | Self::Io(_) | Self::Serialization(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Serialization(_) => "REPOSITORY_SERIALIZATION",
            Self::CorruptedData(_) => "REPOSITORY_CORRUPTED_DATA",
            Self::UnsupportedVersion { .. } => "REPOSITORY_UNSUPPORTED_VERSION",
            Self::NotFound(_) => "REPOSITORY_NOT_FOUND",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
