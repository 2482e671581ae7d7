//! Common error infrastructure for crawl-core.
//!
//! Domain errors (`CommandError`, `CombatError`, `InventoryError`,
//! `SnapshotError`) live next to the rules that raise them. They share the
//! severity classification below so callers can decide how to report them.

/// Severity level of an error, used for categorization and reporting.
///
/// - **Recoverable**: the command was rejected, the player may try something else
/// - **Validation**: invalid input that should not be retried unchanged
/// - **Internal**: unexpected state inconsistency
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// Examples: locked door, wall in the way, inventory full.
    Recoverable,

    /// Examples: item index out of range, missing target entity.
    Validation,

    /// Examples: equipped weapon missing from inventory after a restore.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all crawl-core errors.
///
/// Use `#[derive(thiserror::Error)]` for the `Display`/`Error` impls and
/// classify severity by recoverability, not impact.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
