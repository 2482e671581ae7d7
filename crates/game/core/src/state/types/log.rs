//! Message log and transient floating-text effects.

use std::collections::VecDeque;

use super::Position;
use crate::config::GameConfig;

/// Severity/colour tag attached to log lines and floating text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MessageTone {
    Info,
    Muted,
    Warning,
    Danger,
    Loot,
    Healing,
    Equipment,
    Descend,
    Victory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub text: String,
    pub tone: MessageTone,
}

/// Bounded log, newest entry first. Oldest entries fall off the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageLog {
    entries: VecDeque<Message>,
}

impl MessageLog {
    pub const CAPACITY: usize = GameConfig::MESSAGE_LOG_CAPACITY;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, tone: MessageTone) {
        self.entries.push_front(Message {
            text: text.into(),
            tone,
        });
        self.entries.truncate(Self::CAPACITY);
    }

    /// Newest-first iteration.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Message> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Short-lived text anchored to a tile (damage numbers and the like).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatingText {
    pub text: String,
    pub position: Position,
    pub tone: MessageTone,
    /// Frames left before the effect expires.
    pub remaining: u32,
}

impl FloatingText {
    pub fn new(text: impl Into<String>, position: Position, tone: MessageTone, frames: u32) -> Self {
        Self {
            text: text.into(),
            position,
            tone,
            remaining: frames,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}
