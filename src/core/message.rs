//! Game message feed.
//!
//! Every resolved action, choice and the game's end append one entry. The
//! feed is public: both players see the same entries, so messages carry card
//! counts and the geishas of cards that were openly offered, never the
//! identity of a hidden card.
//!
//! Timestamps come from a `Clock` so the engine stays deterministic under
//! test.

use std::time::{SystemTime, UNIX_EPOCH};

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionType;
use super::player::PlayerId;

/// Source of message timestamps (milliseconds since the Unix epoch).
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        epoch_millis(SystemTime::now())
    }
}

/// Milliseconds since the epoch, saturating at `u64::MAX`. A clock set before
/// the epoch reads as 0.
fn epoch_millis(time: SystemTime) -> u64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        Err(_) => 0,
    }
}

/// A clock stuck at one instant.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

/// Message category, used by front ends for styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Lifecycle: game created, started.
    System,
    /// A player took an action.
    PlayerAction,
    /// Neutral information: turn changes, card received.
    Info,
    /// The game ended.
    GameEvent,
}

/// One feed entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMessage {
    /// Position in the feed, starting at 0.
    pub id: u64,
    pub kind: MessageKind,
    pub actor: Option<PlayerId>,
    pub action_type: Option<ActionType>,
    pub text: String,
    pub timestamp_ms: u64,
    pub detail: Option<String>,
}

/// Builder for a message before it is stamped and appended.
#[derive(Clone, Debug)]
pub struct NewMessage {
    kind: MessageKind,
    actor: Option<PlayerId>,
    action_type: Option<ActionType>,
    text: String,
    detail: Option<String>,
}

impl NewMessage {
    #[must_use]
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            actor: None,
            action_type: None,
            text: text.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn actor(mut self, player: PlayerId) -> Self {
        self.actor = Some(player);
        self
    }

    #[must_use]
    pub fn action(mut self, action_type: ActionType) -> Self {
        self.action_type = Some(action_type);
        self
    }

    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Append-only message log.
///
/// Backed by `im::Vector` so cloning a game (snapshots, speculative
/// application) stays cheap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    entries: Vector<GameMessage>,
}

impl MessageLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp and append a message, returning its id.
    pub fn push(&mut self, message: NewMessage, clock: &dyn Clock) -> u64 {
        let id = self.entries.len() as u64;
        self.entries.push_back(GameMessage {
            id,
            kind: message.kind,
            actor: message.actor,
            action_type: message.action_type,
            text: message.text,
            timestamp_ms: clock.now_ms(),
            detail: message.detail,
        });
        id
    }

    /// Entries from `from` (inclusive) onward. Replaying from 0 yields the
    /// whole feed.
    #[must_use]
    pub fn since(&self, from: usize) -> Vec<GameMessage> {
        self.entries.iter().skip(from).cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&GameMessage> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameMessage> {
        self.entries.iter()
    }
}
