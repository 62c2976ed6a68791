//! Rules configuration.
//!
//! `RulesConfig::default()` is the base game: six cards dealt to each player,
//! one card set aside unseen, a card drawn at the start of every turn, and a
//! win at four geishas or eleven charm.
//!
//! Configs are plain serde structs so hosts can load them from their own
//! settings files; call `validate` against the registry before use.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::CardRegistry;

/// Who takes the first turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstPlayer {
    /// The seat that created the game.
    #[default]
    Host,
    /// Decided by the game's seeded RNG.
    Random,
}

/// Tunable rules. Every field has a base-game default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Cards dealt to each player when the game starts.
    pub hand_size: usize,

    /// Cards set aside face-down before dealing.
    pub removed_cards: usize,

    /// Whether the incoming player draws a card at the start of each turn.
    pub draw_each_turn: bool,

    /// Geishas in a player's favor needed to win.
    pub geishas_to_win: usize,

    /// Combined charm of favoring geishas needed to win.
    pub charm_to_win: u32,

    pub first_player: FirstPlayer,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: 6,
            removed_cards: 1,
            draw_each_turn: true,
            geishas_to_win: 4,
            charm_to_win: 11,
            first_player: FirstPlayer::Host,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_removed_cards(mut self, count: usize) -> Self {
        self.removed_cards = count;
        self
    }

    #[must_use]
    pub fn with_draw_each_turn(mut self, draw: bool) -> Self {
        self.draw_each_turn = draw;
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, geishas: usize, charm: u32) -> Self {
        self.geishas_to_win = geishas;
        self.charm_to_win = charm;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, first: FirstPlayer) -> Self {
        self.first_player = first;
        self
    }

    /// Check the config can be played with `registry`.
    pub fn validate(&self, registry: &CardRegistry) -> Result<(), ConfigError> {
        let needed = self.hand_size * 2 + self.removed_cards;
        if needed > registry.card_count() {
            return Err(ConfigError::DeckTooSmall {
                available: registry.card_count(),
                needed,
            });
        }
        if self.geishas_to_win == 0 {
            return Err(ConfigError::ZeroThreshold("geisha"));
        }
        if self.charm_to_win == 0 {
            return Err(ConfigError::ZeroThreshold("charm"));
        }
        Ok(())
    }
}
