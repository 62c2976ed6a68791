//! Builder for a started game.
//!
//! Hosts and tests that want something other than the defaults (a custom
//! catalog, a fixed clock, stacked hands) set it here and get back an engine
//! and a state already in `Playing`.

use std::sync::Arc;

use super::engine::Hanamikoji;
use super::turn::Deal;
use crate::cards::{CardId, CardRegistry};
use crate::core::config::RulesConfig;
use crate::core::error::ConfigError;
use crate::core::message::{Clock, SystemClock};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::{GameId, GameState};

/// Builder for creating a started game.
pub struct GameBuilder {
    config: RulesConfig,
    registry: Arc<CardRegistry>,
    clock: Arc<dyn Clock>,
    game_id: GameId,
    host: String,
    guest: String,
    hands: Option<PlayerMap<Vec<CardId>>>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            config: RulesConfig::default(),
            registry: CardRegistry::standard(),
            clock: Arc::new(SystemClock),
            game_id: GameId(1),
            host: "Host".to_string(),
            guest: "Guest".to_string(),
            hands: None,
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(mut self, registry: Arc<CardRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn game_id(mut self, id: GameId) -> Self {
        self.game_id = id;
        self
    }

    pub fn names(mut self, host: impl Into<String>, guest: impl Into<String>) -> Self {
        self.host = host.into();
        self.guest = guest.into();
        self
    }

    /// Deal these exact hands instead of shuffling.
    ///
    /// The remaining cards form the deck in id order; the highest
    /// `removed_cards` of them are set aside.
    pub fn hands(mut self, host: &[CardId], guest: &[CardId]) -> Self {
        let mut hands = PlayerMap::with_default();
        hands[PlayerId::HOST] = host.to_vec();
        hands[PlayerId::GUEST] = guest.to_vec();
        self.hands = Some(hands);
        self
    }

    /// Build the engine and a started game.
    pub fn build(self, seed: u64) -> Result<(Hanamikoji, GameState), ConfigError> {
        let engine = Hanamikoji::new(self.config, self.registry)?.with_clock(self.clock);
        let deal = match self.hands {
            Some(hands) => Deal::Stacked(hands),
            None => Deal::Shuffled,
        };

        let mut state = engine.new_game(self.game_id, seed, self.host);
        engine.join_with_deal(&mut state, self.guest, deal);
        Ok((engine, state))
    }
}
