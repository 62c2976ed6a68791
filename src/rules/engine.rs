//! Rules engine trait and the Hanamikoji implementation.
//!
//! `RulesEngine` is the surface a host drives a game through:
//! - What actions are legal
//! - Submitting an action and answering a Gift/Compete
//! - Win/draw detection
//!
//! Each call is one atomic transition: validate, resolve, evaluate victory,
//! pass the turn. A rejected call leaves the state untouched.

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::turn::{self, Deal};
use super::{resolver, validator, victory};
use crate::cards::CardRegistry;
use crate::core::action::{Action, ActionRequest, ActionType, Choice, HistoryEntry};
use crate::core::config::RulesConfig;
use crate::core::error::{ActionError, ConfigError, Result};
use crate::core::message::{Clock, MessageKind, NewMessage, SystemClock};
use crate::core::player::PlayerId;
use crate::core::state::{GameId, GameState, GameStatus};
use crate::core::view::GameSnapshot;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Every action spent with nobody past a threshold.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if the player can't act
/// - `submit_action` / `resolve_choice`: all-or-nothing; on `Err` the state
///   is unchanged
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Get the rules configuration.
    fn config(&self) -> &RulesConfig;

    /// Card and geisha definitions the engine plays with.
    fn registry(&self) -> &CardRegistry;

    /// Every legal action for a player in the current state.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Validate and apply an action request.
    fn submit_action(&self, state: &mut GameState, player: PlayerId, request: &ActionRequest) -> Result<()>;

    /// Answer the outstanding Gift or Compete.
    fn resolve_choice(&self, state: &mut GameState, player: PlayerId, choice: Choice) -> Result<()>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Apply an already-typed action.
    fn apply_action(&self, state: &mut GameState, player: PlayerId, action: &Action) -> Result<()> {
        self.submit_action(state, player, &action.to_request())
    }

    /// What `viewer` may see of the game.
    fn snapshot(&self, state: &GameState, viewer: PlayerId) -> GameSnapshot {
        GameSnapshot::for_viewer(state, self.registry(), viewer)
    }
}

/// The base game.
///
/// Cheap to clone: the registry and clock are shared.
#[derive(Clone)]
pub struct Hanamikoji {
    config: RulesConfig,
    registry: Arc<CardRegistry>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for Hanamikoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hanamikoji")
            .field("config", &self.config)
            .field("cards", &self.registry.card_count())
            .finish_non_exhaustive()
    }
}

impl Default for Hanamikoji {
    fn default() -> Self {
        Self::standard()
    }
}

impl Hanamikoji {
    /// Create an engine, checking the config against the registry.
    pub fn new(config: RulesConfig, registry: Arc<CardRegistry>) -> std::result::Result<Self, ConfigError> {
        config.validate(&registry)?;
        Ok(Self {
            config,
            registry,
            clock: Arc::new(SystemClock),
        })
    }

    /// Base rules with the standard 21-card catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            config: RulesConfig::default(),
            registry: CardRegistry::standard(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the message clock (builder pattern).
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    #[must_use]
    pub fn shared_registry(&self) -> Arc<CardRegistry> {
        Arc::clone(&self.registry)
    }

    /// A new game with only the host seated.
    #[must_use]
    pub fn new_game(&self, id: GameId, seed: u64, host_name: impl Into<String>) -> GameState {
        let mut state = GameState::new(id, seed, &self.registry, host_name);
        let text = format!("{} created the game", victory::seat_name(&state, PlayerId::HOST));
        state
            .messages
            .push(NewMessage::new(MessageKind::System, text).actor(PlayerId::HOST), self.clock());
        state
    }

    /// Seat the second player and start the game with a shuffled deal.
    ///
    /// Returns `None` when the game is not waiting for a player.
    pub fn join(&self, state: &mut GameState, name: impl Into<String>) -> Option<PlayerId> {
        self.join_with_deal(state, name, Deal::Shuffled)
    }

    /// Seat the second player and start the game with the given deal.
    pub fn join_with_deal(&self, state: &mut GameState, name: impl Into<String>, deal: Deal) -> Option<PlayerId> {
        if state.status != GameStatus::Waiting || state.player(PlayerId::GUEST).name.is_some() {
            return None;
        }
        state.player_mut(PlayerId::GUEST).name = Some(name.into());
        turn::start(state, &self.config, deal, self.clock());
        Some(PlayerId::GUEST)
    }

    /// Choices open to `player` right now.
    #[must_use]
    pub fn legal_choices(&self, state: &GameState, player: PlayerId) -> Vec<Choice> {
        match state.pending() {
            Some(pending) if pending.awaiting == player && !state.is_finished() => match pending.action_type {
                ActionType::Gift => vec![Choice::Take(0), Choice::Decline],
                _ => (0..pending.groups.len()).map(Choice::Take).collect(),
            },
            _ => Vec::new(),
        }
    }

    /// Rebuild a shuffled game from its seed and history.
    pub fn replay(
        &self,
        id: GameId,
        seed: u64,
        host_name: impl Into<String>,
        guest_name: impl Into<String>,
        history: &[HistoryEntry],
    ) -> Result<GameState> {
        let mut state = self.new_game(id, seed, host_name);
        if self.join(&mut state, guest_name).is_none() {
            return Err(ActionError::GameNotStarted);
        }
        for entry in history {
            match entry {
                HistoryEntry::Action { player, action } => self.apply_action(&mut state, *player, action)?,
                HistoryEntry::Choice { player, choice } => self.resolve_choice(&mut state, *player, *choice)?,
            }
        }
        Ok(state)
    }
}

impl RulesEngine for Hanamikoji {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        validator::legal_actions(state, player)
    }

    fn submit_action(&self, state: &mut GameState, player: PlayerId, request: &ActionRequest) -> Result<()> {
        let action = validator::validate(state, player, request).map_err(|err| {
            debug!("{}: rejected {} from {}: {}", state.id, request.action_type, player, err);
            err
        })?;

        match resolver::apply_action(state, player, &action, self.clock()) {
            resolver::Resolution::Completed => turn::advance(state, &self.config, player, self.clock()),
            resolver::Resolution::Pending => {}
        }
        Ok(())
    }

    fn resolve_choice(&self, state: &mut GameState, player: PlayerId, choice: Choice) -> Result<()> {
        validator::validate_choice(state, player, choice).map_err(|err| {
            debug!("{}: rejected {:?} from {}: {}", state.id, choice, player, err);
            err
        })?;

        let settled = resolver::apply_choice(state, player, choice, self.clock());
        victory::recompute_favor(state);

        match victory::check_victory(state, &self.config, settled.initiator) {
            Some(winner) => victory::finish(state, GameResult::Winner(winner), self.clock()),
            None => turn::advance(state, &self.config, settled.initiator, self.clock()),
        }
        Ok(())
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.result
    }
}
