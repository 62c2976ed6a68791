//! # hanamikoji-engine
//!
//! Rules engine for a two-player, hidden-information card game in the style
//! of Hanamikoji. Players take turns spending four single-use actions
//! (Secret, Discard, Gift, Compete) to place cards in front of seven geishas,
//! racing to win four geishas or eleven points of charm.
//!
//! ## Design Principles
//!
//! 1. **Authoritative state, projected views**: `GameState` holds every card,
//!    hidden or not. Players only ever receive a `GameSnapshot` built for
//!    them.
//!
//! 2. **Atomic transitions**: each submission is validated, resolved,
//!    evaluated for victory and turned over as one step. A rejected
//!    submission changes nothing.
//!
//! 3. **Deterministic**: deals come from a seeded ChaCha RNG and message
//!    timestamps from a `Clock`, so a seed plus the action history replays a
//!    game exactly.
//!
//! ## Modules
//!
//! - `core`: seats, actions, errors, configuration, state, views, messages
//! - `cards`: geisha and card definitions, the shared catalog
//! - `rules`: validator, resolver, victory, turn control, `RulesEngine`
//! - `table`: hosts many games behind per-game locks
//!
//! ## Example
//!
//! ```
//! use hanamikoji_engine::{GameTable, PlayerId};
//!
//! let table = GameTable::default();
//! let game = table.create_game("Aiko", 7);
//! let (seat, view) = table.join_game(game, "Ren").unwrap();
//!
//! assert_eq!(seat, PlayerId::GUEST);
//! assert_eq!(view.me().hand.count(), 6);
//! assert_eq!(view.opponent().hand.count(), 7);
//! assert!(view.opponent().hand.is_hidden());
//! ```

pub mod core;
pub mod cards;
pub mod rules;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, GameRng,
    RulesConfig, FirstPlayer,
    Action, ActionRequest, ActionType, Choice,
    ActionError, ConfigError,
    Clock, SystemClock, FixedClock, GameMessage, MessageKind,
    GameId, GameState, GameStatus, Favor, Phase, PendingDecision,
    GameSnapshot, CardsView, PlayerView,
};

pub use crate::cards::{CardId, GeishaId, CardDefinition, GeishaDefinition, CardInstance, CardStatus, CardRegistry};

pub use crate::rules::{RulesEngine, GameResult, Hanamikoji, GameBuilder};

pub use crate::table::{GameTable, GameSummary, TableError};
