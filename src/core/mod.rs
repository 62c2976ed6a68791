//! Core engine types: seats, actions, errors, configuration, state, views.
//!
//! Everything here is plain data. The rules that move a `GameState` from one
//! phase to the next live in `crate::rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod message;
pub mod state;
pub mod view;

pub use player::{PlayerId, PlayerMap, SEATS};
pub use rng::GameRng;
pub use config::{FirstPlayer, RulesConfig};
pub use action::{Action, ActionRequest, ActionType, CardList, Choice, HistoryEntry};
pub use error::{ActionError, ConfigError};
pub use message::{Clock, FixedClock, GameMessage, MessageKind, MessageLog, NewMessage, SystemClock};
pub use state::{
    CardCensus, CardGroup, Favor, GameId, GameState, GameStatus, GeishaState, PendingDecision, Phase,
    PlayerState,
};
pub use view::{AllocationView, CardView, CardsView, GameSnapshot, GeishaView, PendingView, PlayerView};
