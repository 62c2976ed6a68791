//! Error types.
//!
//! Every `ActionError` is caller-correctable: the game is untouched and the
//! caller may retry with a corrected request. Broken engine invariants are
//! not represented here; they panic.

use serde::Serialize;
use thiserror::Error;

use super::action::ActionType;
use super::player::PlayerId;
use crate::cards::CardId;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ActionError>;

/// Why an action or choice was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
pub enum ActionError {
    /// The player already spent this action type in this game.
    #[error("{0} action already used")]
    ActionAlreadyUsed(ActionType),

    /// A card id is unknown, not in the player's hand, or listed twice.
    #[error("{0} is not a card in your hand")]
    InvalidCardReference(CardId),

    /// The action takes exactly `expected` cards.
    #[error("{action} takes exactly {expected} cards, got {got}")]
    WrongCardCount {
        action: ActionType,
        expected: usize,
        got: usize,
    },

    /// Groupings do not partition the selected cards as the action requires.
    #[error("invalid grouping: {0}")]
    InvalidGrouping(&'static str),

    /// Someone other than the expected player tried to act.
    #[error("not your turn: waiting on {expected}")]
    NotYourTurn { expected: PlayerId },

    /// A choice was submitted with no Gift or Compete outstanding.
    #[error("no pending choice")]
    NoPendingChoice,

    /// The game is over.
    #[error("game already finished")]
    GameAlreadyFinished,

    /// Both seats are not bound yet.
    #[error("game has not started")]
    GameNotStarted,

    /// An action was submitted while a Gift or Compete awaits an answer.
    #[error("waiting on {awaiting} to choose")]
    ChoicePending { awaiting: PlayerId },

    /// The choice does not fit the pending decision.
    #[error("invalid choice: {0}")]
    InvalidChoice(&'static str),
}

/// Why a `RulesConfig` was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("deck of {available} cards cannot deal {needed}")]
    DeckTooSmall { available: usize, needed: usize },

    #[error("{0} threshold must be positive")]
    ZeroThreshold(&'static str),
}
