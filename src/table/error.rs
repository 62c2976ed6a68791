//! Error types for table operations.

use thiserror::Error;

use crate::core::error::ActionError;
use crate::core::player::PlayerId;
use crate::core::state::GameId;

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors that can occur while hosting games.
#[derive(Debug, Error)]
pub enum TableError {
    /// The engine rejected an action or choice.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// No game with this id is hosted here.
    #[error("Unknown game: {0}")]
    UnknownGame(GameId),

    /// The player id names no seat at the table.
    #[error("Unknown seat: {0:?}")]
    UnknownSeat(PlayerId),

    /// Both seats are already bound.
    #[error("Game is full: {0}")]
    GameFull(GameId),

    /// An imported game collides with a hosted one.
    #[error("Game already exists: {0}")]
    DuplicateGame(GameId),

    /// A game record could not be encoded or decoded.
    #[error("Persistence error: {0}")]
    Persistence(#[from] bincode::Error),
}

impl TableError {
    /// The engine rejection, if that is what this is.
    #[must_use]
    pub fn as_action(&self) -> Option<&ActionError> {
        match self {
            TableError::Action(err) => Some(err),
            _ => None,
        }
    }
}
