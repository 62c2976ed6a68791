//! Card instances - per-game card state.
//!
//! `CardInstance` tracks where one physical card is during a game and whose
//! it is. Status only ever moves forward:
//!
//! ```text
//! InDeck ──> InHand ──> Offered ──> Allocated
//!    │          └─────> Secret | Discarded
//!    └─────> Removed
//! ```
//!
//! A backwards or sideways transition is a bug in the engine, not a player
//! error, so the transition methods panic instead of returning errors.

use serde::{Deserialize, Serialize};

use super::definition::{CardId, GeishaId};
use crate::core::player::PlayerId;

/// Where a card currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    /// Face-down in the draw pile.
    InDeck,
    /// In a player's hand.
    InHand,
    /// Laid out in a Gift or Compete that waits on the opponent.
    Offered,
    /// Placed in front of a geisha on a player's side.
    Allocated,
    /// Kept aside by the Secret action; never scored.
    Secret,
    /// Removed by the Discard action.
    Discarded,
    /// Set aside unseen at the start of the game.
    Removed,
}

impl CardStatus {
    /// Whether this card has left play for good without scoring.
    #[must_use]
    pub const fn is_out_of_play(self) -> bool {
        matches!(self, CardStatus::Secret | CardStatus::Discarded | CardStatus::Removed)
    }
}

/// A card in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: CardId,

    /// Copied from the definition so favor can be computed without a registry.
    pub geisha: GeishaId,

    pub status: CardStatus,

    /// Holder while in hand; the player credited once allocated, secret or
    /// discarded. `None` while in the deck or removed.
    pub owner: Option<PlayerId>,
}

impl CardInstance {
    /// Create a card sitting in the deck.
    #[must_use]
    pub fn in_deck(id: CardId, geisha: GeishaId) -> Self {
        Self {
            id,
            geisha,
            status: CardStatus::InDeck,
            owner: None,
        }
    }

    /// Deck -> hand.
    pub fn deal_to(&mut self, player: PlayerId) {
        self.transition(CardStatus::InDeck, CardStatus::InHand);
        self.owner = Some(player);
    }

    /// Deck -> removed (set aside at setup).
    pub fn set_aside(&mut self) {
        self.transition(CardStatus::InDeck, CardStatus::Removed);
    }

    /// Hand -> offered in a pending decision. The offerer stays the owner.
    pub fn offer(&mut self) {
        self.transition(CardStatus::InHand, CardStatus::Offered);
    }

    /// Offered -> allocated in favor of `player`.
    ///
    /// `player` may differ from the holder: gifts and competitions hand cards
    /// to the opponent.
    pub fn allocate_to(&mut self, player: PlayerId) {
        self.transition(CardStatus::Offered, CardStatus::Allocated);
        self.owner = Some(player);
    }

    /// Hand -> secret.
    pub fn keep_secret(&mut self) {
        self.transition(CardStatus::InHand, CardStatus::Secret);
    }

    /// Hand -> discarded.
    pub fn discard(&mut self) {
        self.transition(CardStatus::InHand, CardStatus::Discarded);
    }

    /// Whether this card is in `player`'s hand.
    #[must_use]
    pub fn is_in_hand_of(&self, player: PlayerId) -> bool {
        self.status == CardStatus::InHand && self.owner == Some(player)
    }

    /// The player this allocated card counts for.
    ///
    /// Panics if an allocated card has no owner.
    #[must_use]
    pub fn allocated_owner(&self) -> Option<PlayerId> {
        if self.status != CardStatus::Allocated {
            return None;
        }
        match self.owner {
            Some(owner) => Some(owner),
            None => panic!("{} is allocated to no player", self.id),
        }
    }

    fn transition(&mut self, from: CardStatus, to: CardStatus) {
        assert_eq!(
            self.status, from,
            "{} cannot move to {:?} from {:?}",
            self.id, to, self.status
        );
        self.status = to;
    }
}
