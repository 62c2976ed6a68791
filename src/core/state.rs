//! Authoritative game state.
//!
//! `GameState` holds everything, including both hands and every hidden
//! card. It must never be handed to a player directly; use
//! `GameSnapshot::for_viewer` to project it.
//!
//! The outstanding Gift/Compete decision is part of the state
//! (`Phase::AwaitingChoice`), so a state restored with `from_bytes` knows
//! exactly who owes a decision.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{ActionType, HistoryEntry};
use super::message::MessageLog;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{CardId, CardInstance, CardRegistry, CardStatus, GeishaId};
use crate::rules::GameResult;

/// Identifier for a game hosted by a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "game-{}", self.0)
    }
}

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created, waiting for the second player.
    Waiting,
    Playing,
    Finished,
}

/// Which player a geisha currently favors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Favor {
    #[default]
    Neutral,
    Player(PlayerId),
}

/// Per-game geisha record. Only `favor` changes during a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeishaState {
    pub id: GeishaId,
    pub charm: u32,
    pub favor: Favor,
}

/// A card group in a pending decision.
pub type CardGroup = SmallVec<[CardId; 3]>;

/// A Gift or Compete waiting on the opponent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    pub initiator: PlayerId,
    pub action_type: ActionType,
    /// Gift: one group of three. Compete: two groups of two.
    pub groups: Vec<CardGroup>,
    pub awaiting: PlayerId,
}

/// Where the game is in its state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No seats bound yet, or only the host.
    Setup,
    /// The player must submit an action.
    AwaitingAction(PlayerId),
    /// The awaited player must answer a Gift or Compete.
    AwaitingChoice(PendingDecision),
    /// The game is finished.
    Complete,
}

/// Everything known about one seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// `None` until the seat is bound.
    pub name: Option<String>,

    pub hand: Vec<CardId>,

    /// Actions spent, in the order they were taken.
    pub used_actions: SmallVec<[ActionType; 4]>,

    /// Cards placed on this player's side, per geisha, in placement order.
    pub allocated: BTreeMap<GeishaId, Vec<CardId>>,

    pub secret: Vec<CardId>,

    pub discarded: Vec<CardId>,
}

impl PlayerState {
    #[must_use]
    pub fn has_used(&self, action: ActionType) -> bool {
        self.used_actions.contains(&action)
    }

    /// Record an action as spent.
    ///
    /// Panics if it was already spent; the validator must have caught that.
    pub fn mark_used(&mut self, action: ActionType) {
        assert!(!self.has_used(action), "{} recorded twice", action);
        self.used_actions.push(action);
    }

    /// Whether all four actions are spent.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.used_actions.len() == ActionType::ALL.len()
    }

    /// Action types not yet spent, in presentation order.
    pub fn remaining_actions(&self) -> impl Iterator<Item = ActionType> + '_ {
        ActionType::ALL.into_iter().filter(move |a| !self.has_used(*a))
    }

    /// Number of cards this player has allocated to `geisha`.
    #[must_use]
    pub fn allocated_count(&self, geisha: GeishaId) -> usize {
        self.allocated.get(&geisha).map_or(0, Vec::len)
    }

    /// Total allocated cards across all geishas.
    #[must_use]
    pub fn allocated_total(&self) -> usize {
        self.allocated.values().map(Vec::len).sum()
    }

    /// Remove a card from the hand. Returns false if it was not there.
    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// How many cards are in each status. Sums to the registry size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardCensus {
    pub in_deck: usize,
    pub in_hand: usize,
    /// Laid out in the pending decision.
    pub offered: usize,
    pub allocated: usize,
    pub secret: usize,
    pub discarded: usize,
    pub removed: usize,
}

impl CardCensus {
    #[must_use]
    pub fn total(&self) -> usize {
        self.in_deck + self.in_hand + self.offered + self.allocated + self.secret + self.discarded + self.removed
    }
}

/// Full game state including private information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub id: GameId,

    /// Seed for dealing; with `history` it reproduces the game.
    pub seed: u64,

    pub status: GameStatus,

    pub phase: Phase,

    /// Who took the very first turn. `round` advances each time the turn
    /// comes back to this player.
    pub first_player: PlayerId,

    /// Starts at 1.
    pub round: u32,

    pub players: PlayerMap<PlayerState>,

    /// Geishas in registry order.
    pub geishas: Vec<GeishaState>,

    /// Card instances, indexed by `CardId`.
    pub cards: Vec<CardInstance>,

    /// Draw pile; the front is drawn next.
    pub deck: Vector<CardId>,

    /// Cards set aside at setup.
    pub removed: Vec<CardId>,

    pub messages: MessageLog,

    /// Every accepted action and choice, in order. Private.
    pub history: Vector<HistoryEntry>,

    pub result: Option<GameResult>,
}

impl GameState {
    /// Create a game with only the host seat bound.
    ///
    /// All cards start in the deck in registry order; they are shuffled and
    /// dealt when the second player joins.
    #[must_use]
    pub fn new(id: GameId, seed: u64, registry: &CardRegistry, host_name: impl Into<String>) -> Self {
        let mut players: PlayerMap<PlayerState> = PlayerMap::with_default();
        players[PlayerId::HOST].name = Some(host_name.into());

        Self {
            id,
            seed,
            status: GameStatus::Waiting,
            phase: Phase::Setup,
            first_player: PlayerId::HOST,
            round: 1,
            players,
            geishas: registry
                .geishas()
                .map(|g| GeishaState {
                    id: g.id,
                    charm: g.charm,
                    favor: Favor::Neutral,
                })
                .collect(),
            cards: registry
                .cards()
                .map(|c| CardInstance::in_deck(c.id, c.geisha))
                .collect(),
            deck: registry.cards().map(|c| c.id).collect(),
            removed: Vec::new(),
            messages: MessageLog::new(),
            history: Vector::new(),
            result: None,
        }
    }

    // === Lookup ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardInstance> {
        self.cards.get(id.raw() as usize)
    }

    /// Mutable card access. Panics on an unknown id; callers pass validated ids.
    pub fn card_mut(&mut self, id: CardId) -> &mut CardInstance {
        match self.cards.get_mut(id.raw() as usize) {
            Some(card) => card,
            None => panic!("{} is not part of this game", id),
        }
    }

    #[must_use]
    pub fn geisha(&self, id: GeishaId) -> Option<&GeishaState> {
        self.geishas.iter().find(|g| g.id == id)
    }

    #[must_use]
    pub fn favor(&self, id: GeishaId) -> Favor {
        self.geisha(id).map(|g| g.favor).unwrap_or_default()
    }

    // === Turn ===

    /// The player whose turn it is. During a pending choice this is still
    /// the player who made the Gift or Compete.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        match &self.phase {
            Phase::AwaitingAction(player) => Some(*player),
            Phase::AwaitingChoice(pending) => Some(pending.initiator),
            Phase::Setup | Phase::Complete => None,
        }
    }

    #[must_use]
    pub fn is_my_turn(&self, player: PlayerId) -> bool {
        self.current_player() == Some(player)
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingDecision> {
        match &self.phase {
            Phase::AwaitingChoice(pending) => Some(pending),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.result {
            Some(GameResult::Winner(player)) => Some(player),
            _ => None,
        }
    }

    // === Scoring ===

    /// Geishas favoring `player`.
    #[must_use]
    pub fn favored_count(&self, player: PlayerId) -> usize {
        self.geishas
            .iter()
            .filter(|g| g.favor == Favor::Player(player))
            .count()
    }

    /// Combined charm of geishas favoring `player`.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.geishas
            .iter()
            .filter(|g| g.favor == Favor::Player(player))
            .map(|g| g.charm)
            .sum()
    }

    // === Deck ===

    /// Move the top card of the deck into `player`'s hand.
    pub fn draw(&mut self, player: PlayerId) -> Option<CardId> {
        let card = self.deck.pop_front()?;
        self.card_mut(card).deal_to(player);
        self.players[player].hand.push(card);
        Some(card)
    }

    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    /// Count cards per status.
    #[must_use]
    pub fn census(&self) -> CardCensus {
        let mut census = CardCensus::default();
        for card in &self.cards {
            match card.status {
                CardStatus::InDeck => census.in_deck += 1,
                CardStatus::InHand => census.in_hand += 1,
                CardStatus::Offered => census.offered += 1,
                CardStatus::Allocated => census.allocated += 1,
                CardStatus::Secret => census.secret += 1,
                CardStatus::Discarded => census.discarded += 1,
                CardStatus::Removed => census.removed += 1,
            }
        }
        census
    }

    // === Persistence ===

    /// Encode the full state for durable storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a state written by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
