//! Action representation.
//!
//! Hosts submit an untyped `ActionRequest` (action type, card ids, optional
//! groupings), which is what arrives over the wire. The validator turns a
//! legal request into an `Action`, a sum type with one variant per action
//! shape, so the resolver can match on it exhaustively.
//!
//! The opponent answers a Gift or Compete with a `Choice`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::CardId;

/// The four single-use actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Secret,
    Discard,
    Gift,
    Compete,
}

impl ActionType {
    /// All action types in the order they are usually presented.
    pub const ALL: [ActionType; 4] = [
        ActionType::Secret,
        ActionType::Discard,
        ActionType::Gift,
        ActionType::Compete,
    ];

    /// Exact number of cards the action consumes.
    #[must_use]
    pub const fn card_count(self) -> usize {
        match self {
            ActionType::Secret => 1,
            ActionType::Discard => 2,
            ActionType::Gift => 3,
            ActionType::Compete => 4,
        }
    }

    /// Whether the opponent must answer before the action completes.
    #[must_use]
    pub const fn needs_choice(self) -> bool {
        matches!(self, ActionType::Gift | ActionType::Compete)
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ActionType::Secret => "Secret",
            ActionType::Discard => "Discard",
            ActionType::Gift => "Gift",
            ActionType::Compete => "Compete",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A card list as submitted by a host.
pub type CardList = SmallVec<[CardId; 4]>;

/// An action as submitted, before validation.
///
/// ## Example
///
/// ```
/// use hanamikoji_engine::cards::CardId;
/// use hanamikoji_engine::core::{ActionRequest, ActionType};
///
/// let c = |n| CardId::new(n);
/// let compete = ActionRequest::compete([[c(1), c(2)], [c(3), c(4)]]);
///
/// assert_eq!(compete.action_type, ActionType::Compete);
/// assert_eq!(compete.card_ids.len(), 4);
/// assert_eq!(compete.groupings.as_ref().map(Vec::len), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action_type: ActionType,

    pub card_ids: CardList,

    /// How the acting player splits the cards. Required for Compete, optional
    /// for Gift, must be absent or empty otherwise. An empty list counts as
    /// absent for Secret and Discard, but a Gift's list, when given, must hold
    /// its one group.
    #[serde(default)]
    pub groupings: Option<Vec<CardList>>,
}

impl ActionRequest {
    /// Create a request without groupings.
    #[must_use]
    pub fn new(action_type: ActionType, card_ids: &[CardId]) -> Self {
        Self {
            action_type,
            card_ids: SmallVec::from_slice(card_ids),
            groupings: None,
        }
    }

    /// Attach groupings (builder pattern).
    #[must_use]
    pub fn with_groupings(mut self, groupings: &[&[CardId]]) -> Self {
        self.groupings = Some(groupings.iter().map(|g| SmallVec::from_slice(g)).collect());
        self
    }

    #[must_use]
    pub fn secret(card: CardId) -> Self {
        Self::new(ActionType::Secret, &[card])
    }

    #[must_use]
    pub fn discard(cards: [CardId; 2]) -> Self {
        Self::new(ActionType::Discard, &cards)
    }

    #[must_use]
    pub fn gift(cards: [CardId; 3]) -> Self {
        Self::new(ActionType::Gift, &cards)
    }

    #[must_use]
    pub fn compete(groups: [[CardId; 2]; 2]) -> Self {
        let [a, b] = groups;
        Self::new(ActionType::Compete, &[a[0], a[1], b[0], b[1]]).with_groupings(&[&a, &b])
    }
}

/// A validated action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Keep one card hidden until the end of the game.
    Secret { card: CardId },
    /// Remove two cards from play.
    Discard { cards: [CardId; 2] },
    /// Offer three cards; the opponent takes all or none.
    Gift { cards: [CardId; 3] },
    /// Offer two pairs; the opponent takes one pair.
    Compete { groups: [[CardId; 2]; 2] },
}

impl Action {
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Secret { .. } => ActionType::Secret,
            Action::Discard { .. } => ActionType::Discard,
            Action::Gift { .. } => ActionType::Gift,
            Action::Compete { .. } => ActionType::Compete,
        }
    }

    /// Every card the action consumes, in submission order.
    #[must_use]
    pub fn cards(&self) -> CardList {
        match self {
            Action::Secret { card } => SmallVec::from_slice(&[*card]),
            Action::Discard { cards } => SmallVec::from_slice(cards),
            Action::Gift { cards } => SmallVec::from_slice(cards),
            Action::Compete { groups } => groups.iter().flatten().copied().collect(),
        }
    }

    /// The request that validates to this action.
    #[must_use]
    pub fn to_request(&self) -> ActionRequest {
        match self {
            Action::Secret { card } => ActionRequest::secret(*card),
            Action::Discard { cards } => ActionRequest::discard(*cards),
            Action::Gift { cards } => ActionRequest::gift(*cards),
            Action::Compete { groups } => ActionRequest::compete(*groups),
        }
    }
}

/// The awaited player's answer to a Gift or Compete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// Take the group at this index (Gift: only index 0 exists).
    Take(usize),
    /// Refuse a Gift; all its cards go to the giver.
    Decline,
}

/// An entry in a game's private replay history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEntry {
    Action { player: PlayerId, action: Action },
    Choice { player: PlayerId, choice: Choice },
}
