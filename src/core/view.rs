//! Per-viewer projection of a game.
//!
//! A `GameSnapshot` contains only what its viewer may know:
//!
//! - PUBLIC: geishas and favor, allocated cards on both sides, used
//!   actions, the groups of an open Gift/Compete, counts of every hidden pile
//! - PRIVATE: the viewer's own hand, secret and discarded cards
//! - HIDDEN until the game ends: the opponent's hand, secret and discarded
//!   cards, the deck and the card set aside at setup
//!
//! Snapshots are the only game data handed to players.

use serde::{Deserialize, Serialize};

use super::action::ActionType;
use super::player::PlayerId;
use super::state::{Favor, GameId, GameState, GameStatus, PlayerState};
use crate::cards::{CardId, CardRegistry, GeishaId};
use crate::rules::GameResult;

/// A card as shown to a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub geisha: GeishaId,
    pub item_name: String,
}

/// A pile the viewer may or may not see into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardsView {
    Visible(Vec<CardView>),
    Hidden { count: usize },
}

impl CardsView {
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            CardsView::Visible(cards) => cards.len(),
            CardsView::Hidden { count } => *count,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, CardsView::Hidden { .. })
    }

    /// Card ids if visible.
    #[must_use]
    pub fn ids(&self) -> Option<Vec<CardId>> {
        match self {
            CardsView::Visible(cards) => Some(cards.iter().map(|c| c.id).collect()),
            CardsView::Hidden { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeishaView {
    pub id: GeishaId,
    pub name: String,
    pub charm: u32,
    pub gift_item: String,
    pub favor: Favor,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationView {
    pub geisha: GeishaId,
    pub cards: Vec<CardView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: Option<String>,
    pub is_my_turn: bool,
    pub hand: CardsView,
    pub used_actions: Vec<ActionType>,
    pub allocated: Vec<AllocationView>,
    pub secret: CardsView,
    pub discarded: CardsView,
    pub favored_geishas: usize,
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingView {
    pub initiator: PlayerId,
    pub action_type: ActionType,
    pub groups: Vec<Vec<CardView>>,
    pub awaiting: PlayerId,
}

/// What one player may see of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub viewer: PlayerId,
    pub status: GameStatus,
    pub round: u32,
    pub current_player: Option<PlayerId>,
    pub geishas: Vec<GeishaView>,
    /// Seat order: host first.
    pub players: Vec<PlayerView>,
    pub pending: Option<PendingView>,
    pub deck: CardsView,
    pub removed: CardsView,
    pub result: Option<GameResult>,
    /// Length of the message feed at the time of the snapshot.
    pub message_count: usize,
}

impl GameSnapshot {
    /// Project `state` for `viewer`.
    #[must_use]
    pub fn for_viewer(state: &GameState, registry: &CardRegistry, viewer: PlayerId) -> Self {
        let reveal_all = state.is_finished();
        let show = |ids: &[CardId]| -> Vec<CardView> {
            ids.iter().map(|&id| card_view(registry, id)).collect()
        };
        let pile = |ids: &[CardId], visible: bool| -> CardsView {
            if visible {
                CardsView::Visible(show(ids))
            } else {
                CardsView::Hidden { count: ids.len() }
            }
        };

        let players = state
            .players
            .iter()
            .map(|(id, player)| {
                let visible = reveal_all || id == viewer;
                player_view(state, registry, id, player, visible, &pile)
            })
            .collect();

        let deck: Vec<CardId> = state.deck.iter().copied().collect();

        Self {
            game_id: state.id,
            viewer,
            status: state.status,
            round: state.round,
            current_player: state.current_player(),
            geishas: state
                .geishas
                .iter()
                .map(|g| {
                    let def = registry.geisha(g.id);
                    GeishaView {
                        id: g.id,
                        name: def.map(|d| d.name.clone()).unwrap_or_default(),
                        charm: g.charm,
                        gift_item: def.map(|d| d.gift_item.clone()).unwrap_or_default(),
                        favor: g.favor,
                    }
                })
                .collect(),
            players,
            pending: state.pending().map(|p| PendingView {
                initiator: p.initiator,
                action_type: p.action_type,
                groups: p.groups.iter().map(|g| show(g.as_slice())).collect(),
                awaiting: p.awaiting,
            }),
            deck: pile(deck.as_slice(), reveal_all),
            removed: pile(state.removed.as_slice(), reveal_all),
            result: state.result.clone(),
            message_count: state.messages.len(),
        }
    }

    /// The viewer's own seat.
    #[must_use]
    pub fn me(&self) -> &PlayerView {
        &self.players[self.viewer.index()]
    }

    /// The other seat.
    #[must_use]
    pub fn opponent(&self) -> &PlayerView {
        &self.players[self.viewer.opponent().index()]
    }

    /// Structured encoding for transports.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn card_view(registry: &CardRegistry, id: CardId) -> CardView {
    match registry.card(id) {
        Some(def) => CardView {
            id,
            geisha: def.geisha,
            item_name: def.item_name.clone(),
        },
        None => panic!("{} is not in the registry", id),
    }
}

fn player_view(
    state: &GameState,
    registry: &CardRegistry,
    id: PlayerId,
    player: &PlayerState,
    visible: bool,
    pile: &dyn Fn(&[CardId], bool) -> CardsView,
) -> PlayerView {
    PlayerView {
        id,
        name: player.name.clone(),
        is_my_turn: state.is_my_turn(id),
        hand: pile(player.hand.as_slice(), visible),
        used_actions: player.used_actions.to_vec(),
        allocated: player
            .allocated
            .iter()
            .map(|(&geisha, cards)| AllocationView {
                geisha,
                cards: cards.iter().map(|&c| card_view(registry, c)).collect(),
            })
            .collect(),
        secret: pile(player.secret.as_slice(), visible),
        discarded: pile(player.discarded.as_slice(), visible),
        favored_geishas: state.favored_count(id),
        score: state.score(id),
    }
}
