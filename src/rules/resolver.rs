//! Applying validated actions and choices to the state.
//!
//! The resolver trusts its input: callers run the validator first. Anything
//! that goes wrong here is a broken invariant and panics.

use log::info;
use smallvec::SmallVec;

use super::victory::seat_name;
use crate::cards::CardId;
use crate::core::action::{Action, ActionType, Choice, HistoryEntry};
use crate::core::message::{Clock, MessageKind, NewMessage};
use crate::core::player::PlayerId;
use crate::core::state::{CardGroup, GameState, PendingDecision, Phase};

/// What applying an action left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The action is fully applied.
    Completed,
    /// A Gift or Compete now waits on the opponent.
    Pending,
}

/// Apply a validated action for `player`.
///
/// The action is marked used and its cards leave the hand immediately.
/// Secret and Discard complete at once; Gift and Compete lay their cards out
/// as `Offered` and move the game to `Phase::AwaitingChoice`.
pub fn apply_action(state: &mut GameState, player: PlayerId, action: &Action, clock: &dyn Clock) -> Resolution {
    let action_type = action.action_type();
    let cards = action.cards();

    {
        let me = state.player_mut(player);
        me.mark_used(action_type);
        for &card in &cards {
            assert!(me.remove_from_hand(card), "{} is not in {}'s hand", card, player);
        }
    }
    state.history.push_back(HistoryEntry::Action {
        player,
        action: action.clone(),
    });

    let name = seat_name(state, player);
    info!("{}: {} used {} with {} cards", state.id, player, action_type, cards.len());

    match action {
        Action::Secret { card } => {
            state.card_mut(*card).keep_secret();
            state.player_mut(player).secret.push(*card);
            state.messages.push(
                NewMessage::new(MessageKind::PlayerAction, format!("{} kept a card secret", name))
                    .actor(player)
                    .action(action_type)
                    .detail("1 card"),
                clock,
            );
            Resolution::Completed
        }
        Action::Discard { cards } => {
            for &card in cards {
                state.card_mut(card).discard();
            }
            state.player_mut(player).discarded.extend_from_slice(cards);
            state.messages.push(
                NewMessage::new(MessageKind::PlayerAction, format!("{} discarded two cards", name))
                    .actor(player)
                    .action(action_type)
                    .detail("2 cards"),
                clock,
            );
            Resolution::Completed
        }
        Action::Gift { cards } => {
            open_decision(state, player, action_type, vec![SmallVec::from_slice(&cards[..])]);
            state.messages.push(
                NewMessage::new(MessageKind::PlayerAction, format!("{} offers a gift", name))
                    .actor(player)
                    .action(action_type)
                    .detail(format!("3 cards: {}", describe(state, cards))),
                clock,
            );
            Resolution::Pending
        }
        Action::Compete { groups } => {
            open_decision(
                state,
                player,
                action_type,
                groups.iter().map(|g| SmallVec::from_slice(&g[..])).collect(),
            );
            state.messages.push(
                NewMessage::new(MessageKind::PlayerAction, format!("{} calls a competition", name))
                    .actor(player)
                    .action(action_type)
                    .detail(format!(
                        "4 cards: [{}] or [{}]",
                        describe(state, &groups[0]),
                        describe(state, &groups[1])
                    )),
                clock,
            );
            Resolution::Pending
        }
    }
}

/// Settle the pending decision with a validated choice and return it.
///
/// Leaves the phase as `AwaitingAction(initiator)`; the turn controller
/// moves it on.
pub fn apply_choice(state: &mut GameState, player: PlayerId, choice: Choice, clock: &dyn Clock) -> PendingDecision {
    let pending = match std::mem::replace(&mut state.phase, Phase::Setup) {
        Phase::AwaitingChoice(pending) => pending,
        other => panic!("{}: choice applied in phase {:?}", state.id, other),
    };
    state.phase = Phase::AwaitingAction(pending.initiator);

    let responder = pending.awaiting;
    let initiator = pending.initiator;
    debug_assert_eq!(player, responder);

    let (taken, left): (CardGroup, CardGroup) = match (pending.action_type, choice) {
        (ActionType::Gift, Choice::Take(_)) => (pending.groups[0].clone(), CardGroup::new()),
        (ActionType::Gift, Choice::Decline) => (CardGroup::new(), pending.groups[0].clone()),
        (ActionType::Compete, Choice::Take(index)) => {
            (pending.groups[index].clone(), pending.groups[1 - index].clone())
        }
        (action_type, choice) => panic!("{:?} cannot settle a {}", choice, action_type),
    };

    for &card in &taken {
        allocate(state, card, responder);
    }
    for &card in &left {
        allocate(state, card, initiator);
    }

    state.history.push_back(HistoryEntry::Choice { player, choice });

    let name = seat_name(state, responder);
    let text = match (pending.action_type, choice) {
        (ActionType::Gift, Choice::Take(_)) => format!("{} accepted the gift", name),
        (ActionType::Gift, Choice::Decline) => format!("{} declined the gift", name),
        (_, Choice::Take(index)) => format!("{} took group {}", name, index + 1),
        (_, Choice::Decline) => format!("{} declined", name),
    };
    info!("{}: {}", state.id, text);
    state.messages.push(
        NewMessage::new(MessageKind::Info, text)
            .actor(responder)
            .action(pending.action_type)
            .detail(format!("{} to {}, {} to {}", taken.len(), responder, left.len(), initiator)),
        clock,
    );

    pending
}

fn open_decision(state: &mut GameState, initiator: PlayerId, action_type: ActionType, groups: Vec<CardGroup>) {
    for &card in groups.iter().flatten() {
        state.card_mut(card).offer();
    }
    state.phase = Phase::AwaitingChoice(PendingDecision {
        initiator,
        action_type,
        groups,
        awaiting: initiator.opponent(),
    });
}

/// Place a card on `owner`'s side of its geisha.
fn allocate(state: &mut GameState, card: CardId, owner: PlayerId) {
    let instance = state.card_mut(card);
    instance.allocate_to(owner);
    let geisha = instance.geisha;
    state.player_mut(owner).allocated.entry(geisha).or_default().push(card);
}

/// Geisha ids of openly offered cards, for the public feed.
fn describe(state: &GameState, cards: &[CardId]) -> String {
    cards
        .iter()
        .filter_map(|&c| state.card(c))
        .map(|c| c.geisha.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
