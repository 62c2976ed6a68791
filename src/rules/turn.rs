//! Turn control: starting a game, dealing, and passing the turn.

use log::{debug, info};

use super::engine::GameResult;
use super::victory::{finish, is_exhausted, seat_name};
use crate::cards::CardId;
use crate::core::config::{FirstPlayer, RulesConfig};
use crate::core::message::{Clock, MessageKind, NewMessage};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::state::{GameState, GameStatus, Phase};

/// How the cards are distributed when a game starts.
#[derive(Clone, Debug, Default)]
pub enum Deal {
    /// Shuffle with the game seed.
    #[default]
    Shuffled,
    /// Fixed hands. The remaining cards, in id order, form the deck, with
    /// the last `removed_cards` of them set aside.
    Stacked(PlayerMap<Vec<CardId>>),
}

/// Move a game with both seats bound from `Waiting` to `Playing`.
pub fn start(state: &mut GameState, config: &RulesConfig, deal: Deal, clock: &dyn Clock) {
    assert_eq!(state.status, GameStatus::Waiting, "{} started twice", state.id);

    let rng = GameRng::new(state.seed);
    match deal {
        Deal::Shuffled => deal_shuffled(state, config, &mut rng.for_context("deal")),
        Deal::Stacked(hands) => deal_stacked(state, config, hands),
    }

    state.first_player = match config.first_player {
        FirstPlayer::Host => PlayerId::HOST,
        FirstPlayer::Random => {
            if rng.for_context("first-player").gen_bool(0.5) {
                PlayerId::GUEST
            } else {
                PlayerId::HOST
            }
        }
    };
    state.status = GameStatus::Playing;
    state.round = 1;

    info!(
        "{}: started, {} cards dealt, {} in the deck, {} goes first",
        state.id,
        config.hand_size * 2,
        state.deck_size(),
        state.first_player
    );
    let text = format!(
        "{} and {} sit down; {} goes first",
        seat_name(state, PlayerId::HOST),
        seat_name(state, PlayerId::GUEST),
        seat_name(state, state.first_player)
    );
    state.messages.push(NewMessage::new(MessageKind::System, text), clock);

    let first = state.first_player;
    begin_turn(state, config, first, clock);
}

/// Pass the turn after `actor` finished an action that did not end the game.
///
/// Ends the game in a draw when every action is spent, or when the incoming
/// player holds too few cards for any action they have left.
pub fn advance(state: &mut GameState, config: &RulesConfig, actor: PlayerId, clock: &dyn Clock) {
    if is_exhausted(state) {
        finish(state, GameResult::Draw, clock);
        return;
    }

    let next = actor.opponent();
    if next == state.first_player {
        state.round += 1;
    }
    begin_turn(state, config, next, clock);

    if !can_act(state, next) {
        debug!("{}: {} has no playable action left", state.id, next);
        finish(state, GameResult::Draw, clock);
    }
}

/// Whether `player` could take any of their remaining actions.
#[must_use]
pub fn can_act(state: &GameState, player: PlayerId) -> bool {
    let me = state.player(player);
    me.remaining_actions().any(|a| a.card_count() <= me.hand.len())
}

fn begin_turn(state: &mut GameState, config: &RulesConfig, player: PlayerId, clock: &dyn Clock) {
    state.phase = Phase::AwaitingAction(player);

    let drew = if config.draw_each_turn && !state.player(player).is_exhausted() {
        state.draw(player).is_some()
    } else {
        false
    };

    let name = seat_name(state, player);
    let mut message = NewMessage::new(
        MessageKind::Info,
        format!("Round {}: {}'s turn", state.round, name),
    )
    .actor(player);
    if drew {
        message = message.detail(format!("{} drew a card", name));
    }
    state.messages.push(message, clock);
}

fn deal_shuffled(state: &mut GameState, config: &RulesConfig, rng: &mut GameRng) {
    let mut order: Vec<CardId> = state.deck.iter().copied().collect();
    rng.shuffle(&mut order);

    // The tail is set aside, the head is dealt seat by seat.
    let removed = order.split_off(order.len() - config.removed_cards);
    let host_hand: Vec<CardId> = order.drain(..config.hand_size).collect();
    let guest_hand: Vec<CardId> = order.drain(..config.hand_size).collect();

    let mut hands = PlayerMap::with_default();
    hands[PlayerId::HOST] = host_hand;
    hands[PlayerId::GUEST] = guest_hand;
    place(state, hands, order, removed);
}

fn deal_stacked(state: &mut GameState, config: &RulesConfig, hands: PlayerMap<Vec<CardId>>) {
    for (seat, hand) in hands.iter() {
        for (i, card) in hand.iter().enumerate() {
            assert!(state.card(*card).is_some(), "{} is not part of this game", card);
            assert!(!hand[..i].contains(card), "{} dealt twice to {}", card, seat);
            assert!(!hands[seat.opponent()].contains(card), "{} dealt to both seats", card);
        }
    }

    let mut rest: Vec<CardId> = state
        .deck
        .iter()
        .copied()
        .filter(|c| hands.iter().all(|(_, h)| !h.contains(c)))
        .collect();
    rest.sort_unstable();
    let removed = rest.split_off(rest.len().saturating_sub(config.removed_cards));
    place(state, hands, rest, removed);
}

fn place(state: &mut GameState, hands: PlayerMap<Vec<CardId>>, deck: Vec<CardId>, removed: Vec<CardId>) {
    for &card in &removed {
        state.card_mut(card).set_aside();
    }
    for (seat, hand) in hands.iter() {
        for &card in hand {
            state.card_mut(card).deal_to(seat);
        }
    }
    for (seat, hand) in hands.iter() {
        state.player_mut(seat).hand = hand.clone();
    }
    state.deck = deck.into_iter().collect();
    state.removed = removed;
}
