//! Favor and victory evaluation.
//!
//! Favor is recomputed from scratch from the card instances every time, so
//! it is a pure function of the allocations and evaluating it twice changes
//! nothing.

use log::info;
use rustc_hash::FxHashMap;

use super::engine::GameResult;
use crate::cards::GeishaId;
use crate::core::config::RulesConfig;
use crate::core::message::{Clock, MessageKind, NewMessage};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::{Favor, GameState, GameStatus, Phase};

/// Favor of every geisha, in `state.geishas` order, from the allocations.
///
/// A geisha favors the player with strictly more cards allocated to her;
/// equal counts (including none) leave her neutral.
#[must_use]
pub fn compute_favor(state: &GameState) -> Vec<Favor> {
    let mut counts: FxHashMap<GeishaId, PlayerMap<usize>> = FxHashMap::default();
    for card in &state.cards {
        if let Some(owner) = card.allocated_owner() {
            counts.entry(card.geisha).or_insert_with(PlayerMap::with_default)[owner] += 1;
        }
    }

    state
        .geishas
        .iter()
        .map(|geisha| match counts.get(&geisha.id) {
            Some(count) => {
                let (host, guest) = (count[PlayerId::HOST], count[PlayerId::GUEST]);
                if host > guest {
                    Favor::Player(PlayerId::HOST)
                } else if guest > host {
                    Favor::Player(PlayerId::GUEST)
                } else {
                    Favor::Neutral
                }
            }
            None => Favor::Neutral,
        })
        .collect()
}

/// Overwrite every geisha's favor with the recomputed value.
pub fn recompute_favor(state: &mut GameState) {
    let favor = compute_favor(state);
    for (geisha, favor) in state.geishas.iter_mut().zip(favor) {
        geisha.favor = favor;
    }
}

/// Whether `player` has reached either victory threshold.
#[must_use]
pub fn meets_threshold(state: &GameState, config: &RulesConfig, player: PlayerId) -> bool {
    state.favored_count(player) >= config.geishas_to_win || state.score(player) >= config.charm_to_win
}

/// The winner, if any. `actor` is checked first, so they win a simultaneous
/// crossing.
#[must_use]
pub fn check_victory(state: &GameState, config: &RulesConfig, actor: PlayerId) -> Option<PlayerId> {
    [actor, actor.opponent()]
        .into_iter()
        .find(|&p| meets_threshold(state, config, p))
}

/// Both players have spent every action.
#[must_use]
pub fn is_exhausted(state: &GameState) -> bool {
    state.players.iter().all(|(_, p)| p.is_exhausted())
}

/// End the game and append the terminal message.
pub fn finish(state: &mut GameState, result: GameResult, clock: &dyn Clock) {
    assert!(!state.is_finished(), "{} finished twice", state.id);

    let message = match result {
        GameResult::Winner(winner) => {
            let name = seat_name(state, winner);
            NewMessage::new(MessageKind::GameEvent, format!("{} wins the game", name))
                .actor(winner)
                .detail(format!(
                    "{} geishas, {} charm",
                    state.favored_count(winner),
                    state.score(winner)
                ))
        }
        GameResult::Draw => NewMessage::new(
            MessageKind::GameEvent,
            "Nobody can win any more: the game is a draw",
        ),
    };

    info!("{}: finished after round {} with {:?}", state.id, state.round, result);

    state.status = GameStatus::Finished;
    state.phase = Phase::Complete;
    state.result = Some(result);
    state.messages.push(message, clock);
}

/// Display name for a seat: the bound name, else "Player N".
pub(crate) fn seat_name(state: &GameState, player: PlayerId) -> String {
    state
        .player(player)
        .name
        .clone()
        .unwrap_or_else(|| player.to_string())
}
