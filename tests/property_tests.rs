//! Property tests: invariants that hold across random seeds and random play.

use std::sync::Arc;

use proptest::prelude::*;

use hanamikoji_engine::core::{ActionRequest, ActionType};
use hanamikoji_engine::rules::victory;
use hanamikoji_engine::{
    CardId, CardStatus, FixedClock, GameBuilder, GameState, Hanamikoji, PlayerId, RulesEngine,
};

fn new_game(seed: u64) -> (Hanamikoji, GameState) {
    GameBuilder::new()
        .clock(Arc::new(FixedClock(0)))
        .build(seed)
        .unwrap()
}

/// Take one step, picking options by `pick`. Returns false once the game is over.
fn step(engine: &Hanamikoji, state: &mut GameState, pick: usize) -> bool {
    if engine.is_terminal(state).is_some() {
        return false;
    }
    if let Some(pending) = state.pending().cloned() {
        let choices = engine.legal_choices(state, pending.awaiting);
        let choice = choices[pick % choices.len()];
        engine.resolve_choice(state, pending.awaiting, choice).unwrap();
    } else {
        let player = state.current_player().unwrap();
        let actions = engine.legal_actions(state, player);
        let action = actions[pick % actions.len()].clone();
        engine.apply_action(state, player, &action).unwrap();
    }
    true
}

/// Every card sits in exactly one list, and its status and owner agree with
/// that list.
fn check_placement(state: &GameState) -> Result<(), TestCaseError> {
    let mut placed: Vec<(CardId, CardStatus, Option<PlayerId>)> = Vec::new();

    for (seat, player) in state.players.iter() {
        placed.extend(player.hand.iter().map(|&c| (c, CardStatus::InHand, Some(seat))));
        placed.extend(
            player
                .allocated
                .values()
                .flatten()
                .map(|&c| (c, CardStatus::Allocated, Some(seat))),
        );
        placed.extend(player.secret.iter().map(|&c| (c, CardStatus::Secret, Some(seat))));
        placed.extend(player.discarded.iter().map(|&c| (c, CardStatus::Discarded, Some(seat))));
    }
    placed.extend(state.deck.iter().map(|&c| (c, CardStatus::InDeck, None)));
    placed.extend(state.removed.iter().map(|&c| (c, CardStatus::Removed, None)));
    if let Some(pending) = state.pending() {
        placed.extend(
            pending
                .groups
                .iter()
                .flatten()
                .map(|&c| (c, CardStatus::Offered, Some(pending.initiator))),
        );
    }

    prop_assert_eq!(placed.len(), 21);
    let mut seen: Vec<CardId> = placed.iter().map(|&(c, _, _)| c).collect();
    seen.sort_unstable();
    seen.dedup();
    prop_assert_eq!(seen.len(), 21, "a card is listed twice");

    for (card, status, owner) in placed {
        let instance = state.card(card).unwrap();
        prop_assert_eq!(instance.status, status, "{} is listed as {:?}", card, status);
        prop_assert_eq!(instance.owner, owner, "{} has the wrong owner", card);
    }
    Ok(())
}

fn arbitrary_request(kind: u8, cards: &[u32]) -> ActionRequest {
    let c = |i: usize| CardId::new(cards[i % cards.len()]);
    match kind % 4 {
        0 => ActionRequest::secret(c(0)),
        1 => ActionRequest::discard([c(0), c(1)]),
        2 => ActionRequest::gift([c(0), c(1), c(2)]),
        _ => ActionRequest::compete([[c(0), c(1)], [c(2), c(3)]]),
    }
}

proptest! {
    /// Every card is in exactly one place, and cards never return to the deck.
    #[test]
    fn cards_are_conserved(seed in any::<u64>(), picks in prop::collection::vec(0usize..64, 16)) {
        let (engine, mut state) = new_game(seed);
        check_placement(&state)?;
        let mut in_deck = state.deck.len();
        let removed = state.removed.clone();

        for pick in picks {
            if !step(&engine, &mut state, pick) {
                break;
            }
            check_placement(&state)?;
            prop_assert!(state.deck.len() <= in_deck);
            prop_assert_eq!(&state.removed, &removed);
            in_deck = state.deck.len();
        }
    }

    /// Stored favor always matches a fresh recomputation.
    #[test]
    fn favor_is_a_pure_function_of_allocations(seed in any::<u64>(), picks in prop::collection::vec(0usize..64, 16)) {
        let (engine, mut state) = new_game(seed);

        for pick in picks {
            let stored: Vec<_> = state.geishas.iter().map(|g| g.favor).collect();
            prop_assert_eq!(victory::compute_favor(&state), stored);

            let mut again = state.clone();
            victory::recompute_favor(&mut again);
            prop_assert_eq!(&again, &state);

            if !step(&engine, &mut state, pick) {
                break;
            }
        }
    }

    /// No player ever holds the same action twice in their used list.
    #[test]
    fn actions_are_used_at_most_once(seed in any::<u64>(), picks in prop::collection::vec(0usize..64, 16)) {
        let (engine, mut state) = new_game(seed);

        for pick in picks {
            if !step(&engine, &mut state, pick) {
                break;
            }
            for player in [PlayerId::HOST, PlayerId::GUEST] {
                let used = &state.player(player).used_actions;
                for action in ActionType::ALL {
                    prop_assert!(used.iter().filter(|&&a| a == action).count() <= 1);
                }
            }
        }
    }

    /// A rejected submission leaves the state exactly as it was.
    #[test]
    fn rejected_submissions_do_not_mutate(
        seed in any::<u64>(),
        warmup in prop::collection::vec(0usize..64, 0..6),
        guest in any::<bool>(),
        kind in any::<u8>(),
        cards in prop::collection::vec(0u32..24, 4),
    ) {
        let (engine, mut state) = new_game(seed);
        for pick in warmup {
            if !step(&engine, &mut state, pick) {
                break;
            }
        }

        let player = if guest { PlayerId::GUEST } else { PlayerId::HOST };
        let request = arbitrary_request(kind, &cards);
        let before = state.clone();

        if engine.submit_action(&mut state, player, &request).is_err() {
            prop_assert_eq!(state, before);
        }
    }
}
