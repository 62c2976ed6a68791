//! Action validation and resolution integration tests.
//!
//! Card ids in the standard catalog:
//! Ayame 0-1, Botan 2-3, Chiyo 4-5, Fumiko 6-8, Hana 9-11, Kaede 12-15,
//! Mizuki 16-20.

use std::sync::Arc;

use hanamikoji_engine::core::{ActionRequest, ActionType, Choice, Favor, Phase};
use hanamikoji_engine::{
    ActionError, CardId, CardStatus, FixedClock, GameBuilder, GameState, GameStatus, Hanamikoji, PlayerId, RulesConfig,
    RulesEngine,
};

const HOST: PlayerId = PlayerId::HOST;
const GUEST: PlayerId = PlayerId::GUEST;

fn c(n: u32) -> CardId {
    CardId::new(n)
}

fn ids(ns: &[u32]) -> Vec<CardId> {
    ns.iter().copied().map(CardId::new).collect()
}

/// A started game with fixed six-card hands and the base draw rule.
fn stacked(host: &[u32], guest: &[u32]) -> (Hanamikoji, GameState) {
    GameBuilder::new()
        .clock(Arc::new(FixedClock(1_000)))
        .names("Aiko", "Ren")
        .hands(&ids(host), &ids(guest))
        .build(42)
        .unwrap()
}

fn default_hands() -> (Hanamikoji, GameState) {
    stacked(&[16, 17, 18, 0, 2, 4], &[1, 3, 5, 6, 9, 12])
}

// =============================================================================
// Resolution
// =============================================================================

/// Discarding two cards of one geisha takes them out of play.
#[test]
fn test_discard_same_geisha() {
    let (engine, mut state) = stacked(&[16, 17, 0, 2, 4, 6], &[1, 3, 5, 7, 9, 12]);

    engine
        .submit_action(&mut state, HOST, &ActionRequest::discard([c(16), c(17)]))
        .unwrap();

    let host = state.player(HOST);
    assert_eq!(host.discarded, ids(&[16, 17]));
    assert!(host.allocated.is_empty());
    assert!(host.has_used(ActionType::Discard));
    assert!(!host.hand.contains(&c(16)));
    assert_eq!(state.card(c(16)).unwrap().status, CardStatus::Discarded);
    assert_eq!(state.card(c(17)).unwrap().status, CardStatus::Discarded);
    assert!(state.geishas.iter().all(|g| g.favor == Favor::Neutral));
    assert_eq!(state.current_player(), Some(GUEST));
}

/// A declined gift puts all three cards on the giver's side.
#[test]
fn test_gift_declined_gives_three_zero_lead() {
    let (engine, mut state) = default_hands();

    engine
        .submit_action(&mut state, HOST, &ActionRequest::gift([c(16), c(17), c(18)]))
        .unwrap();
    assert!(matches!(state.phase, Phase::AwaitingChoice(_)));
    assert_eq!(state.current_player(), Some(HOST));

    engine.resolve_choice(&mut state, GUEST, Choice::Decline).unwrap();

    let mizuki = state.geishas[6].id;
    assert_eq!(state.player(HOST).allocated_count(mizuki), 3);
    assert_eq!(state.player(GUEST).allocated_count(mizuki), 0);
    assert_eq!(state.favor(mizuki), Favor::Player(HOST));
    assert_eq!(state.score(HOST), 5);
    assert_eq!(state.phase, Phase::AwaitingAction(GUEST));
    assert_eq!(state.status, GameStatus::Playing);
}

/// An accepted gift puts all three cards on the receiver's side.
#[test]
fn test_gift_accepted() {
    let (engine, mut state) = default_hands();

    engine
        .submit_action(&mut state, HOST, &ActionRequest::gift([c(0), c(2), c(4)]))
        .unwrap();
    engine.resolve_choice(&mut state, GUEST, Choice::Take(0)).unwrap();

    assert_eq!(state.player(GUEST).allocated_total(), 3);
    assert_eq!(state.player(HOST).allocated_total(), 0);
    assert_eq!(state.favored_count(GUEST), 3);
}

/// Taking group 0 of a compete gives the other pair to the initiator, and
/// the turn passes to the responder.
#[test]
fn test_compete_take_first_then_turn_passes() {
    let (engine, mut state) = default_hands();

    engine
        .submit_action(&mut state, HOST, &ActionRequest::compete([[c(16), c(17)], [c(0), c(2)]]))
        .unwrap();
    engine.resolve_choice(&mut state, GUEST, Choice::Take(0)).unwrap();

    assert_eq!(state.card(c(16)).unwrap().allocated_owner(), Some(GUEST));
    assert_eq!(state.card(c(17)).unwrap().allocated_owner(), Some(GUEST));
    assert_eq!(state.card(c(0)).unwrap().allocated_owner(), Some(HOST));
    assert_eq!(state.card(c(2)).unwrap().allocated_owner(), Some(HOST));
    assert_eq!(state.favor(state.geishas[6].id), Favor::Player(GUEST));
    assert_eq!(state.favor(state.geishas[0].id), Favor::Player(HOST));
    assert_eq!(state.current_player(), Some(GUEST));
    assert!(state.is_my_turn(GUEST));
}

/// A secret card stays out of the favor count.
#[test]
fn test_secret_is_not_counted() {
    let (engine, mut state) = default_hands();

    engine.submit_action(&mut state, HOST, &ActionRequest::secret(c(16))).unwrap();

    assert_eq!(state.player(HOST).secret, vec![c(16)]);
    assert_eq!(state.card(c(16)).unwrap().status, CardStatus::Secret);
    assert_eq!(state.favor(state.geishas[6].id), Favor::Neutral);
}

/// The incoming player draws the next deck card.
#[test]
fn test_start_of_turn_draw() {
    let (engine, mut state) = default_hands();
    // Remaining cards in id order: 7, 8, 10, 11, 13, ...; host drew 7 at start.
    assert_eq!(state.player(HOST).hand.len(), 7);
    assert!(state.player(HOST).hand.contains(&c(7)));

    engine.submit_action(&mut state, HOST, &ActionRequest::secret(c(7))).unwrap();

    assert_eq!(state.player(GUEST).hand.len(), 7);
    assert!(state.player(GUEST).hand.contains(&c(8)));
}

// =============================================================================
// Rejections
// =============================================================================

/// A submission out of turn fails and changes nothing.
#[test]
fn test_not_your_turn_leaves_state_unchanged() {
    let (engine, mut state) = default_hands();
    let before = state.clone();

    let err = engine
        .submit_action(&mut state, GUEST, &ActionRequest::secret(c(1)))
        .unwrap_err();

    assert_eq!(err, ActionError::NotYourTurn { expected: HOST });
    assert_eq!(state, before);
}

#[test]
fn test_action_used_twice() {
    let (engine, mut state) = default_hands();
    engine.submit_action(&mut state, HOST, &ActionRequest::secret(c(0))).unwrap();
    engine.submit_action(&mut state, GUEST, &ActionRequest::secret(c(1))).unwrap();
    let before = state.clone();

    let err = engine.submit_action(&mut state, HOST, &ActionRequest::secret(c(2))).unwrap_err();

    assert_eq!(err, ActionError::ActionAlreadyUsed(ActionType::Secret));
    assert_eq!(state, before);
}

#[test]
fn test_wrong_card_count() {
    let (engine, mut state) = default_hands();

    let err = engine
        .submit_action(&mut state, HOST, &ActionRequest::new(ActionType::Gift, &[c(0), c(2)]))
        .unwrap_err();

    assert_eq!(
        err,
        ActionError::WrongCardCount {
            action: ActionType::Gift,
            expected: 3,
            got: 2
        }
    );
}

#[test]
fn test_card_not_in_hand() {
    let (engine, mut state) = default_hands();

    // Card 1 is the guest's.
    let err = engine
        .submit_action(&mut state, HOST, &ActionRequest::discard([c(0), c(1)]))
        .unwrap_err();
    assert_eq!(err, ActionError::InvalidCardReference(c(1)));

    let err = engine
        .submit_action(&mut state, HOST, &ActionRequest::discard([c(0), c(0)]))
        .unwrap_err();
    assert_eq!(err, ActionError::InvalidCardReference(c(0)));

    let err = engine
        .submit_action(&mut state, HOST, &ActionRequest::secret(c(99)))
        .unwrap_err();
    assert_eq!(err, ActionError::InvalidCardReference(c(99)));
}

#[test]
fn test_invalid_groupings() {
    let (engine, mut state) = default_hands();
    let before = state.clone();

    let no_groups = ActionRequest::new(ActionType::Compete, &ids(&[16, 17, 0, 2]));
    let err = engine.submit_action(&mut state, HOST, &no_groups).unwrap_err();
    assert!(matches!(err, ActionError::InvalidGrouping(_)));

    let lopsided = ActionRequest::new(ActionType::Compete, &ids(&[16, 17, 0, 2]))
        .with_groupings(&[&[c(16)], &[c(17), c(0), c(2)]]);
    let err = engine.submit_action(&mut state, HOST, &lopsided).unwrap_err();
    assert!(matches!(err, ActionError::InvalidGrouping(_)));

    let overlapping = ActionRequest::new(ActionType::Compete, &ids(&[16, 17, 0, 2]))
        .with_groupings(&[&[c(16), c(17)], &[c(17), c(0)]]);
    let err = engine.submit_action(&mut state, HOST, &overlapping).unwrap_err();
    assert!(matches!(err, ActionError::InvalidGrouping(_)));

    let split_gift = ActionRequest::new(ActionType::Gift, &ids(&[16, 17, 0]))
        .with_groupings(&[&[c(16)], &[c(17), c(0)]]);
    let err = engine.submit_action(&mut state, HOST, &split_gift).unwrap_err();
    assert!(matches!(err, ActionError::InvalidGrouping(_)));

    let grouped_secret = ActionRequest::secret(c(16)).with_groupings(&[&[c(16)]]);
    let err = engine.submit_action(&mut state, HOST, &grouped_secret).unwrap_err();
    assert!(matches!(err, ActionError::InvalidGrouping(_)));

    assert_eq!(state, before);
}

/// An empty grouping list stands for no groupings on Secret and Discard,
/// while a Gift's list, when present, must hold its one group.
#[test]
fn test_empty_groupings() {
    let (engine, mut state) = default_hands();

    let empty_gift = ActionRequest {
        groupings: Some(Vec::new()),
        ..ActionRequest::gift([c(16), c(17), c(0)])
    };
    let err = engine.submit_action(&mut state, HOST, &empty_gift).unwrap_err();
    assert!(matches!(err, ActionError::InvalidGrouping(_)));

    let empty_secret = ActionRequest {
        groupings: Some(Vec::new()),
        ..ActionRequest::secret(c(16))
    };
    engine.submit_action(&mut state, HOST, &empty_secret).unwrap();
    assert_eq!(state.player(HOST).secret, vec![c(16)]);
}

/// A gift may name its single group explicitly.
#[test]
fn test_gift_with_matching_group() {
    let (engine, mut state) = default_hands();
    let request = ActionRequest::gift([c(16), c(17), c(0)]).with_groupings(&[&[c(0), c(16), c(17)]]);

    engine.submit_action(&mut state, HOST, &request).unwrap();

    assert_eq!(state.pending().map(|p| p.groups.len()), Some(1));
}

/// While a gift waits, no one may submit an action, and only the awaited
/// player may answer.
#[test]
fn test_pending_choice_blocks_actions() {
    let (engine, mut state) = default_hands();
    engine
        .submit_action(&mut state, HOST, &ActionRequest::gift([c(16), c(17), c(18)]))
        .unwrap();
    let before = state.clone();

    let err = engine.submit_action(&mut state, HOST, &ActionRequest::secret(c(0))).unwrap_err();
    assert_eq!(err, ActionError::ChoicePending { awaiting: GUEST });

    let err = engine.submit_action(&mut state, GUEST, &ActionRequest::secret(c(1))).unwrap_err();
    assert_eq!(err, ActionError::ChoicePending { awaiting: GUEST });

    let err = engine.resolve_choice(&mut state, HOST, Choice::Take(0)).unwrap_err();
    assert_eq!(err, ActionError::NotYourTurn { expected: GUEST });

    let err = engine.resolve_choice(&mut state, GUEST, Choice::Take(1)).unwrap_err();
    assert!(matches!(err, ActionError::InvalidChoice(_)));

    assert_eq!(state, before);
}

#[test]
fn test_compete_cannot_be_declined() {
    let (engine, mut state) = default_hands();
    engine
        .submit_action(&mut state, HOST, &ActionRequest::compete([[c(16), c(17)], [c(0), c(2)]]))
        .unwrap();

    let err = engine.resolve_choice(&mut state, GUEST, Choice::Decline).unwrap_err();
    assert!(matches!(err, ActionError::InvalidChoice(_)));

    let err = engine.resolve_choice(&mut state, GUEST, Choice::Take(2)).unwrap_err();
    assert!(matches!(err, ActionError::InvalidChoice(_)));
}

#[test]
fn test_no_pending_choice() {
    let (engine, mut state) = default_hands();

    let err = engine.resolve_choice(&mut state, GUEST, Choice::Take(0)).unwrap_err();

    assert_eq!(err, ActionError::NoPendingChoice);
}

/// Offered cards leave the hand at once and the action counts as used.
#[test]
fn test_offer_consumes_action_immediately() {
    let (engine, mut state) = default_hands();
    engine
        .submit_action(&mut state, HOST, &ActionRequest::gift([c(16), c(17), c(18)]))
        .unwrap();

    let host = state.player(HOST);
    assert!(host.has_used(ActionType::Gift));
    assert_eq!(host.hand.len(), 4);
    assert!(engine.legal_actions(&state, HOST).is_empty());

    // Laid out on the table, in nobody's hand, until the guest answers.
    for card in [c(16), c(17), c(18)] {
        let instance = state.card(card).unwrap();
        assert_eq!(instance.status, CardStatus::Offered);
        assert!(!instance.is_in_hand_of(HOST));
    }
    let listed = state.player(HOST).hand.len()
        + state.player(GUEST).hand.len()
        + state.deck.len()
        + state.removed.len()
        + state.pending().map_or(0, |p| p.groups.iter().map(|g| g.len()).sum());
    assert_eq!(listed, 21);

    engine.resolve_choice(&mut state, GUEST, Choice::Take(0)).unwrap();
    assert!(state.cards.iter().all(|card| card.status != CardStatus::Offered));
    assert_eq!(state.player(GUEST).allocated_total(), 3);
}

/// Configs are validated when the engine is built.
#[test]
fn test_builder_with_custom_config() {
    let (engine, state) = GameBuilder::new()
        .config(RulesConfig::default().with_hand_size(10).with_draw_each_turn(false))
        .build(3)
        .unwrap();

    assert_eq!(engine.config().hand_size, 10);
    assert_eq!(state.player(HOST).hand.len(), 10);
    assert_eq!(state.player(GUEST).hand.len(), 10);
    assert_eq!(state.deck_size(), 0);
}
