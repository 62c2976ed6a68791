//! Action and choice validation.
//!
//! Everything here is a pure function of the state: nothing is mutated, so
//! a rejected request leaves the game exactly as it was. A request that
//! passes comes back as a typed `Action` ready for the resolver.

use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::action::{Action, ActionRequest, ActionType, CardList, Choice};
use crate::core::error::{ActionError, Result};
use crate::core::player::PlayerId;
use crate::core::state::{GameState, GameStatus, PendingDecision, Phase};

/// Check that `player` may submit an action right now.
pub fn check_can_act(state: &GameState, player: PlayerId) -> Result<()> {
    match state.status {
        GameStatus::Waiting => return Err(ActionError::GameNotStarted),
        GameStatus::Finished => return Err(ActionError::GameAlreadyFinished),
        GameStatus::Playing => {}
    }

    match &state.phase {
        Phase::AwaitingAction(current) if *current == player => Ok(()),
        Phase::AwaitingAction(current) => Err(ActionError::NotYourTurn { expected: *current }),
        Phase::AwaitingChoice(pending) => Err(ActionError::ChoicePending {
            awaiting: pending.awaiting,
        }),
        Phase::Setup => Err(ActionError::GameNotStarted),
        Phase::Complete => Err(ActionError::GameAlreadyFinished),
    }
}

/// Full validation of an action submission.
pub fn validate(state: &GameState, player: PlayerId, request: &ActionRequest) -> Result<Action> {
    check_can_act(state, player)?;
    validate_request(state, player, request)
}

/// Check the request itself against the player's hand and used actions.
///
/// Does not look at whose turn it is; see `check_can_act`.
pub fn validate_request(state: &GameState, player: PlayerId, request: &ActionRequest) -> Result<Action> {
    let action_type = request.action_type;
    let ids = &request.card_ids;

    if state.player(player).has_used(action_type) {
        return Err(ActionError::ActionAlreadyUsed(action_type));
    }

    let expected = action_type.card_count();
    if ids.len() != expected {
        return Err(ActionError::WrongCardCount {
            action: action_type,
            expected,
            got: ids.len(),
        });
    }

    check_cards_in_hand(state, player, ids)?;

    match action_type {
        ActionType::Secret => {
            check_no_groupings(request)?;
            Ok(Action::Secret { card: ids[0] })
        }
        ActionType::Discard => {
            check_no_groupings(request)?;
            Ok(Action::Discard {
                cards: [ids[0], ids[1]],
            })
        }
        ActionType::Gift => {
            if let Some(groups) = &request.groupings {
                if groups.len() != 1 {
                    return Err(ActionError::InvalidGrouping("a gift is offered as one group"));
                }
                if !same_members(&groups[0], ids) {
                    return Err(ActionError::InvalidGrouping(
                        "the gift group must hold exactly the selected cards",
                    ));
                }
            }
            Ok(Action::Gift {
                cards: [ids[0], ids[1], ids[2]],
            })
        }
        ActionType::Compete => {
            let groups = request
                .groupings
                .as_ref()
                .ok_or(ActionError::InvalidGrouping("compete needs two groups"))?;
            if groups.len() != 2 {
                return Err(ActionError::InvalidGrouping("compete needs two groups"));
            }
            if groups.iter().any(|g| g.len() != 2) {
                return Err(ActionError::InvalidGrouping("each compete group holds exactly two cards"));
            }
            let covered: CardList = groups.iter().flatten().copied().collect();
            if !same_members(&covered, ids) {
                return Err(ActionError::InvalidGrouping(
                    "compete groups must cover the selected cards without overlap",
                ));
            }
            Ok(Action::Compete {
                groups: [[groups[0][0], groups[0][1]], [groups[1][0], groups[1][1]]],
            })
        }
    }
}

/// Check that `player` may answer the pending decision with `choice`.
pub fn validate_choice<'a>(
    state: &'a GameState,
    player: PlayerId,
    choice: Choice,
) -> Result<&'a PendingDecision> {
    match state.status {
        GameStatus::Waiting => return Err(ActionError::GameNotStarted),
        GameStatus::Finished => return Err(ActionError::GameAlreadyFinished),
        GameStatus::Playing => {}
    }

    let pending = state.pending().ok_or(ActionError::NoPendingChoice)?;
    if pending.awaiting != player {
        return Err(ActionError::NotYourTurn {
            expected: pending.awaiting,
        });
    }

    match (pending.action_type, choice) {
        (ActionType::Gift, Choice::Take(0) | Choice::Decline) => Ok(pending),
        (ActionType::Gift, Choice::Take(_)) => Err(ActionError::InvalidChoice("a gift has a single group")),
        (ActionType::Compete, Choice::Take(index)) if index < pending.groups.len() => Ok(pending),
        (ActionType::Compete, Choice::Take(_)) => Err(ActionError::InvalidChoice("compete has two groups")),
        (ActionType::Compete, Choice::Decline) => {
            Err(ActionError::InvalidChoice("a compete offer cannot be declined"))
        }
        (other @ (ActionType::Secret | ActionType::Discard), _) => {
            panic!("{} never waits on a choice", other)
        }
    }
}

/// Every legal action for `player` in the current state.
///
/// Compete offers are enumerated with the groups in canonical order, so two
/// actions that differ only by group order are listed once.
#[must_use]
pub fn legal_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
    if check_can_act(state, player).is_err() {
        return Vec::new();
    }

    let me = state.player(player);
    let hand = &me.hand;
    let mut actions = Vec::new();

    for action_type in me.remaining_actions() {
        for combo in combinations(hand, action_type.card_count()) {
            match action_type {
                ActionType::Secret => actions.push(Action::Secret { card: combo[0] }),
                ActionType::Discard => actions.push(Action::Discard {
                    cards: [combo[0], combo[1]],
                }),
                ActionType::Gift => actions.push(Action::Gift {
                    cards: [combo[0], combo[1], combo[2]],
                }),
                ActionType::Compete => {
                    let [a, b, c, d] = [combo[0], combo[1], combo[2], combo[3]];
                    for groups in [[[a, b], [c, d]], [[a, c], [b, d]], [[a, d], [b, c]]] {
                        actions.push(Action::Compete { groups });
                    }
                }
            }
        }
    }

    actions
}

fn check_cards_in_hand(state: &GameState, player: PlayerId, ids: &[CardId]) -> Result<()> {
    for (i, &id) in ids.iter().enumerate() {
        if ids[..i].contains(&id) {
            return Err(ActionError::InvalidCardReference(id));
        }
        let held = state.card(id).is_some_and(|c| c.is_in_hand_of(player));
        if !held {
            return Err(ActionError::InvalidCardReference(id));
        }
        debug_assert!(
            state.player(player).hand.contains(&id),
            "{} is in hand by status but missing from the hand list",
            id
        );
    }
    Ok(())
}

fn check_no_groupings(request: &ActionRequest) -> Result<()> {
    match &request.groupings {
        None => Ok(()),
        Some(groups) if groups.is_empty() => Ok(()),
        Some(_) => Err(ActionError::InvalidGrouping("secret and discard take no groups")),
    }
}

fn same_members(a: &[CardId], b: &[CardId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: CardList = SmallVec::from_slice(a);
    let mut b: CardList = SmallVec::from_slice(b);
    a.sort_unstable();
    b.sort_unstable();
    a.windows(2).all(|w| w[0] != w[1]) && a == b
}

/// All `k`-element subsets of `items`, preserving order.
fn combinations(items: &[CardId], k: usize) -> Vec<CardList> {
    let mut out = Vec::new();
    let mut current = CardList::new();
    combine(items, k, 0, &mut current, &mut out);
    out
}

fn combine(items: &[CardId], k: usize, start: usize, current: &mut CardList, out: &mut Vec<CardList>) {
    if current.len() == k {
        out.push(current.clone());
        return;
    }
    for i in start..items.len() {
        if items.len() - i < k - current.len() {
            break;
        }
        current.push(items[i]);
        combine(items, k, i + 1, current, out);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(n: u32) -> CardId {
        CardId::new(n)
    }

    #[test]
    fn test_same_members() {
        assert!(same_members(&[c(1), c(2), c(3)], &[c(3), c(1), c(2)]));
        assert!(!same_members(&[c(1), c(2)], &[c(1), c(3)]));
        assert!(!same_members(&[c(1), c(1)], &[c(1), c(1)]));
        assert!(!same_members(&[c(1)], &[c(1), c(2)]));
    }

    #[test]
    fn test_combinations() {
        let items = [c(1), c(2), c(3), c(4)];
        assert_eq!(combinations(&items, 2).len(), 6);
        assert_eq!(combinations(&items, 4).len(), 1);
        assert!(combinations(&items, 5).is_empty());
        assert_eq!(combinations(&items, 1)[3].as_slice(), &[c(4)]);
    }
}
