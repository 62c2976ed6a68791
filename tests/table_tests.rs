//! Game table integration tests: hosting, concurrency, persistence.

use std::sync::Arc;
use std::thread;

use hanamikoji_engine::core::{ActionRequest, Choice, GameStatus, MessageKind};
use hanamikoji_engine::{
    ActionError, ActionType, CardId, FixedClock, GameId, GameTable, Hanamikoji, PlayerId, TableError,
};

fn table() -> GameTable {
    GameTable::new(Hanamikoji::standard().with_clock(Arc::new(FixedClock(0))))
}

/// Drive a hosted game to the end through the table, always taking the
/// first legal option.
fn play_out(table: &GameTable, id: GameId) {
    loop {
        let host_view = table.snapshot(id, PlayerId::HOST).unwrap();
        if host_view.status == GameStatus::Finished {
            return;
        }

        if let Some(pending) = host_view.pending {
            let choice = match pending.action_type {
                ActionType::Gift => Choice::Take(0),
                _ => Choice::Take(1),
            };
            table.resolve_pending_choice(id, pending.awaiting, choice).unwrap();
            continue;
        }

        let player = host_view.current_player.unwrap();
        let action = table.legal_actions(id, player).unwrap().remove(0);
        table.submit_action(id, player, &action.to_request()).unwrap();
    }
}

#[test]
fn test_full_game_through_table() {
    let table = table();
    let id = table.create_game("Aiko", 3);
    table.join_game(id, "Ren").unwrap();

    play_out(&table, id);

    let summary = table.summary(id).unwrap();
    assert_eq!(summary.status, GameStatus::Finished);
    assert!(summary.result.is_some());
    assert_eq!(summary.players, vec![Some("Aiko".to_string()), Some("Ren".to_string())]);

    let feed = table.messages_since(id, 0).unwrap();
    assert_eq!(feed.len(), summary.message_count);
    assert_eq!(feed.last().map(|m| m.kind), Some(MessageKind::GameEvent));

    let err = table
        .submit_action(id, PlayerId::HOST, &ActionRequest::secret(CardId::new(0)))
        .unwrap_err();
    assert_eq!(err.as_action(), Some(&ActionError::GameAlreadyFinished));
}

#[test]
fn test_waiting_game_rejects_actions() {
    let table = table();
    let id = table.create_game("Aiko", 3);

    let err = table
        .submit_action(id, PlayerId::HOST, &ActionRequest::secret(CardId::new(0)))
        .unwrap_err();

    assert_eq!(err.as_action(), Some(&ActionError::GameNotStarted));
    assert_eq!(table.summary(id).unwrap().players[1], None);
}

#[test]
fn test_games_are_independent_across_threads() {
    let table = Arc::new(table());
    let ids: Vec<GameId> = (0..8).map(|seed| table.create_game("Aiko", seed)).collect();

    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                table.join_game(id, "Ren").unwrap();
                let view = table.snapshot(id, PlayerId::HOST).unwrap();
                let card = view.me().hand.ids().unwrap()[0];
                table.submit_action(id, PlayerId::HOST, &ActionRequest::secret(card)).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let games = table.list_games();
    assert_eq!(games.len(), 8);
    assert!(games.windows(2).all(|w| w[0].id < w[1].id));
    assert!(games
        .iter()
        .all(|g| g.status == GameStatus::Playing && g.current_player == Some(PlayerId::GUEST)));
}

#[test]
fn test_resume_mid_decision() {
    let table = table();
    let id = table.create_game("Aiko", 9);
    let (_, guest_view) = table.join_game(id, "Ren").unwrap();
    assert!(guest_view.opponent().hand.is_hidden());

    let host_view = table.snapshot(id, PlayerId::HOST).unwrap();
    let hand = host_view.me().hand.ids().unwrap();
    table
        .submit_action(
            id,
            PlayerId::HOST,
            &ActionRequest::compete([[hand[0], hand[1]], [hand[2], hand[3]]]),
        )
        .unwrap();

    let record = table.export_game(id).unwrap();
    table.remove_game(id).unwrap();
    assert!(matches!(table.snapshot(id, PlayerId::HOST), Err(TableError::UnknownGame(_))));

    let restored = table.import_game(&record).unwrap();
    let view = table.snapshot(restored, PlayerId::GUEST).unwrap();
    assert_eq!(view.pending.as_ref().map(|p| p.awaiting), Some(PlayerId::GUEST));

    let after = table
        .resolve_pending_choice(restored, PlayerId::GUEST, Choice::Take(0))
        .unwrap();
    assert!(after.pending.is_none());
    // Two cards each: too few to win on the first allocation.
    assert_eq!(after.opponent().allocated.iter().map(|a| a.cards.len()).sum::<usize>(), 2);
    assert_eq!(after.me().allocated.iter().map(|a| a.cards.len()).sum::<usize>(), 2);
    assert_eq!(after.current_player, Some(PlayerId::GUEST));
}

#[test]
fn test_messages_since_tail() {
    let table = table();
    let id = table.create_game("Aiko", 1);
    assert_eq!(table.messages_since(id, 0).unwrap().len(), 1);

    table.join_game(id, "Ren").unwrap();
    let tail = table.messages_since(id, 1).unwrap();
    assert_eq!(tail[0].id, 1);
    assert_eq!(tail[0].kind, MessageKind::System);
    assert!(table.messages_since(id, 100).unwrap().is_empty());
}

/// Seat ids from the wire that name no seat are refused, not projected.
#[test]
fn test_unknown_seat_is_rejected() {
    let table = table();
    let id = table.create_game("Aiko", 5);
    table.join_game(id, "Ren").unwrap();

    let err = table.snapshot(id, PlayerId(2)).unwrap_err();
    assert!(matches!(err, TableError::UnknownSeat(PlayerId(2))));
    assert!(err.as_action().is_none());
    assert!(table.snapshot(id, PlayerId::GUEST).unwrap().me().hand.ids().is_some());
}
