//! Hosting many games at once.
//!
//! Every game sits behind its own mutex, so two games never contend and the
//! transitions of one game are strictly serialized. The map of games is
//! behind a read-write lock that is held only long enough to look a game up.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{info, warn};
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::{Result, TableError};
use crate::core::action::{Action, ActionRequest, Choice};
use crate::core::message::GameMessage;
use crate::core::player::PlayerId;
use crate::core::state::{GameId, GameState, GameStatus};
use crate::core::view::GameSnapshot;
use crate::rules::{GameResult, Hanamikoji, RulesEngine};

/// Public facts about a hosted game, for lobby listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameId,
    pub status: GameStatus,
    pub round: u32,
    /// Seat names, host first; `None` for an open seat.
    pub players: Vec<Option<String>>,
    pub current_player: Option<PlayerId>,
    pub result: Option<GameResult>,
    pub message_count: usize,
}

impl GameSummary {
    fn of(state: &GameState) -> Self {
        Self {
            id: state.id,
            status: state.status,
            round: state.round,
            players: state.players.iter().map(|(_, p)| p.name.clone()).collect(),
            current_player: state.current_player(),
            result: state.result,
            message_count: state.messages.len(),
        }
    }
}

/// A set of independent games sharing one engine.
pub struct GameTable {
    engine: Hanamikoji,
    games: RwLock<FxHashMap<GameId, Arc<Mutex<GameState>>>>,
    next_id: AtomicU64,
}

impl Default for GameTable {
    fn default() -> Self {
        Self::new(Hanamikoji::standard())
    }
}

impl GameTable {
    #[must_use]
    pub fn new(engine: Hanamikoji) -> Self {
        Self {
            engine,
            games: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &Hanamikoji {
        &self.engine
    }

    /// Open a game with the host seated. It waits for a second player.
    pub fn create_game(&self, host_name: impl Into<String>, seed: u64) -> GameId {
        let id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let state = self.engine.new_game(id, seed, host_name);

        self.games.write().insert(id, Arc::new(Mutex::new(state)));
        info!("{}: created with seed {}", id, seed);
        id
    }

    /// Seat the second player; the game starts immediately.
    pub fn join_game(&self, id: GameId, name: impl Into<String>) -> Result<(PlayerId, GameSnapshot)> {
        let game = self.game(id)?;
        let mut state = game.lock();

        match self.engine.join(&mut state, name) {
            Some(seat) => Ok((seat, self.engine.snapshot(&state, seat))),
            None => {
                warn!("{}: join refused, status {:?}", id, state.status);
                Err(TableError::GameFull(id))
            }
        }
    }

    /// Submit an action and return the actor's view afterwards.
    pub fn submit_action(&self, id: GameId, player: PlayerId, request: &ActionRequest) -> Result<GameSnapshot> {
        check_seat(player)?;
        let game = self.game(id)?;
        let mut state = game.lock();

        self.engine.submit_action(&mut state, player, request)?;
        Ok(self.engine.snapshot(&state, player))
    }

    /// Answer the outstanding Gift or Compete and return the responder's view.
    pub fn resolve_pending_choice(&self, id: GameId, player: PlayerId, choice: Choice) -> Result<GameSnapshot> {
        check_seat(player)?;
        let game = self.game(id)?;
        let mut state = game.lock();

        self.engine.resolve_choice(&mut state, player, choice)?;
        Ok(self.engine.snapshot(&state, player))
    }

    pub fn snapshot(&self, id: GameId, viewer: PlayerId) -> Result<GameSnapshot> {
        check_seat(viewer)?;
        let game = self.game(id)?;
        let state = game.lock();
        Ok(self.engine.snapshot(&state, viewer))
    }

    /// Actions `player` may submit right now; empty when it is not their turn.
    pub fn legal_actions(&self, id: GameId, player: PlayerId) -> Result<Vec<Action>> {
        check_seat(player)?;
        let game = self.game(id)?;
        let state = game.lock();
        Ok(self.engine.legal_actions(&state, player))
    }

    /// Feed entries from `from` onward.
    pub fn messages_since(&self, id: GameId, from: usize) -> Result<Vec<GameMessage>> {
        let game = self.game(id)?;
        let state = game.lock();
        Ok(state.messages.since(from))
    }

    pub fn summary(&self, id: GameId) -> Result<GameSummary> {
        let game = self.game(id)?;
        let state = game.lock();
        Ok(GameSummary::of(&state))
    }

    /// Summaries of every hosted game, by id.
    #[must_use]
    pub fn list_games(&self) -> Vec<GameSummary> {
        let games: Vec<Arc<Mutex<GameState>>> = self.games.read().values().cloned().collect();
        let mut summaries: Vec<GameSummary> = games.iter().map(|g| GameSummary::of(&g.lock())).collect();
        summaries.sort_by_key(|s| s.id);
        summaries
    }

    /// Stop hosting a game and hand back its final state.
    pub fn remove_game(&self, id: GameId) -> Result<GameState> {
        let game = self.games.write().remove(&id).ok_or(TableError::UnknownGame(id))?;
        info!("{}: removed", id);
        let state = game.lock().clone();
        Ok(state)
    }

    /// Encode a game for durable storage.
    pub fn export_game(&self, id: GameId) -> Result<Vec<u8>> {
        let game = self.game(id)?;
        let bytes = game.lock().to_bytes()?;
        Ok(bytes)
    }

    /// Host a game restored from `export_game`, keeping its id.
    pub fn import_game(&self, bytes: &[u8]) -> Result<GameId> {
        let state = GameState::from_bytes(bytes)?;
        let id = state.id;

        let mut games = self.games.write();
        if games.contains_key(&id) {
            warn!("{}: import refused, already hosted", id);
            return Err(TableError::DuplicateGame(id));
        }
        games.insert(id, Arc::new(Mutex::new(state)));
        drop(games);

        // Keep fresh ids clear of imported ones.
        self.next_id.fetch_max(id.0 + 1, Ordering::Relaxed);
        info!("{}: imported", id);
        Ok(id)
    }

    /// Number of hosted games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }

    fn game(&self, id: GameId) -> Result<Arc<Mutex<GameState>>> {
        match self.games.read().get(&id) {
            Some(game) => Ok(Arc::clone(game)),
            None => {
                warn!("{}: no such game", id);
                Err(TableError::UnknownGame(id))
            }
        }
    }
}

/// Reject ids that name no seat before they reach the engine.
fn check_seat(player: PlayerId) -> Result<()> {
    if player.is_seat() {
        Ok(())
    } else {
        warn!("rejected unknown seat {:?}", player);
        Err(TableError::UnknownSeat(player))
    }
}
