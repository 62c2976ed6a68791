//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. A game always has exactly two seats:
//! `PlayerId(0)` (the host) and `PlayerId(1)` (the joiner).
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by a fixed two-element array, indexable by
//! `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at a table.
pub const SEATS: usize = 2;

/// Seat identifier, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The seat bound when the game is created.
    pub const HOST: PlayerId = PlayerId(0);

    /// The seat bound when the second player joins.
    pub const GUEST: PlayerId = PlayerId(1);

    /// Create a new player ID.
    ///
    /// Panics if `id` is not a valid seat.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < SEATS, "Seat index out of range");
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this names one of the two seats. Ids arriving from a
    /// transport may not.
    #[must_use]
    pub const fn is_seat(self) -> bool {
        (self.0 as usize) < SEATS
    }

    /// The other seat. Only meaningful for a real seat.
    ///
    /// ```
    /// use hanamikoji_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::HOST.opponent(), PlayerId::GUEST);
    /// assert_eq!(PlayerId::GUEST.opponent(), PlayerId::HOST);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        assert!(self.is_seat(), "Seat index out of range");
        Self(1 - self.0)
    }

    /// Iterate over both seats in seat order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..SEATS as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use hanamikoji_engine::core::{PlayerId, PlayerMap};
///
/// let mut used: PlayerMap<u32> = PlayerMap::new(|_| 0);
/// used[PlayerId::GUEST] += 2;
///
/// assert_eq!(used[PlayerId::HOST], 0);
/// assert_eq!(used[PlayerId::GUEST], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; SEATS],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
