//! Multi-game host.
//!
//! `GameTable` is the boundary a transport layer talks to: it owns the games,
//! serializes access to each, and returns per-player snapshots.

pub mod error;
pub mod service;

pub use error::{Result, TableError};
pub use service::{GameSummary, GameTable};
