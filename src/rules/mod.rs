//! Game rules.
//!
//! `Hanamikoji` implements `RulesEngine` by running, in order:
//! - `validator`: pure legality checks
//! - `resolver`: applies an action or a Gift/Compete answer
//! - `victory`: favor recomputation and win/draw detection
//! - `turn`: dealing, alternation, rounds
//!
//! The core types in `crate::core` never interpret the rules directly.

pub mod builder;
pub mod engine;
pub mod resolver;
pub mod turn;
pub mod validator;
pub mod victory;

pub use builder::GameBuilder;
pub use engine::{GameResult, Hanamikoji, RulesEngine};
pub use resolver::Resolution;
pub use turn::Deal;
