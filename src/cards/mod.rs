//! Card system: geisha and card definitions, per-game instances, registry.
//!
//! ## Key Types
//!
//! - `GeishaId` / `GeishaDefinition`: influence targets with a charm value
//! - `CardId` / `CardDefinition`: a gift card bound to one geisha
//! - `CardInstance` / `CardStatus`: a card's location and owner in one game
//! - `CardRegistry`: the read-only catalog, shared across games

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardId, GeishaDefinition, GeishaId};
pub use instance::{CardInstance, CardStatus};
pub use registry::CardRegistry;
