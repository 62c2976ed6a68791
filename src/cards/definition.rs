//! Static definitions: geishas and the gift cards bound to them.
//!
//! A `GeishaDefinition` holds the immutable properties of an influence
//! target (name, charm value, the gift item she favors). A `CardDefinition`
//! is one physical gift card and names exactly one geisha.
//!
//! Per-game data (favor, card status, ownership) lives separately in
//! `GameState` and `CardInstance`.

use serde::{Deserialize, Serialize};

/// Identifier for a geisha (influence target).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GeishaId(pub u8);

impl GeishaId {
    /// Create a new geisha ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for GeishaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Geisha({})", self.0)
    }
}

/// Identifier for a single physical card.
///
/// Unlike geishas, every card in the deck has its own id, so two cards for
/// the same geisha are distinguishable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Immutable geisha definition.
///
/// ## Example
///
/// ```
/// use hanamikoji_engine::cards::{GeishaDefinition, GeishaId};
///
/// let geisha = GeishaDefinition::new(GeishaId::new(7), "Mizuki", 5).with_gift_item("Kimono");
/// assert_eq!(geisha.charm, 5);
/// assert_eq!(geisha.gift_item, "Kimono");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeishaDefinition {
    pub id: GeishaId,

    /// Display name.
    pub name: String,

    /// Charm value. Counts toward the charm victory condition and equals the
    /// number of cards bound to this geisha in the standard deck.
    pub charm: u32,

    /// The gift item her cards depict.
    pub gift_item: String,
}

impl GeishaDefinition {
    /// Create a new geisha definition.
    ///
    /// Panics on a zero charm value.
    #[must_use]
    pub fn new(id: GeishaId, name: impl Into<String>, charm: u32) -> Self {
        assert!(charm > 0, "Geisha charm must be positive");
        Self {
            id,
            name: name.into(),
            charm,
            gift_item: String::new(),
        }
    }

    /// Set the gift item (builder pattern).
    #[must_use]
    pub fn with_gift_item(mut self, item: impl Into<String>) -> Self {
        self.gift_item = item.into();
        self
    }
}

/// Immutable card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    /// The geisha this card counts toward.
    pub geisha: GeishaId,

    /// Item name shown on the card.
    pub item_name: String,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: CardId, geisha: GeishaId, item_name: impl Into<String>) -> Self {
        Self {
            id,
            geisha,
            item_name: item_name.into(),
        }
    }
}
