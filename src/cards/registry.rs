//! Card registry: the catalog of geishas and gift cards.
//!
//! A registry is built once and never mutated after it is handed to the
//! engine. The standard base-game catalog is a process-wide static shared by
//! every game through an `Arc`.

use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, GeishaDefinition, GeishaId};

/// Base-game roster: (name, charm, gift item). Each geisha has as many cards
/// as her charm value.
const STANDARD_ROSTER: [(&str, u32, &str); 7] = [
    ("Ayame", 2, "Fan"),
    ("Botan", 2, "Parasol"),
    ("Chiyo", 2, "Flute"),
    ("Fumiko", 3, "Shamisen"),
    ("Hana", 3, "Tea Set"),
    ("Kaede", 4, "Scroll"),
    ("Mizuki", 5, "Kimono"),
];

static STANDARD: Lazy<Arc<CardRegistry>> = Lazy::new(|| {
    let mut registry = CardRegistry::new();
    for (index, (name, charm, item)) in STANDARD_ROSTER.iter().enumerate() {
        let id = GeishaId::new(index as u8 + 1);
        registry.register_geisha(GeishaDefinition::new(id, *name, *charm).with_gift_item(*item));
        for _ in 0..*charm {
            registry.register_card(id, *item);
        }
    }
    Arc::new(registry)
});

/// Registry of geisha and card definitions.
///
/// Card ids are assigned densely in registration order, starting at 0.
///
/// ## Example
///
/// ```
/// use hanamikoji_engine::cards::{CardRegistry, GeishaDefinition, GeishaId};
///
/// let mut registry = CardRegistry::new();
/// let geisha = GeishaId::new(1);
/// registry.register_geisha(GeishaDefinition::new(geisha, "Ayame", 2));
///
/// let first = registry.register_card(geisha, "Fan");
/// let second = registry.register_card(geisha, "Fan");
///
/// assert_eq!(registry.card_count(), 2);
/// assert_eq!(registry.cards_for(geisha).collect::<Vec<_>>(), vec![first, second]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    geishas: Vec<GeishaDefinition>,
    geisha_index: FxHashMap<GeishaId, usize>,
    cards: Vec<CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared base-game catalog: 7 geishas (charm 2,2,2,3,3,4,5) and 21 cards.
    #[must_use]
    pub fn standard() -> Arc<CardRegistry> {
        Arc::clone(&STANDARD)
    }

    /// Register a geisha.
    ///
    /// Panics if a geisha with the same ID already exists.
    pub fn register_geisha(&mut self, geisha: GeishaDefinition) {
        if self.geisha_index.contains_key(&geisha.id) {
            panic!("Geisha with ID {:?} already registered", geisha.id);
        }
        self.geisha_index.insert(geisha.id, self.geishas.len());
        self.geishas.push(geisha);
    }

    /// Register a card for an already registered geisha.
    ///
    /// Returns the assigned ID.
    pub fn register_card(&mut self, geisha: GeishaId, item_name: impl Into<String>) -> CardId {
        assert!(
            self.geisha_index.contains_key(&geisha),
            "Card registered for unknown geisha {:?}",
            geisha
        );
        let id = CardId::new(self.cards.len() as u32);
        self.cards.push(CardDefinition::new(id, geisha, item_name));
        id
    }

    /// Get a geisha definition by ID.
    #[must_use]
    pub fn geisha(&self, id: GeishaId) -> Option<&GeishaDefinition> {
        self.geisha_index.get(&id).map(|&index| &self.geishas[index])
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(id.raw() as usize)
    }

    /// Charm value of a geisha, or 0 if unknown.
    #[must_use]
    pub fn charm(&self, id: GeishaId) -> u32 {
        self.geisha(id).map(|g| g.charm).unwrap_or(0)
    }

    /// Geishas in registration order.
    pub fn geishas(&self) -> impl Iterator<Item = &GeishaDefinition> {
        self.geishas.iter()
    }

    /// All cards in id order.
    pub fn cards(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Ids of the cards bound to a geisha, in id order.
    pub fn cards_for(&self, geisha: GeishaId) -> impl Iterator<Item = CardId> + '_ {
        self.cards
            .iter()
            .filter(move |c| c.geisha == geisha)
            .map(|c| c.id)
    }

    /// Number of registered geishas.
    #[must_use]
    pub fn geisha_count(&self) -> usize {
        self.geishas.len()
    }

    /// Number of registered cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Sum of all geisha charm values.
    #[must_use]
    pub fn total_charm(&self) -> u32 {
        self.geishas.iter().map(|g| g.charm).sum()
    }
}
