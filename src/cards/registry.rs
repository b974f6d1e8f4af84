//! Card registry and the card data provider seam.
//!
//! The engine never owns card data. Before a card can enter play it is
//! fetched from a [`CardDataProvider`] and copied into the match's
//! hydration cache. [`InMemoryCardProvider`] backs tests, benchmarks and
//! the AI; production wires in a provider over the real card store.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::CardDefinition;
use super::instance::InGameCard;
use crate::core::{BaseCardId, CardDataError, InstanceId, PlayerId};
use crate::effects::PowerDelta;

/// Everything the provider knows about one card instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardRecord {
    pub instance_id: InstanceId,
    pub definition: Arc<CardDefinition>,
    pub level: u32,
    pub xp: u32,
    pub power_enhancements: PowerDelta,
}

impl CardRecord {
    /// Build the in-match card for `owner`.
    #[must_use]
    pub fn hydrate(self, owner: PlayerId) -> InGameCard {
        let mut card = InGameCard::new(self.instance_id, self.definition, owner)
            .with_enhancements(self.power_enhancements);
        card.level = self.level;
        card.xp = self.xp;
        card
    }
}

/// Source of card data for hydration.
pub trait CardDataProvider {
    /// Fetch the definition and instance data for one card.
    fn fetch(&self, instance: InstanceId) -> Result<CardRecord, CardDataError>;
}

/// Registry of base card definitions.
///
/// ## Example
///
/// ```
/// use mythic_triad::cards::{CardDefinition, CardRegistry};
/// use mythic_triad::core::BaseCardId;
/// use mythic_triad::effects::PowerValues;
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(BaseCardId::new(1), "Grey Wolf", PowerValues::uniform(2)));
///
/// let found = registry.get(BaseCardId::new(1)).unwrap();
/// assert_eq!(found.name, "Grey Wolf");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<BaseCardId, Arc<CardDefinition>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Returns the one it replaced, if any.
    pub fn register(&mut self, card: CardDefinition) -> Option<Arc<CardDefinition>> {
        let previous = self.cards.insert(card.id, Arc::new(card));
        if let Some(previous) = &previous {
            log::warn!("base card {} ('{}') registered twice", previous.id, previous.name);
        }
        previous
    }

    #[must_use]
    pub fn get(&self, id: BaseCardId) -> Option<&Arc<CardDefinition>> {
        self.cards.get(&id)
    }

    /// Find a definition by exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<CardDefinition>> {
        self.iter().find(|card| card.name == name)
    }

    #[must_use]
    pub fn contains(&self, id: BaseCardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over definitions in base-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by_key(|card| card.id);
        cards.into_iter()
    }
}

#[derive(Clone, Debug)]
struct InstanceRecord {
    base: BaseCardId,
    level: u32,
    xp: u32,
    power_enhancements: PowerDelta,
}

/// Card data provider backed by in-memory maps.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCardProvider {
    registry: CardRegistry,
    instances: FxHashMap<InstanceId, InstanceRecord>,
    next_instance: u32,
}

impl InMemoryCardProvider {
    #[must_use]
    pub fn new(registry: CardRegistry) -> Self {
        Self {
            registry,
            instances: FxHashMap::default(),
            next_instance: 1,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Record an instance with explicit id. Replaces an existing record.
    pub fn add_instance(&mut self, instance: InstanceId, base: BaseCardId) {
        self.add_upgraded_instance(instance, base, 1, PowerDelta::default());
    }

    /// Record an instance with level and persisted upgrades.
    pub fn add_upgraded_instance(
        &mut self,
        instance: InstanceId,
        base: BaseCardId,
        level: u32,
        power_enhancements: PowerDelta,
    ) {
        self.instances.insert(
            instance,
            InstanceRecord {
                base,
                level,
                xp: 0,
                power_enhancements,
            },
        );
        self.next_instance = self.next_instance.max(instance.raw() + 1);
    }

    /// Mint a fresh instance of `base`.
    pub fn mint(&mut self, base: BaseCardId) -> InstanceId {
        let id = InstanceId::new(self.next_instance);
        self.add_instance(id, base);
        id
    }

    /// Mint one instance per base id, in order. Handy for building decks.
    pub fn mint_deck(&mut self, bases: &[BaseCardId]) -> Vec<InstanceId> {
        bases.iter().map(|base| self.mint(*base)).collect()
    }
}

impl CardDataProvider for InMemoryCardProvider {
    fn fetch(&self, instance: InstanceId) -> Result<CardRecord, CardDataError> {
        let record = self
            .instances
            .get(&instance)
            .ok_or(CardDataError::MissingInstance(instance))?;
        let definition = self
            .registry
            .get(record.base)
            .ok_or(CardDataError::MissingDefinition(record.base))?;

        Ok(CardRecord {
            instance_id: instance,
            definition: Arc::clone(definition),
            level: record.level,
            xp: record.xp,
            power_enhancements: record.power_enhancements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::PowerValues;

    fn registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(BaseCardId(1), "Wolf", PowerValues::uniform(2)));
        registry.register(CardDefinition::new(BaseCardId(2), "Raven", PowerValues::uniform(1)));
        registry
    }

    #[test]
    fn test_register_and_get() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(BaseCardId(2)));
        assert_eq!(registry.find_by_name("Raven").map(|c| c.id), Some(BaseCardId(2)));
        assert!(registry.get(BaseCardId(99)).is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = registry();
        let previous =
            registry.register(CardDefinition::new(BaseCardId(1), "Dire Wolf", PowerValues::uniform(3)));
        assert_eq!(previous.map(|c| c.name.clone()), Some("Wolf".to_string()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_iteration_is_ordered() {
        let ids: Vec<_> = registry().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![BaseCardId(1), BaseCardId(2)]);
    }

    #[test]
    fn test_fetch_and_hydrate() {
        let mut provider = InMemoryCardProvider::new(registry());
        provider.add_upgraded_instance(InstanceId(10), BaseCardId(1), 3, PowerDelta::uniform(1));

        let card = provider.fetch(InstanceId(10)).unwrap().hydrate(PlayerId::TWO);
        assert_eq!(card.level, 3);
        assert_eq!(card.current_power, PowerValues::uniform(3));
        assert_eq!(card.owner, PlayerId::TWO);
        assert_eq!(card.original_owner, PlayerId::TWO);
    }

    #[test]
    fn test_fetch_failures() {
        let mut provider = InMemoryCardProvider::new(registry());
        assert_eq!(
            provider.fetch(InstanceId(5)),
            Err(CardDataError::MissingInstance(InstanceId(5)))
        );

        provider.add_instance(InstanceId(5), BaseCardId(77));
        assert_eq!(
            provider.fetch(InstanceId(5)),
            Err(CardDataError::MissingDefinition(BaseCardId(77)))
        );
    }

    #[test]
    fn test_mint_continues_after_explicit_ids() {
        let mut provider = InMemoryCardProvider::new(registry());
        provider.add_instance(InstanceId(40), BaseCardId(1));
        let deck = provider.mint_deck(&[BaseCardId(1), BaseCardId(2)]);
        assert_eq!(deck, vec![InstanceId(41), InstanceId(42)]);
    }
}
