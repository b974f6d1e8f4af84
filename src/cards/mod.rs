//! Card definitions, in-match instances and hydration.
//!
//! - `CardDefinition`: immutable base card data
//! - `InGameCard`: one card inside one match
//! - `CardDataProvider`: where hydration fetches card data from
//! - `catalog`: a fixture catalog of base cards

pub mod catalog;
mod definition;
mod instance;
mod registry;

pub use definition::{CardDefinition, Rarity};
pub use instance::{DefeatRecord, InGameCard};
pub use registry::{CardDataProvider, CardRecord, CardRegistry, InMemoryCardProvider};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::*;
    use crate::abilities::{AbilityDescriptor, AbilityId};
    use crate::core::{BaseCardId, InstanceId, PlayerId};
    use crate::effects::PowerValues;
    use crate::triggers::DeclaredTrigger;

    /// A vanilla card owned by seat one.
    pub fn card(id: u32, power: PowerValues) -> InGameCard {
        let definition = CardDefinition::new(BaseCardId(id), format!("Card {}", id), power);
        InGameCard::new(InstanceId(id), Arc::new(definition), PlayerId::ONE)
    }

    /// A uniform-power card with a name and tags.
    pub fn tagged_card(id: u32, name: &str, tags: &[&str]) -> InGameCard {
        let mut definition = CardDefinition::new(BaseCardId(id), name, PowerValues::uniform(3));
        for tag in tags {
            definition = definition.with_tag(*tag);
        }
        InGameCard::new(InstanceId(id), Arc::new(definition), PlayerId::ONE)
    }

    /// A card carrying an ability.
    pub fn ability_card(
        id: u32,
        power: PowerValues,
        ability: AbilityId,
        trigger: DeclaredTrigger,
    ) -> InGameCard {
        let definition = CardDefinition::new(BaseCardId(id), ability.name(), power)
            .with_ability(AbilityDescriptor::new(ability, &[trigger]));
        InGameCard::new(InstanceId(id), Arc::new(definition), PlayerId::ONE)
    }
}
