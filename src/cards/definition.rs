//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a base card:
//! name, tags, base power, rarity and its ability. For example, "Fenrir"
//! always has the same base power and the "Ravenous" ability.
//!
//! Instance-specific data (level, enhancements, effects, owner) is
//! stored separately in [`InGameCard`](super::InGameCard).

use serde::{Deserialize, Serialize};

use crate::abilities::AbilityDescriptor;
use crate::core::BaseCardId;
use crate::effects::PowerValues;

/// Card rarity. Display-only inside a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use mythic_triad::cards::{CardDefinition, Rarity};
/// use mythic_triad::core::BaseCardId;
/// use mythic_triad::effects::PowerValues;
///
/// let wolf = CardDefinition::new(BaseCardId::new(1), "Grey Wolf", PowerValues::new(3, 2, 1, 2))
///     .with_tag("Norse")
///     .with_rarity(Rarity::Uncommon);
///
/// assert!(wolf.has_tag("Norse"));
/// assert!(wolf.ability.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: BaseCardId,

    pub name: String,

    #[serde(default)]
    pub tags: Vec<String>,

    pub base_power: PowerValues,

    #[serde(default)]
    pub rarity: Rarity,

    /// Opaque hint handed to the presentation layer when this card flips another.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_animation: Option<String>,

    /// Validated on deserialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<AbilityDescriptor>,
}

impl CardDefinition {
    /// Create a definition with no tags and no ability.
    #[must_use]
    pub fn new(id: BaseCardId, name: impl Into<String>, base_power: PowerValues) -> Self {
        Self {
            id,
            name: name.into(),
            tags: Vec::new(),
            base_power,
            rarity: Rarity::Common,
            attack_animation: None,
            ability: None,
        }
    }

    /// Add a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set the attack animation hint (builder pattern).
    #[must_use]
    pub fn with_attack_animation(mut self, animation: impl Into<String>) -> Self {
        self.attack_animation = Some(animation.into());
        self
    }

    /// Attach an ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, ability: AbilityDescriptor) -> Self {
        self.ability = Some(ability);
        self
    }

    /// Check for a tag. Exact, case-sensitive match.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
