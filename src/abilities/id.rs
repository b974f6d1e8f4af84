//! Ability identifiers.
//!
//! Every ability the engine knows is one [`AbilityId`] variant. Card data
//! refers to abilities by display name; [`AbilityKey`] keeps names the
//! engine does not know instead of failing, so a content bug disables one
//! card's ability rather than the whole catalog.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A known ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilityId {
    // Norse
    ThunderStrike,
    AllFather,
    Trickster,
    Ravenous,
    WorldSerpent,
    Gjallarhorn,
    ChooserOfTheSlain,
    QueenOfTheDead,
    Beloved,
    WintersGrip,
    // Greek
    WrathOfOlympus,
    Aegis,
    Forge,
    PetrifyingGaze,
    LordOfTheUnderworld,
    Radiance,
    GodOfWar,
    Messenger,
    Harvest,
    SpringsReturn,
    Retribution,
    // Japanese
    Dawn,
    StormBlade,
    FoxFire,
    Gust,
    IronHide,
    Tide,
    ThunderDrums,
    RiceTithe,
    // Egyptian
    WeigherOfHearts,
    Chaos,
    Protection,
    Bloodlust,
    Judgement,
}

const NAMES: &[(AbilityId, &str)] = &[
    (AbilityId::ThunderStrike, "Thunder Strike"),
    (AbilityId::AllFather, "All-Father"),
    (AbilityId::Trickster, "Trickster"),
    (AbilityId::Ravenous, "Ravenous"),
    (AbilityId::WorldSerpent, "World Serpent"),
    (AbilityId::Gjallarhorn, "Gjallarhorn"),
    (AbilityId::ChooserOfTheSlain, "Chooser of the Slain"),
    (AbilityId::QueenOfTheDead, "Queen of the Dead"),
    (AbilityId::Beloved, "Beloved"),
    (AbilityId::WintersGrip, "Winter's Grip"),
    (AbilityId::WrathOfOlympus, "Wrath of Olympus"),
    (AbilityId::Aegis, "Aegis"),
    (AbilityId::Forge, "Forge"),
    (AbilityId::PetrifyingGaze, "Petrifying Gaze"),
    (AbilityId::LordOfTheUnderworld, "Lord of the Underworld"),
    (AbilityId::Radiance, "Radiance"),
    (AbilityId::GodOfWar, "God of War"),
    (AbilityId::Messenger, "Messenger"),
    (AbilityId::Harvest, "Harvest"),
    (AbilityId::SpringsReturn, "Spring's Return"),
    (AbilityId::Retribution, "Retribution"),
    (AbilityId::Dawn, "Dawn"),
    (AbilityId::StormBlade, "Storm Blade"),
    (AbilityId::FoxFire, "Fox Fire"),
    (AbilityId::Gust, "Gust"),
    (AbilityId::IronHide, "Iron Hide"),
    (AbilityId::Tide, "Tide"),
    (AbilityId::ThunderDrums, "Thunder Drums"),
    (AbilityId::RiceTithe, "Rice Tithe"),
    (AbilityId::WeigherOfHearts, "Weigher of Hearts"),
    (AbilityId::Chaos, "Chaos"),
    (AbilityId::Protection, "Protection"),
    (AbilityId::Bloodlust, "Bloodlust"),
    (AbilityId::Judgement, "Judgement"),
];

impl AbilityId {
    /// Every known ability.
    pub fn all() -> impl Iterator<Item = AbilityId> {
        NAMES.iter().map(|(id, _)| *id)
    }

    /// Display name, as stored on card definitions.
    #[must_use]
    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(id, _)| *id == self)
            .map_or("", |(_, name)| name)
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for names that match no known ability.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown ability '{0}'")]
pub struct UnknownAbility(pub String);

impl FromStr for AbilityId {
    type Err = UnknownAbility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NAMES
            .iter()
            .find(|(_, name)| *name == trimmed)
            .map(|(id, _)| *id)
            .ok_or_else(|| UnknownAbility(s.to_string()))
    }
}

/// An ability name from card data, resolved if possible.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AbilityKey {
    Known(AbilityId),
    Unknown(String),
}

impl AbilityKey {
    /// The ability name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            AbilityKey::Known(id) => id.name(),
            AbilityKey::Unknown(name) => name,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<AbilityId> {
        match self {
            AbilityKey::Known(id) => Some(*id),
            AbilityKey::Unknown(_) => None,
        }
    }
}

impl From<String> for AbilityKey {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(id) => AbilityKey::Known(id),
            Err(_) => AbilityKey::Unknown(name),
        }
    }
}

impl From<AbilityKey> for String {
    fn from(key: AbilityKey) -> Self {
        key.name().to_string()
    }
}

impl From<AbilityId> for AbilityKey {
    fn from(id: AbilityId) -> Self {
        AbilityKey::Known(id)
    }
}
