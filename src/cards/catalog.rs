//! A fixture catalog of base cards.
//!
//! One card per implemented ability plus a few vanilla cards per pantheon.
//! Tests, benchmarks and local tooling build matches from it without a
//! real card store.

use super::definition::{CardDefinition, Rarity};
use super::registry::{CardRegistry, InMemoryCardProvider};
use crate::abilities::{AbilityDescriptor, AbilityId};
use crate::core::BaseCardId;
use crate::effects::PowerValues;
use crate::triggers::{DeclaredTrigger, TriggerMoment};

struct Entry {
    id: u32,
    name: &'static str,
    tag: &'static str,
    power: [i32; 4],
    rarity: Rarity,
    ability: Option<(AbilityId, DeclaredTrigger, &'static str)>,
}

const fn entry(
    id: u32,
    name: &'static str,
    tag: &'static str,
    power: [i32; 4],
    rarity: Rarity,
    ability: Option<(AbilityId, DeclaredTrigger, &'static str)>,
) -> Entry {
    Entry {
        id,
        name,
        tag,
        power,
        rarity,
        ability,
    }
}

const fn own(moment: TriggerMoment) -> DeclaredTrigger {
    DeclaredTrigger::new(moment, crate::triggers::TriggerScope::Own)
}

const fn hand(moment: TriggerMoment) -> DeclaredTrigger {
    DeclaredTrigger::new(moment, crate::triggers::TriggerScope::Hand)
}

const fn any(moment: TriggerMoment) -> DeclaredTrigger {
    DeclaredTrigger::new(moment, crate::triggers::TriggerScope::Any)
}

use AbilityId as A;
use Rarity::{Common, Epic, Legendary, Rare, Uncommon};
use TriggerMoment as T;

const ENTRIES: &[Entry] = &[
    // Norse
    entry(1, "Thor", "Norse", [7, 5, 4, 5], Legendary, Some((A::ThunderStrike, own(T::OnPlace), "The strongest adjacent enemy permanently loses 1 power on every edge."))),
    entry(2, "Odin", "Norse", [6, 6, 5, 5], Legendary, Some((A::AllFather, own(T::OnPlace), "Other allied Norse cards on the board gain 1 power permanently."))),
    entry(3, "Loki", "Norse", [4, 5, 4, 3], Epic, Some((A::Trickster, own(T::OnPlace), "Half the time, steals a random adjacent enemy."))),
    entry(4, "Fenrir", "Norse", [6, 4, 3, 5], Epic, Some((A::Ravenous, own(T::OnFlip), "Gains 1 power permanently for every card it flips."))),
    entry(5, "Jormungandr", "Norse", [5, 5, 5, 3], Epic, Some((A::WorldSerpent, own(T::OnFlip), "Every card it flips attacks its own neighbors."))),
    entry(6, "Heimdall", "Norse", [4, 4, 6, 4], Rare, Some((A::Gjallarhorn, own(T::OnPlace), "Adjacent allies resist debuffs for 2 turns. Saves an adjacent ally from defeat at the cost of 1 power."))),
    entry(7, "Valkyrie", "Norse", [3, 4, 3, 4], Uncommon, Some((A::ChooserOfTheSlain, hand(T::OnFlipped), "While in hand, gains 1 power whenever an allied card is flipped."))),
    entry(8, "Hel", "Norse", [3, 3, 4, 4], Rare, Some((A::QueenOfTheDead, own(T::OnPlace), "Gains 1 power per card in your discard pile (max 3), plus 1 next to Fenrir."))),
    entry(9, "Baldr", "Norse", [4, 4, 4, 4], Rare, Some((A::Beloved, own(T::OnPlace), "Cannot be defeated for 2 turns."))),
    entry(10, "Skadi", "Norse", [5, 3, 4, 3], Uncommon, Some((A::WintersGrip, own(T::OnPlace), "Freezes adjacent empty tiles for 2 turns."))),
    // Greek
    entry(11, "Zeus", "Greek", [7, 6, 4, 5], Legendary, Some((A::WrathOfOlympus, any(T::OnFlipped), "Whenever an allied card is flipped, the attacker permanently loses 1 power."))),
    entry(12, "Athena", "Greek", [5, 5, 5, 5], Legendary, Some((A::Aegis, own(T::OnDefend), "Survives attacks that beat her by 1. Gains 1 power for 2 turns after defending."))),
    entry(13, "Hephaestus", "Greek", [4, 6, 4, 4], Rare, Some((A::Forge, own(T::OnPlace), "Adjacent allies cannot be flipped for 2 turns."))),
    entry(14, "Medusa", "Greek", [4, 5, 3, 4], Epic, Some((A::PetrifyingGaze, own(T::OnDefend), "An attacker she repels loses 2 power for 2 turns."))),
    entry(15, "Hades", "Greek", [6, 4, 5, 4], Legendary, Some((A::LordOfTheUnderworld, own(T::OnPlace), "Destroys the weakest weaker adjacent enemy and curses its tile."))),
    entry(16, "Apollo", "Greek", [5, 4, 4, 5], Epic, Some((A::Radiance, own(T::OnTurnEnd), "At the end of each turn, adjacent allies gain 1 power for a turn."))),
    entry(17, "Ares", "Greek", [5, 5, 3, 3], Rare, Some((A::GodOfWar, own(T::BeforeCombat), "Gains 1 power for the turn per adjacent enemy before fighting."))),
    entry(18, "Hermes", "Greek", [3, 4, 3, 4], Uncommon, Some((A::Messenger, own(T::OnPlace), "Draw a card."))),
    entry(19, "Demeter", "Greek", [3, 4, 4, 3], Rare, Some((A::Harvest, own(T::OnPlace), "Blesses adjacent empty tiles: your next card there gains 1 power."))),
    entry(20, "Persephone", "Greek", [3, 3, 3, 3], Rare, Some((A::SpringsReturn, hand(T::OnTurnStart), "While in hand, gains 1 power at the start of your turn (max 3)."))),
    entry(21, "Nemesis", "Greek", [4, 4, 3, 3], Epic, Some((A::Retribution, own(T::OnPlace), "Gains 1 power per card of yours the opponent controls (max 3)."))),
    // Japanese
    entry(22, "Amaterasu", "Japanese", [6, 5, 5, 6], Legendary, Some((A::Dawn, own(T::OnRoundStart), "At the start of each round, gains 1 power for the round."))),
    entry(23, "Susanoo", "Japanese", [6, 6, 4, 3], Legendary, Some((A::StormBlade, own(T::AfterCombat), "Flanked adjacent enemies have a 50% chance to be flipped."))),
    entry(24, "Kitsune", "Japanese", [3, 3, 3, 3], Rare, Some((A::FoxFire, own(T::OnPlace), "Gains 2 power in a corner, 1 on an edge."))),
    entry(25, "Tengu", "Japanese", [4, 4, 4, 3], Rare, Some((A::Gust, own(T::OnPlace), "Blows the strongest adjacent enemy back to its owner's hand."))),
    entry(26, "Oni", "Japanese", [5, 3, 5, 3], Uncommon, Some((A::IronHide, own(T::OnDefend), "Gains 1 power permanently each time it defends."))),
    entry(27, "Ryujin", "Japanese", [5, 4, 5, 4], Epic, Some((A::Tide, any(T::OnPlace), "Enemy cards placed next to Ryujin lose 1 power for 2 turns."))),
    entry(28, "Raijin", "Japanese", [5, 5, 4, 4], Epic, Some((A::ThunderDrums, own(T::OnTurnEnd), "At the end of each turn, a random enemy loses 1 power for a turn."))),
    entry(29, "Inari", "Japanese", [3, 4, 4, 3], Rare, Some((A::RiceTithe, own(T::OnFlipped), "Whoever flips Inari discards a random card."))),
    // Egyptian
    entry(30, "Anubis", "Egyptian", [5, 5, 4, 4], Legendary, Some((A::WeigherOfHearts, own(T::OnPlace), "Adjacent enemies that have been defeated before lose 1 power permanently."))),
    entry(31, "Set", "Egyptian", [6, 4, 4, 4], Epic, Some((A::Chaos, own(T::OnPlace), "Removes a random empty tile for 3 turns."))),
    entry(32, "Isis", "Egyptian", [4, 5, 4, 5], Epic, Some((A::Protection, own(T::OnPlace), "Adjacent allies cannot be defeated this turn."))),
    entry(33, "Sekhmet", "Egyptian", [4, 4, 4, 4], Rare, Some((A::Bloodlust, hand(T::OnPlace), "While in hand, gains 1 power when you play an Egyptian card (max 3)."))),
    entry(34, "Thoth", "Egyptian", [3, 5, 3, 5], Rare, Some((A::Judgement, own(T::OnPlace), "Adjacent enemies lose their buffs and cannot be buffed for 2 turns."))),
    // Vanilla
    entry(101, "Einherjar", "Norse", [4, 3, 3, 4], Common, None),
    entry(102, "Hoplite", "Greek", [3, 4, 4, 3], Common, None),
    entry(103, "Ashigaru", "Japanese", [3, 3, 4, 4], Common, None),
    entry(104, "Scribe", "Egyptian", [2, 3, 3, 2], Common, None),
    entry(105, "Grey Wolf", "Norse", [3, 2, 1, 2], Common, None),
];

/// Build the catalog.
#[must_use]
pub fn sample_catalog() -> CardRegistry {
    let mut registry = CardRegistry::new();
    for entry in ENTRIES {
        let [top, right, bottom, left] = entry.power;
        let mut definition = CardDefinition::new(
            BaseCardId::new(entry.id),
            entry.name,
            PowerValues::new(top, right, bottom, left),
        )
        .with_tag(entry.tag)
        .with_rarity(entry.rarity)
        .with_attack_animation(format!("{}-strike", entry.tag.to_lowercase()));

        if entry.name == "Fenrir" || entry.name == "Grey Wolf" {
            definition = definition.with_tag("Beast");
        }
        if let Some((id, trigger, text)) = entry.ability {
            definition =
                definition.with_ability(AbilityDescriptor::new(id, &[trigger]).with_description(text));
        }
        registry.register(definition);
    }
    registry
}

/// A provider over [`sample_catalog`] with no instances yet.
#[must_use]
pub fn sample_provider() -> InMemoryCardProvider {
    InMemoryCardProvider::new(sample_catalog())
}

/// Base id of a catalog card by name.
#[must_use]
pub fn id_of(name: &str) -> Option<BaseCardId> {
    ENTRIES
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| BaseCardId::new(entry.id))
}

/// Base ids of every catalog card carrying `tag`, in id order.
#[must_use]
pub fn ids_tagged(tag: &str) -> Vec<BaseCardId> {
    ENTRIES
        .iter()
        .filter(|entry| entry.tag == tag)
        .map(|entry| BaseCardId::new(entry.id))
        .collect()
}
