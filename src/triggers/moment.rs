//! Trigger moments and their declared variants.
//!
//! A base [`TriggerMoment`] names a point in the turn/combat lifecycle.
//! Card data declares which moments an ability listens to, optionally
//! qualified by a [`TriggerScope`]:
//!
//! | Declared name     | Moment     | Scope  | Fires for                                  |
//! |-------------------|------------|--------|--------------------------------------------|
//! | `OnFlip`          | `OnFlip`   | `Own`  | the card that is itself flipping something |
//! | `HandOnFlipped`   | `OnFlipped`| `Hand` | the card while it sits in a hand           |
//! | `AnyOnPlace`      | `OnPlace`  | `Any`  | the card while on the board, for any card  |
//!
//! Variant names are resolved through [`DeclaredTrigger::from_name`], a
//! fixed table, so a misspelled name is rejected when card data is loaded.

use serde::{Deserialize, Serialize};

/// A point in the turn/combat lifecycle at which abilities may activate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriggerMoment {
    /// A card was placed on the board.
    OnPlace,
    /// A card is about to flip a neighbor.
    OnFlip,
    /// A card was just flipped to a new owner.
    OnFlipped,
    /// The placed card is about to scan its neighbors.
    BeforeCombat,
    /// The placed card finished its combat scan.
    AfterCombat,
    /// A card survived an attack.
    OnDefend,
    /// A seat's turn began.
    OnTurnStart,
    /// A seat's turn ended.
    OnTurnEnd,
    /// A round (one turn per seat) began.
    OnRoundStart,
    /// A round ended.
    OnRoundEnd,
}

impl TriggerMoment {
    /// Every moment, in declaration order.
    pub const ALL: [TriggerMoment; 10] = [
        TriggerMoment::OnPlace,
        TriggerMoment::OnFlip,
        TriggerMoment::OnFlipped,
        TriggerMoment::BeforeCombat,
        TriggerMoment::AfterCombat,
        TriggerMoment::OnDefend,
        TriggerMoment::OnTurnStart,
        TriggerMoment::OnTurnEnd,
        TriggerMoment::OnRoundStart,
        TriggerMoment::OnRoundEnd,
    ];

    /// Turn and round boundaries have no triggering card.
    #[must_use]
    pub fn is_lifecycle(self) -> bool {
        matches!(
            self,
            TriggerMoment::OnTurnStart
                | TriggerMoment::OnTurnEnd
                | TriggerMoment::OnRoundStart
                | TriggerMoment::OnRoundEnd
        )
    }

    /// Canonical name, as used in card data.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TriggerMoment::OnPlace => "OnPlace",
            TriggerMoment::OnFlip => "OnFlip",
            TriggerMoment::OnFlipped => "OnFlipped",
            TriggerMoment::BeforeCombat => "BeforeCombat",
            TriggerMoment::AfterCombat => "AfterCombat",
            TriggerMoment::OnDefend => "OnDefend",
            TriggerMoment::OnTurnStart => "OnTurnStart",
            TriggerMoment::OnTurnEnd => "OnTurnEnd",
            TriggerMoment::OnRoundStart => "OnRoundStart",
            TriggerMoment::OnRoundEnd => "OnRoundEnd",
        }
    }

    /// Look up a base moment by canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|moment| moment.name() == name)
    }

    /// The hand-held variant of this moment.
    #[must_use]
    pub fn in_hand(self) -> DeclaredTrigger {
        DeclaredTrigger::new(self, TriggerScope::Hand)
    }

    /// The board-wide variant of this moment.
    #[must_use]
    pub fn for_any(self) -> DeclaredTrigger {
        DeclaredTrigger::new(self, TriggerScope::Any)
    }

    /// The plain variant of this moment.
    #[must_use]
    pub fn own(self) -> DeclaredTrigger {
        DeclaredTrigger::new(self, TriggerScope::Own)
    }
}

impl std::fmt::Display for TriggerMoment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which cards a declared trigger listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriggerScope {
    /// The card's own action (or, for lifecycle moments, the card while on the board).
    Own,
    /// The card while it is held in a hand.
    Hand,
    /// The card while on the board, reacting to any card's action.
    Any,
}

/// Every declared trigger name card data may use.
const DECLARED_NAMES: [(&str, DeclaredTrigger); 30] = [
    ("OnPlace", DeclaredTrigger::new(TriggerMoment::OnPlace, TriggerScope::Own)),
    ("OnFlip", DeclaredTrigger::new(TriggerMoment::OnFlip, TriggerScope::Own)),
    ("OnFlipped", DeclaredTrigger::new(TriggerMoment::OnFlipped, TriggerScope::Own)),
    ("BeforeCombat", DeclaredTrigger::new(TriggerMoment::BeforeCombat, TriggerScope::Own)),
    ("AfterCombat", DeclaredTrigger::new(TriggerMoment::AfterCombat, TriggerScope::Own)),
    ("OnDefend", DeclaredTrigger::new(TriggerMoment::OnDefend, TriggerScope::Own)),
    ("OnTurnStart", DeclaredTrigger::new(TriggerMoment::OnTurnStart, TriggerScope::Own)),
    ("OnTurnEnd", DeclaredTrigger::new(TriggerMoment::OnTurnEnd, TriggerScope::Own)),
    ("OnRoundStart", DeclaredTrigger::new(TriggerMoment::OnRoundStart, TriggerScope::Own)),
    ("OnRoundEnd", DeclaredTrigger::new(TriggerMoment::OnRoundEnd, TriggerScope::Own)),
    ("HandOnPlace", DeclaredTrigger::new(TriggerMoment::OnPlace, TriggerScope::Hand)),
    ("HandOnFlip", DeclaredTrigger::new(TriggerMoment::OnFlip, TriggerScope::Hand)),
    ("HandOnFlipped", DeclaredTrigger::new(TriggerMoment::OnFlipped, TriggerScope::Hand)),
    ("HandBeforeCombat", DeclaredTrigger::new(TriggerMoment::BeforeCombat, TriggerScope::Hand)),
    ("HandAfterCombat", DeclaredTrigger::new(TriggerMoment::AfterCombat, TriggerScope::Hand)),
    ("HandOnDefend", DeclaredTrigger::new(TriggerMoment::OnDefend, TriggerScope::Hand)),
    ("HandOnTurnStart", DeclaredTrigger::new(TriggerMoment::OnTurnStart, TriggerScope::Hand)),
    ("HandOnTurnEnd", DeclaredTrigger::new(TriggerMoment::OnTurnEnd, TriggerScope::Hand)),
    ("HandOnRoundStart", DeclaredTrigger::new(TriggerMoment::OnRoundStart, TriggerScope::Hand)),
    ("HandOnRoundEnd", DeclaredTrigger::new(TriggerMoment::OnRoundEnd, TriggerScope::Hand)),
    ("AnyOnPlace", DeclaredTrigger::new(TriggerMoment::OnPlace, TriggerScope::Any)),
    ("AnyOnFlip", DeclaredTrigger::new(TriggerMoment::OnFlip, TriggerScope::Any)),
    ("AnyOnFlipped", DeclaredTrigger::new(TriggerMoment::OnFlipped, TriggerScope::Any)),
    ("AnyBeforeCombat", DeclaredTrigger::new(TriggerMoment::BeforeCombat, TriggerScope::Any)),
    ("AnyAfterCombat", DeclaredTrigger::new(TriggerMoment::AfterCombat, TriggerScope::Any)),
    ("AnyOnDefend", DeclaredTrigger::new(TriggerMoment::OnDefend, TriggerScope::Any)),
    ("AnyOnTurnStart", DeclaredTrigger::new(TriggerMoment::OnTurnStart, TriggerScope::Any)),
    ("AnyOnTurnEnd", DeclaredTrigger::new(TriggerMoment::OnTurnEnd, TriggerScope::Any)),
    ("AnyOnRoundStart", DeclaredTrigger::new(TriggerMoment::OnRoundStart, TriggerScope::Any)),
    ("AnyOnRoundEnd", DeclaredTrigger::new(TriggerMoment::OnRoundEnd, TriggerScope::Any)),
];

/// A trigger moment as declared by an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeclaredTrigger {
    pub moment: TriggerMoment,
    pub scope: TriggerScope,
}

impl DeclaredTrigger {
    /// Create a declared trigger.
    #[must_use]
    pub const fn new(moment: TriggerMoment, scope: TriggerScope) -> Self {
        Self { moment, scope }
    }

    /// Resolve a declared name such as `"HandOnFlip"` through the variant table.
    ///
    /// ```
    /// use mythic_triad::triggers::{DeclaredTrigger, TriggerMoment, TriggerScope};
    ///
    /// let declared = DeclaredTrigger::from_name("AnyOnPlace").unwrap();
    /// assert_eq!(declared.moment, TriggerMoment::OnPlace);
    /// assert_eq!(declared.scope, TriggerScope::Any);
    /// assert!(DeclaredTrigger::from_name("AnyOnPlcae").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        DECLARED_NAMES
            .iter()
            .find(|(declared, _)| *declared == name)
            .map(|(_, trigger)| *trigger)
    }

    /// The declared name, inverse of [`from_name`](Self::from_name).
    #[must_use]
    pub fn name(&self) -> &'static str {
        DECLARED_NAMES
            .iter()
            .find(|(_, trigger)| trigger == self)
            .map_or("", |(declared, _)| *declared)
    }
}

impl std::fmt::Display for DeclaredTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_name_resolves_back() {
        for moment in TriggerMoment::ALL {
            for declared in [moment.own(), moment.in_hand(), moment.for_any()] {
                assert_eq!(DeclaredTrigger::from_name(declared.name()), Some(declared));
            }
        }
    }

    #[test]
    fn test_name_table_is_complete() {
        let mut seen = std::collections::BTreeSet::new();
        for (name, trigger) in DECLARED_NAMES {
            assert!(seen.insert(trigger), "{} listed twice", name);
            assert!(name.ends_with(trigger.moment.name()));
        }
        assert_eq!(seen.len(), TriggerMoment::ALL.len() * 3);
        assert_eq!(TriggerMoment::OnDefend.in_hand().name(), "HandOnDefend");
    }

    #[test]
    fn test_lifecycle_moments() {
        assert!(TriggerMoment::OnTurnEnd.is_lifecycle());
        assert!(TriggerMoment::OnRoundStart.is_lifecycle());
        assert!(!TriggerMoment::OnPlace.is_lifecycle());
        assert!(!TriggerMoment::OnDefend.is_lifecycle());
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert!(DeclaredTrigger::from_name("OnExplode").is_none());
        assert!(DeclaredTrigger::from_name("HandAnyOnPlace").is_none());
        assert!(DeclaredTrigger::from_name("").is_none());
    }

    #[test]
    fn test_whitespace_tolerated() {
        assert_eq!(
            DeclaredTrigger::from_name(" HandOnFlipped "),
            Some(TriggerMoment::OnFlipped.in_hand())
        );
    }
}
