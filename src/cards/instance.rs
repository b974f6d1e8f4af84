//! Card instances - runtime card state.
//!
//! `InGameCard` is one user's copy of a base card inside one match. It
//! shares the immutable [`CardDefinition`] through an `Arc` and carries
//! everything that changes during play: owner, effects, locks, the
//! defeat history and the cached `current_power`.
//!
//! ## Power cache
//!
//! `current_power` is derived. Every mutation of `power_enhancements` or
//! `temporary_effects` must be followed by [`InGameCard::recompute_power`];
//! the helpers in [`effects::mutation`](crate::effects::mutation) do this.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::CardDefinition;
use crate::abilities::AbilityDescriptor;
use crate::core::{BaseCardId, InstanceId, PlayerId};
use crate::effects::{compute_current_power, EffectKind, PowerDelta, PowerValues, TemporaryEffect};
use crate::triggers::DeclaredTrigger;

/// A record of the card that flipped this one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefeatRecord {
    pub attacker: InstanceId,
    pub attacker_base: BaseCardId,
    pub attacker_name: String,
}

/// A card in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InGameCard {
    pub instance_id: InstanceId,

    pub base_card_id: BaseCardId,

    pub definition: Arc<CardDefinition>,

    pub level: u32,

    pub xp: u32,

    /// Persisted upgrades.
    #[serde(default)]
    pub power_enhancements: PowerDelta,

    #[serde(default)]
    pub temporary_effects: SmallVec<[TemporaryEffect; 2]>,

    /// Derived; see the module docs.
    pub current_power: PowerValues,

    /// Current controller.
    pub owner: PlayerId,

    /// Seat the card was dealt to. Never changes.
    pub original_owner: PlayerId,

    /// While above zero the card cannot be flipped.
    #[serde(default)]
    pub locked_turns: u32,

    /// Who flipped this card, oldest first. Append-only.
    #[serde(default)]
    pub defeats: Vec<DefeatRecord>,
}

impl InGameCard {
    /// Create a fresh instance owned by `owner`.
    #[must_use]
    pub fn new(instance_id: InstanceId, definition: Arc<CardDefinition>, owner: PlayerId) -> Self {
        let mut card = Self {
            instance_id,
            base_card_id: definition.id,
            current_power: definition.base_power,
            definition,
            level: 1,
            xp: 0,
            power_enhancements: PowerDelta::default(),
            temporary_effects: SmallVec::new(),
            owner,
            original_owner: owner,
            locked_turns: 0,
            defeats: Vec::new(),
        };
        card.recompute_power();
        card
    }

    /// Set persisted upgrades (builder pattern).
    #[must_use]
    pub fn with_enhancements(mut self, enhancements: PowerDelta) -> Self {
        self.power_enhancements = enhancements;
        self.recompute_power();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.definition.has_tag(tag)
    }

    #[must_use]
    pub fn ability(&self) -> Option<&AbilityDescriptor> {
        self.definition.ability.as_ref()
    }

    /// Check if the card's ability listens for `trigger`.
    #[must_use]
    pub fn declares(&self, trigger: DeclaredTrigger) -> bool {
        self.ability().is_some_and(|ability| ability.declares(trigger))
    }

    /// Recompute `current_power` from base, enhancements and effects.
    pub fn recompute_power(&mut self) {
        self.current_power = compute_current_power(
            &self.definition.base_power,
            &self.power_enhancements,
            &self.temporary_effects,
        );
    }

    /// Edge-by-edge change from an earlier power reading.
    #[must_use]
    pub fn power_change_since(&self, before: &PowerValues) -> PowerDelta {
        PowerDelta::new(
            self.current_power.top - before.top,
            self.current_power.right - before.right,
            self.current_power.bottom - before.bottom,
            self.current_power.left - before.left,
        )
    }

    #[must_use]
    pub fn has_active_effect(&self, kind: EffectKind) -> bool {
        self.temporary_effects
            .iter()
            .any(|effect| effect.is_active_kind(kind))
    }

    /// Count active effects carrying `name`.
    #[must_use]
    pub fn effects_named(&self, name: &str) -> usize {
        self.temporary_effects
            .iter()
            .filter(|effect| effect.is_active() && effect.name.as_deref() == Some(name))
            .count()
    }

    /// Check if the card currently cannot be flipped.
    #[must_use]
    pub fn is_flip_immune(&self) -> bool {
        self.locked_turns > 0 || self.has_active_effect(EffectKind::BlockDefeat)
    }

    /// End-of-turn sweep: tick every effect and the lock by one turn.
    ///
    /// Returns whether anything changed.
    pub fn tick_effects(&mut self) -> bool {
        let had_effects = !self.temporary_effects.is_empty();
        let was_locked = self.locked_turns > 0;

        self.temporary_effects.retain(|effect| effect.tick());
        self.locked_turns = self.locked_turns.saturating_sub(1);
        self.recompute_power();

        had_effects || was_locked
    }
}
