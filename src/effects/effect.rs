//! Temporary effect definitions.
//!
//! Temporary effects are the only way abilities change a card's numbers
//! during a match. Each carries its own countdown; the end-of-turn sweep
//! ticks every effect by one and drops those that reach zero.

use serde::{Deserialize, Serialize};

use super::power::PowerDelta;

/// What a temporary effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Raises power.
    Buff,
    /// Lowers power.
    Debuff,
    /// While active, new debuffs are rejected.
    BlockDebuff,
    /// While active, new buffs are rejected.
    BlockBuff,
    /// While active, the card cannot be flipped.
    BlockDefeat,
    /// Power transferred from a tile when the card was placed on it.
    TilePowerBonus,
}

/// A power change (or protection) with a remaining duration in turns.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporaryEffect {
    /// Effect type.
    #[serde(rename = "type")]
    pub kind: EffectKind,

    /// Per-edge power change while active.
    #[serde(default)]
    pub power: PowerDelta,

    /// Turns remaining. Removed when it reaches 0.
    pub duration: u32,

    /// Display name, usually the ability that created it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Opaque payload for the presentation layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl TemporaryEffect {
    /// Create an effect.
    #[must_use]
    pub fn new(kind: EffectKind, power: PowerDelta, duration: u32) -> Self {
        Self {
            kind,
            power,
            duration,
            name: None,
            data: None,
        }
    }

    /// Create a buff.
    #[must_use]
    pub fn buff(power: PowerDelta, duration: u32) -> Self {
        Self::new(EffectKind::Buff, power, duration)
    }

    /// Create a debuff. Pass negative edge values.
    #[must_use]
    pub fn debuff(power: PowerDelta, duration: u32) -> Self {
        Self::new(EffectKind::Debuff, power, duration)
    }

    /// Create a flip immunity effect.
    #[must_use]
    pub fn block_defeat(duration: u32) -> Self {
        Self::new(EffectKind::BlockDefeat, PowerDelta::default(), duration)
    }

    /// Attach a display name (builder pattern).
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach opaque presentation data (builder pattern).
    #[must_use]
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Check if the effect still applies.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.duration > 0
    }

    /// Check if this is an active effect of the given kind.
    #[must_use]
    pub fn is_active_kind(&self, kind: EffectKind) -> bool {
        self.kind == kind && self.is_active()
    }

    /// Advance one turn. Returns whether the effect survives.
    pub fn tick(&mut self) -> bool {
        self.duration = self.duration.saturating_sub(1);
        self.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let buff = TemporaryEffect::buff(PowerDelta::uniform(1), 2).named("Radiance");
        assert_eq!(buff.kind, EffectKind::Buff);
        assert_eq!(buff.duration, 2);
        assert_eq!(buff.name.as_deref(), Some("Radiance"));

        let shield = TemporaryEffect::block_defeat(3);
        assert!(shield.is_active_kind(EffectKind::BlockDefeat));
        assert!(shield.power.is_zero());
    }

    #[test]
    fn test_tick_counts_down() {
        let mut effect = TemporaryEffect::debuff(PowerDelta::uniform(-1), 2);
        assert!(effect.tick());
        assert_eq!(effect.duration, 1);
        assert!(!effect.tick());
        assert_eq!(effect.duration, 0);
        assert!(!effect.tick());
        assert_eq!(effect.duration, 0);
    }

    #[test]
    fn test_serialized_type_field() {
        let effect = TemporaryEffect::block_defeat(2);
        let json = serde_json::to_string(&effect).unwrap();
        assert!(json.contains(r#""type":"BlockDefeat""#));

        let parsed: TemporaryEffect =
            serde_json::from_str(r#"{"type":"Buff","power":{"left":2},"duration":1}"#).unwrap();
        assert_eq!(parsed.power, PowerDelta::new(0, 0, 0, 2));
        assert!(parsed.name.is_none());
    }
}
