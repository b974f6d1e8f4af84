//! Effect-mutation helpers used by the ability table.
//!
//! All helpers push a [`TemporaryEffect`] onto the card and recompute its
//! power. "Permanent" buffs are temporary effects with the
//! [`PERMANENT_DURATION`] sentinel. Each helper returns the change actually
//! observed on `current_power`, which is zero when the effect was blocked
//! or clamped away.

use super::effect::{EffectKind, TemporaryEffect};
use super::power::PowerDelta;
use crate::cards::InGameCard;
use crate::core::PERMANENT_DURATION;

/// Add a buff lasting `duration` turns.
///
/// Rejected while the card carries an active `BlockBuff`.
pub fn add_temp_buff(
    card: &mut InGameCard,
    power: PowerDelta,
    duration: u32,
    name: &str,
) -> PowerDelta {
    if card.has_active_effect(EffectKind::BlockBuff) {
        log::trace!("{} blocks buff '{}'", card.instance_id, name);
        return PowerDelta::default();
    }
    push_effect(card, TemporaryEffect::buff(power, duration).named(name))
}

/// Add a debuff lasting `duration` turns.
///
/// `power` may be given as magnitudes or as negative values; every edge is
/// stored as a reduction. Rejected while the card carries an active `BlockDebuff`.
pub fn add_temp_debuff(
    card: &mut InGameCard,
    power: PowerDelta,
    duration: u32,
    name: &str,
) -> PowerDelta {
    if card.has_active_effect(EffectKind::BlockDebuff) {
        log::trace!("{} blocks debuff '{}'", card.instance_id, name);
        return PowerDelta::default();
    }
    let reduction = PowerDelta::new(
        -power.top.abs(),
        -power.right.abs(),
        -power.bottom.abs(),
        -power.left.abs(),
    );
    push_effect(card, TemporaryEffect::debuff(reduction, duration).named(name))
}

/// Add a buff that lasts for the rest of the match.
pub fn buff(card: &mut InGameCard, power: PowerDelta, name: &str) -> PowerDelta {
    add_temp_buff(card, power, PERMANENT_DURATION, name)
}

/// Add a debuff that lasts for the rest of the match.
pub fn debuff(card: &mut InGameCard, power: PowerDelta, name: &str) -> PowerDelta {
    add_temp_debuff(card, power, PERMANENT_DURATION, name)
}

/// Add a power-neutral effect such as `BlockDefeat` or `BlockBuff`.
pub fn add_status(card: &mut InGameCard, kind: EffectKind, duration: u32, name: &str) {
    card.temporary_effects
        .push(TemporaryEffect::new(kind, PowerDelta::default(), duration).named(name));
}

/// Remove every active buff from a card. Returns the power change.
pub fn strip_buffs(card: &mut InGameCard) -> PowerDelta {
    let before = card.current_power;
    card.temporary_effects
        .retain(|effect| !matches!(effect.kind, EffectKind::Buff | EffectKind::TilePowerBonus));
    card.recompute_power();
    card.power_change_since(&before)
}

fn push_effect(card: &mut InGameCard, effect: TemporaryEffect) -> PowerDelta {
    let before = card.current_power;
    card.temporary_effects.push(effect);
    card.recompute_power();
    card.power_change_since(&before)
}
