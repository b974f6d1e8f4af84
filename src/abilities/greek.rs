//! Greek abilities.

use super::context::AbilityContext;
use super::id::AbilityId;
use super::table::AbilityTable;
use crate::board::{TileEffect, TileStatus};
use crate::combat::Interception;
use crate::effects::PowerDelta;
use crate::triggers::GameEvent;

pub(super) fn register(table: &mut AbilityTable) {
    table.register(AbilityId::WrathOfOlympus, wrath_of_olympus);
    table.register_with_interceptor(AbilityId::Aegis, aegis, aegis_guard);
    table.register(AbilityId::Forge, forge);
    table.register(AbilityId::PetrifyingGaze, petrifying_gaze);
    table.register(AbilityId::LordOfTheUnderworld, lord_of_the_underworld);
    table.register(AbilityId::Radiance, radiance);
    table.register(AbilityId::GodOfWar, god_of_war);
    table.register(AbilityId::Messenger, messenger);
    table.register(AbilityId::Harvest, harvest);
    table.register(AbilityId::SpringsReturn, springs_return);
    table.register(AbilityId::Retribution, retribution);
}

/// Zeus, watching the board: whoever flips an allied card loses 1 for good.
fn wrath_of_olympus(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let owner = ctx.owner();
    let trigger = *ctx.trigger();
    if trigger.player == owner {
        return Vec::new();
    }
    let Some(attacker) = trigger
        .counterpart
        .filter(|id| ctx.card(*id).is_some_and(|card| card.owner != owner))
    else {
        return Vec::new();
    };

    let mut events = vec![ctx.activated()];
    events.extend(ctx.debuff(attacker, PowerDelta::uniform(1)));
    events
}

/// Athena: +1 for 2 turns after holding against an attack.
fn aegis(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let source = ctx.source();
    let mut events = vec![ctx.activated()];
    events.extend(ctx.temp_buff(source, PowerDelta::uniform(1), 2));
    events
}

/// Athena survives any attack that beats her by a single point.
fn aegis_guard(ctx: &mut AbilityContext<'_>, hit: &Interception) -> Option<Vec<GameEvent>> {
    if hit.defender != ctx.source() || hit.margin() > 1 {
        return None;
    }
    let activated = ctx.activated();
    Some(vec![activated, ctx.defended(hit.defender, hit.attacker)])
}

/// Hephaestus: adjacent allies are locked for 2 turns.
fn forge(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let allies: Vec<_> = ctx
        .query()
        .adjacent_allies(pos, ctx.owner())
        .into_iter()
        .map(|(_, card)| card.instance_id)
        .collect();
    if allies.is_empty() {
        return Vec::new();
    }

    let events = vec![ctx.activated()];
    for ally in allies {
        ctx.lock(ally, 2);
    }
    events
}

/// Medusa: a repelled attacker loses 2 for 2 turns.
fn petrifying_gaze(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(attacker) = ctx.trigger().counterpart else {
        return Vec::new();
    };
    let mut events = vec![ctx.activated()];
    events.extend(ctx.temp_debuff(attacker, PowerDelta::uniform(2), 2));
    events
}

/// Hades: destroys the weakest adjacent enemy if it is weaker than him,
/// then curses the empty tile.
fn lord_of_the_underworld(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let Some(own_total) = ctx.source_card().map(|card| card.current_power.total()) else {
        return Vec::new();
    };
    let Some(target) = ctx
        .query()
        .weakest_adjacent_enemy(pos, ctx.owner())
        .filter(|(_, card)| card.current_power.total() < own_total && !card.is_flip_immune())
        .map(|(target, _)| target)
    else {
        return Vec::new();
    };

    let mut events = vec![ctx.activated()];
    events.extend(ctx.destroy(target));
    let curse = TileEffect::new(TileStatus::Cursed, 3)
        .with_power(PowerDelta::uniform(-1))
        .with_animation("underworld");
    events.extend(ctx.set_tile(target, curse));
    events
}

/// Apollo, at turn end: adjacent allies gain 1 for a turn.
fn radiance(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let allies: Vec<_> = ctx
        .query()
        .adjacent_allies(pos, ctx.owner())
        .into_iter()
        .map(|(_, card)| card.instance_id)
        .collect();
    if allies.is_empty() {
        return Vec::new();
    }

    let mut events = vec![ctx.activated()];
    for ally in allies {
        events.extend(ctx.temp_buff(ally, PowerDelta::uniform(1), 1));
    }
    events
}

/// Ares: before fighting, +1 for the turn per adjacent enemy.
fn god_of_war(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let enemies = ctx.query().adjacent_enemies(pos, ctx.owner()).len();
    if enemies == 0 {
        return Vec::new();
    }

    let source = ctx.source();
    let bonus = i32::try_from(enemies).unwrap_or(4);
    let mut events = vec![ctx.activated()];
    events.extend(ctx.temp_buff(source, PowerDelta::uniform(bonus), 1));
    events
}

/// Hermes: draw a card.
fn messenger(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let owner = ctx.owner();
    let mut events = vec![ctx.activated()];
    events.extend(ctx.draw(owner));
    events
}

/// Demeter: adjacent empty tiles hand the owner's next card there +1.
fn harvest(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let open = ctx.query().adjacent_open(pos);
    if open.is_empty() {
        return Vec::new();
    }

    let owner = ctx.owner();
    let mut events = vec![ctx.activated()];
    for tile in open {
        let blessing = TileEffect::new(TileStatus::Boosted, 3)
            .with_power(PowerDelta::uniform(1))
            .for_player(owner)
            .with_animation("harvest");
        events.extend(ctx.set_tile(tile, blessing));
    }
    events
}

/// Persephone, from hand: +1 at the start of each of the owner's turns, up to 3.
fn springs_return(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    if ctx.trigger().player != ctx.owner() {
        return Vec::new();
    }
    let name = ctx.ability().name();
    let stacks = ctx.source_card().map_or(0, |card| card.effects_named(name));
    if stacks >= 3 {
        return Vec::new();
    }

    let source = ctx.source();
    let mut events = vec![ctx.activated()];
    events.extend(ctx.buff(source, PowerDelta::uniform(1)));
    events
}

/// Nemesis: +1 per card of the owner's that the opponent now controls, up to 3.
fn retribution(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let owner = ctx.owner();
    let taken = ctx
        .state()
        .cards
        .values()
        .filter(|card| card.original_owner == owner && card.owner != owner)
        .count()
        .min(3);
    if taken == 0 {
        return Vec::new();
    }

    let source = ctx.source();
    let bonus = i32::try_from(taken).unwrap_or(3);
    let mut events = vec![ctx.activated()];
    events.extend(ctx.buff(source, PowerDelta::uniform(bonus)));
    events
}
