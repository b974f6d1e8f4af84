//! Norse abilities.

use super::context::AbilityContext;
use super::id::AbilityId;
use super::table::AbilityTable;
use crate::board::{CardFilter, TileEffect, TileStatus};
use crate::combat::{CombatRequest, Interception};
use crate::effects::{EffectKind, PowerDelta};
use crate::triggers::GameEvent;

pub(super) fn register(table: &mut AbilityTable) {
    table.register(AbilityId::ThunderStrike, thunder_strike);
    table.register(AbilityId::AllFather, all_father);
    table.register(AbilityId::Trickster, trickster);
    table.register(AbilityId::Ravenous, ravenous);
    table.register(AbilityId::WorldSerpent, world_serpent);
    table.register_with_interceptor(AbilityId::Gjallarhorn, gjallarhorn, gjallarhorn_guard);
    table.register(AbilityId::ChooserOfTheSlain, chooser_of_the_slain);
    table.register(AbilityId::QueenOfTheDead, queen_of_the_dead);
    table.register(AbilityId::Beloved, beloved);
    table.register(AbilityId::WintersGrip, winters_grip);
}

/// Thor: the strongest adjacent enemy loses 1 on every edge for good.
fn thunder_strike(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let Some(target) = ctx
        .query()
        .strongest_adjacent_enemy(pos, ctx.owner())
        .map(|(_, card)| card.instance_id)
    else {
        return Vec::new();
    };

    let mut events = vec![ctx.activated()];
    events.extend(ctx.debuff(target, PowerDelta::uniform(1)));
    events
}

/// Odin: every other allied Norse card on the board gains 1.
fn all_father(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let source = ctx.source();
    let filter = CardFilter::allies_of(ctx.owner()).with_tag("Norse");
    let targets: Vec<_> = ctx
        .query()
        .all_cards(&filter)
        .into_iter()
        .map(|(_, card)| card.instance_id)
        .filter(|id| *id != source)
        .collect();
    if targets.is_empty() {
        return Vec::new();
    }

    let mut events = vec![ctx.activated()];
    for target in targets {
        events.extend(ctx.buff(target, PowerDelta::uniform(1)));
    }
    events
}

/// Loki: half the time, take a random adjacent enemy.
fn trickster(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let enemies: Vec<_> = ctx
        .query()
        .adjacent_enemies(pos, ctx.owner())
        .into_iter()
        .filter(|(_, card)| !card.is_flip_immune())
        .map(|(_, card)| card.instance_id)
        .collect();
    if enemies.is_empty() || !ctx.rng().gen_bool(0.5) {
        return Vec::new();
    }
    let Some(target) = ctx.rng().choose(&enemies).copied() else {
        return Vec::new();
    };

    let mut events = vec![ctx.activated()];
    events.extend(ctx.take_control(target));
    events
}

/// Fenrir: +1 for every card it flips.
fn ravenous(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let source = ctx.source();
    let mut events = vec![ctx.activated()];
    events.extend(ctx.buff(source, PowerDelta::uniform(1)));
    events
}

/// Jormungandr: the card about to be flipped attacks its own neighbors.
fn world_serpent(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(from) = ctx.trigger().counterpart_position else {
        return Vec::new();
    };
    ctx.request(CombatRequest::ChainAttack { from });
    vec![ctx.activated()]
}

/// Heimdall: adjacent allies shrug off debuffs for 2 turns.
fn gjallarhorn(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
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
        ctx.add_status(ally, EffectKind::BlockDebuff, 2);
    }
    events
}

/// Heimdall takes a hit for an adjacent ally, losing 1 power.
fn gjallarhorn_guard(ctx: &mut AbilityContext<'_>, hit: &Interception) -> Option<Vec<GameEvent>> {
    let source = ctx.source();
    if hit.defender == source {
        return None;
    }
    let pos = ctx.source_position()?;
    if !pos.adjacent().iter().any(|(_, p)| *p == hit.defender_position) {
        return None;
    }
    let heimdall = ctx.source_card()?;
    if heimdall.has_active_effect(EffectKind::BlockDebuff) || heimdall.current_power.total() == 0 {
        return None;
    }

    let mut events = vec![ctx.activated()];
    events.extend(ctx.debuff(source, PowerDelta::uniform(1)));
    events.push(ctx.defended(hit.defender, hit.attacker));
    Some(events)
}

/// Valkyrie, from hand: +1 whenever an allied card is flipped.
fn chooser_of_the_slain(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    // The flipping seat is the trigger's player.
    if ctx.trigger().player == ctx.owner() {
        return Vec::new();
    }
    let source = ctx.source();
    let mut events = vec![ctx.activated()];
    events.extend(ctx.buff(source, PowerDelta::uniform(1)));
    events
}

/// Hel: +1 per card in the owner's discard pile (at most 3), +1 more
/// beside an allied Fenrir.
fn queen_of_the_dead(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let owner = ctx.owner();
    let discarded = ctx.state().player(owner).discard_pile.len().min(3);
    let beside_fenrir = ctx
        .query()
        .adjacent_allies(pos, owner)
        .iter()
        .any(|(_, card)| card.name() == "Fenrir");
    let bonus = i32::try_from(discarded).unwrap_or(3) + i32::from(beside_fenrir);
    if bonus == 0 {
        return Vec::new();
    }

    let source = ctx.source();
    let mut events = vec![ctx.activated()];
    events.extend(ctx.buff(source, PowerDelta::uniform(bonus)));
    events
}

/// Baldr: cannot be defeated for 2 turns.
fn beloved(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let source = ctx.source();
    let events = vec![ctx.activated()];
    ctx.add_status(source, EffectKind::BlockDefeat, 2);
    events
}

/// Skadi: adjacent empty tiles are blocked for 2 turns.
fn winters_grip(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let open = ctx.query().adjacent_open(pos);
    if open.is_empty() {
        return Vec::new();
    }

    let mut events = vec![ctx.activated()];
    for tile in open {
        let effect = TileEffect::new(TileStatus::Blocked, 2).with_animation("frost");
        events.extend(ctx.set_tile(tile, effect));
    }
    events
}
