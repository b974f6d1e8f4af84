//! Japanese abilities.

use super::context::AbilityContext;
use super::id::AbilityId;
use super::table::AbilityTable;
use crate::board::CardFilter;
use crate::combat::CombatRequest;
use crate::effects::PowerDelta;
use crate::triggers::GameEvent;

pub(super) fn register(table: &mut AbilityTable) {
    table.register(AbilityId::Dawn, dawn);
    table.register(AbilityId::StormBlade, storm_blade);
    table.register(AbilityId::FoxFire, fox_fire);
    table.register(AbilityId::Gust, gust);
    table.register(AbilityId::IronHide, iron_hide);
    table.register(AbilityId::Tide, tide);
    table.register(AbilityId::ThunderDrums, thunder_drums);
    table.register(AbilityId::RiceTithe, rice_tithe);
}

/// Amaterasu: +1 for the round.
fn dawn(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let source = ctx.source();
    let mut events = vec![ctx.activated()];
    events.extend(ctx.temp_buff(source, PowerDelta::uniform(1), 2));
    events
}

/// Susanoo: each adjacent enemy caught between two of its own enemies
/// has an even chance of being flipped.
fn storm_blade(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let flanked: Vec<_> = {
        let query = ctx.query();
        query
            .adjacent_enemies(pos, ctx.owner())
            .into_iter()
            .filter(|(at, card)| query.is_flanked_by_enemies(*at, card.owner))
            .map(|(at, _)| at)
            .collect()
    };

    let source = ctx.source();
    let mut struck = Vec::new();
    for position in flanked {
        if ctx.rng().gen_bool(0.5) {
            struck.push(position);
        }
    }
    if struck.is_empty() {
        return Vec::new();
    }

    for position in struck {
        ctx.request(CombatRequest::ForcedFlip { position, by: source });
    }
    vec![ctx.activated()]
}

/// Kitsune: +2 in a corner, +1 on any other edge cell.
fn fox_fire(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let bonus = if pos.is_corner() {
        2
    } else if pos.is_edge() {
        1
    } else {
        return Vec::new();
    };

    let source = ctx.source();
    let mut events = vec![ctx.activated()];
    events.extend(ctx.buff(source, PowerDelta::uniform(bonus)));
    events
}

/// Tengu: the strongest adjacent enemy goes back to its owner's hand.
fn gust(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let Some((target, home)) = ctx
        .query()
        .strongest_adjacent_enemy(pos, ctx.owner())
        .filter(|(_, card)| !card.is_flip_immune())
        .map(|(at, card)| (at, card.original_owner))
    else {
        return Vec::new();
    };
    let state = ctx.state();
    if state.player(home).hand.len() >= state.max_cards_in_hand {
        return Vec::new();
    }

    let mut events = vec![ctx.activated()];
    events.extend(ctx.return_to_hand(target));
    events
}

/// Oni: +1 for good every time it holds.
fn iron_hide(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let source = ctx.source();
    let mut events = vec![ctx.activated()];
    events.extend(ctx.buff(source, PowerDelta::uniform(1)));
    events
}

/// Ryujin, watching the board: an enemy placed next to it loses 1 for 2 turns.
fn tide(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let (Some(placed), Some(at)) = (ctx.trigger().card, ctx.trigger().position) else {
        return Vec::new();
    };
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let owner = ctx.owner();
    let is_enemy = ctx.card(placed).is_some_and(|card| card.owner != owner);
    let is_adjacent = pos.adjacent().iter().any(|(_, p)| *p == at);
    if !is_enemy || !is_adjacent {
        return Vec::new();
    }

    let mut events = vec![ctx.activated()];
    events.extend(ctx.temp_debuff(placed, PowerDelta::uniform(1), 2));
    events
}

/// Raijin, at turn end: a random enemy on the board loses 1 for a turn.
fn thunder_drums(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let enemies: Vec<_> = ctx
        .query()
        .all_cards(&CardFilter::enemies_of(ctx.owner()))
        .into_iter()
        .map(|(_, card)| card.instance_id)
        .collect();
    let Some(target) = ctx.rng().choose(&enemies).copied() else {
        return Vec::new();
    };

    let mut events = vec![ctx.activated()];
    events.extend(ctx.temp_debuff(target, PowerDelta::uniform(1), 1));
    events
}

/// Inari, once flipped: the new owner discards a random card.
fn rice_tithe(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let taker = ctx.trigger().player;
    if ctx.state().player(taker).hand.is_empty() {
        return Vec::new();
    }
    let mut events = vec![ctx.activated()];
    events.extend(ctx.discard_random(taker));
    events
}
