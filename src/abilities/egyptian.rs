//! Egyptian abilities.

use super::context::AbilityContext;
use super::id::AbilityId;
use super::table::AbilityTable;
use crate::board::{TileEffect, TileStatus};
use crate::effects::{EffectKind, PowerDelta};
use crate::triggers::GameEvent;

pub(super) fn register(table: &mut AbilityTable) {
    table.register(AbilityId::WeigherOfHearts, weigher_of_hearts);
    table.register(AbilityId::Chaos, chaos);
    table.register(AbilityId::Protection, protection);
    table.register(AbilityId::Bloodlust, bloodlust);
    table.register(AbilityId::Judgement, judgement);
}

/// Anubis: adjacent enemies that have lost a fight before lose 1 for good.
fn weigher_of_hearts(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let judged: Vec<_> = ctx
        .query()
        .adjacent_enemies(pos, ctx.owner())
        .into_iter()
        .filter(|(_, card)| !card.defeats.is_empty())
        .map(|(_, card)| card.instance_id)
        .collect();
    if judged.is_empty() {
        return Vec::new();
    }

    let mut events = vec![ctx.activated()];
    for target in judged {
        events.extend(ctx.debuff(target, PowerDelta::uniform(1)));
    }
    events
}

/// Set: a random empty tile is removed for 3 turns.
fn chaos(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let open: Vec<_> = ctx.state().board.open_positions().collect();
    let Some(tile) = ctx.rng().choose(&open).copied() else {
        return Vec::new();
    };

    let mut events = vec![ctx.activated()];
    events.extend(ctx.set_tile(tile, TileEffect::new(TileStatus::Removed, 3).with_animation("sandstorm")));
    events
}

/// Isis: adjacent allies cannot be defeated until the turn ends.
fn protection(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
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
        ctx.add_status(ally, EffectKind::BlockDefeat, 1);
    }
    events
}

/// Sekhmet, from hand: +1 whenever the owner plays an Egyptian card, up to 3.
fn bloodlust(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let owner = ctx.owner();
    let source = ctx.source();
    let Some(placed) = ctx.trigger().card.filter(|id| *id != source) else {
        return Vec::new();
    };
    let egyptian = ctx
        .card(placed)
        .is_some_and(|card| card.owner == owner && card.has_tag("Egyptian"));
    if !egyptian {
        return Vec::new();
    }
    let name = ctx.ability().name();
    if ctx.source_card().map_or(0, |card| card.effects_named(name)) >= 3 {
        return Vec::new();
    }

    let mut events = vec![ctx.activated()];
    events.extend(ctx.buff(source, PowerDelta::uniform(1)));
    events
}

/// Thoth: adjacent enemies lose every buff and cannot gain new ones for 2 turns.
fn judgement(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
    let Some(pos) = ctx.source_position() else {
        return Vec::new();
    };
    let enemies: Vec<_> = ctx
        .query()
        .adjacent_enemies(pos, ctx.owner())
        .into_iter()
        .map(|(_, card)| card.instance_id)
        .collect();
    if enemies.is_empty() {
        return Vec::new();
    }

    let mut events = vec![ctx.activated()];
    for target in enemies {
        events.extend(ctx.strip_buffs(target));
        ctx.add_status(target, EffectKind::BlockBuff, 2);
    }
    events
}
