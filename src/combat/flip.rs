//! The flip procedure.

use crate::abilities::AbilityTable;
use crate::board::BoardPosition;
use crate::cards::DefeatRecord;
use crate::core::{InstanceId, MatchState, PlayerId};
use crate::triggers::{self, EventKind, GameEvent, Trigger, TriggerMoment};

use super::request::CombatRequest;

/// Flip `defender` (on `position`) to `player`, credited to `attacker`.
///
/// Does nothing if the defender is locked or protected by `BlockDefeat`,
/// or if `attacker` is not a card of this match.
/// Otherwise fires `OnFlip` on the attacker, transfers ownership, records
/// the defeat, emits `CardFlipped`, then fires `OnFlipped` on the
/// defender under its new owner.
pub fn flip_card(
    state: &mut MatchState,
    abilities: &AbilityTable,
    position: BoardPosition,
    defender: InstanceId,
    attacker: InstanceId,
    player: PlayerId,
    requests: &mut Vec<CombatRequest>,
) -> Vec<GameEvent> {
    let Some(card) = state.card(defender) else {
        return Vec::new();
    };
    if card.is_flip_immune() {
        return Vec::new();
    }
    let Some((attacker_base, attacker_name, animation)) = state.card(attacker).map(|card| {
        (
            card.base_card_id,
            card.name().to_string(),
            card.definition.attack_animation.clone(),
        )
    }) else {
        log::debug!("flip of {} by unknown card {} ignored", defender, attacker);
        return Vec::new();
    };

    let attacker_position = state.board.position_of(attacker);
    let on_flip = Trigger::card(TriggerMoment::OnFlip, attacker, attacker_position, player)
        .with_counterpart(defender, Some(position));
    let mut events = triggers::fire(state, abilities, on_flip, requests);

    // OnFlip handlers may have moved the defender or already taken it.
    if state.board.card_at(position) != Some(defender) {
        return events;
    }

    let Some(card) = state.card_mut(defender) else {
        return events;
    };
    if card.owner == player {
        return events;
    }
    card.owner = player;
    card.defeats.push(DefeatRecord {
        attacker,
        attacker_base,
        attacker_name,
    });

    log::debug!("{} flips {} at {} for {}", attacker, defender, position, player);
    events.push(
        state
            .event(EventKind::CardFlipped { attacker })
            .with_card(defender)
            .at(position)
            .with_animation(animation),
    );

    let on_flipped = Trigger::card(TriggerMoment::OnFlipped, defender, Some(position), player)
        .with_counterpart(attacker, attacker_position);
    events.extend(triggers::fire(state, abilities, on_flipped, requests));
    events
}
