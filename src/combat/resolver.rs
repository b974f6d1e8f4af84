//! Adjacency combat.
//!
//! ## Resolution order
//!
//! ```text
//! BeforeCombat
//! for direction in up, right, down, left:
//!     enemy neighbor on an enabled cell?
//!     attack edge > defense edge
//!         immune defender          -> defended, OnDefend
//!         interceptor saves it     -> interceptor's events
//!         otherwise                -> flip
//!     attack edge <= defense edge  -> defended, OnDefend
//! drain combat requests
//! AfterCombat
//! drain combat requests
//! ```
//!
//! A card's edge facing a direction fights the neighbor's opposite edge:
//! top against bottom, right against left. Edges are read from
//! `current_power` at the moment of comparison, so effects applied
//! earlier in the same resolution count.

use crate::abilities::AbilityTable;
use crate::board::{BoardPosition, Direction};
use crate::core::{InstanceId, MatchState, PlayerId};
use crate::triggers::{self, EventKind, GameEvent, Trigger, TriggerMoment};

use super::flip::flip_card;
use super::request::{CombatRequest, Interception};

/// Resolve combat for the card just placed at `position` by `player`.
pub fn resolve_combat(
    state: &mut MatchState,
    abilities: &AbilityTable,
    position: BoardPosition,
    player: PlayerId,
) -> Vec<GameEvent> {
    resolve_combat_queued(state, abilities, position, player, Vec::new())
}

/// [`resolve_combat`] with requests already queued, typically by `OnPlace`
/// handlers. They are drained together with those raised by the scan.
pub(crate) fn resolve_combat_queued(
    state: &mut MatchState,
    abilities: &AbilityTable,
    position: BoardPosition,
    player: PlayerId,
    mut requests: Vec<CombatRequest>,
) -> Vec<GameEvent> {
    let Some(placed) = state.board.card_at(position) else {
        return Vec::new();
    };
    let mut budget = state.max_chain_depth;
    let mut events = Vec::new();

    let before = Trigger::card(TriggerMoment::BeforeCombat, placed, Some(position), player);
    events.extend(triggers::fire(state, abilities, before, &mut requests));

    events.extend(attack_neighbors(state, abilities, position, player, &mut requests));
    events.extend(drain_requests(state, abilities, player, &mut requests, &mut budget));

    let after_position = state.board.position_of(placed);
    let after = Trigger::card(TriggerMoment::AfterCombat, placed, after_position, player);
    events.extend(triggers::fire(state, abilities, after, &mut requests));
    events.extend(drain_requests(state, abilities, player, &mut requests, &mut budget));

    events
}

/// Let the card at `position` attack each orthogonal enemy neighbor.
pub(crate) fn attack_neighbors(
    state: &mut MatchState,
    abilities: &AbilityTable,
    position: BoardPosition,
    player: PlayerId,
    requests: &mut Vec<CombatRequest>,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for direction in Direction::ALL {
        // Handlers may move or remove the attacker mid-scan.
        let Some(attacker) = state.board.card_at(position) else {
            break;
        };
        let Some(target) = position.neighbor(direction) else {
            continue;
        };
        let cell = state.board.cell(target);
        if cell.is_disabled() {
            continue;
        }
        let Some(defender) = cell.card else {
            continue;
        };
        let (Some(attacker_card), Some(defender_card)) = (state.card(attacker), state.card(defender))
        else {
            debug_assert!(false, "board references an unhydrated card");
            continue;
        };
        if defender_card.owner == player {
            continue;
        }

        let attack = attacker_card.current_power.edge(direction);
        let defense = defender_card.current_power.edge(direction.opposite());
        let immune = defender_card.is_flip_immune();

        if attack <= defense || immune {
            events.extend(defend(state, abilities, target, defender, attacker, position, player, requests));
            continue;
        }

        let interception = Interception {
            attacker,
            attacker_position: position,
            defender,
            defender_position: target,
            direction,
            attack,
            defense,
        };
        if let Some(saved) = intercept(state, abilities, &interception, player, requests) {
            events.extend(saved);
            continue;
        }

        events.extend(flip_card(state, abilities, target, defender, attacker, player, requests));
    }

    events
}

#[allow(clippy::too_many_arguments)]
fn defend(
    state: &mut MatchState,
    abilities: &AbilityTable,
    position: BoardPosition,
    defender: InstanceId,
    attacker: InstanceId,
    attacker_position: BoardPosition,
    player: PlayerId,
    requests: &mut Vec<CombatRequest>,
) -> Vec<GameEvent> {
    log::trace!("{} holds against {}", defender, attacker);
    let mut events = vec![state
        .event(EventKind::CardDefended { attacker })
        .with_card(defender)
        .at(position)];

    let trigger = Trigger::card(TriggerMoment::OnDefend, defender, Some(position), player)
        .with_counterpart(attacker, Some(attacker_position));
    events.extend(triggers::fire(state, abilities, trigger, requests));
    events
}

/// Ask the defender, then its adjacent allies, whether to prevent defeat.
fn intercept(
    state: &mut MatchState,
    abilities: &AbilityTable,
    interception: &Interception,
    player: PlayerId,
    requests: &mut Vec<CombatRequest>,
) -> Option<Vec<GameEvent>> {
    let defender_owner = state.card(interception.defender)?.owner;
    let mut protectors = vec![interception.defender];
    protectors.extend(
        state
            .query()
            .adjacent_allies(interception.defender_position, defender_owner)
            .into_iter()
            .map(|(_, card)| card.instance_id),
    );

    let trigger = Trigger::card(
        TriggerMoment::OnDefend,
        interception.defender,
        Some(interception.defender_position),
        player,
    )
    .with_counterpart(interception.attacker, Some(interception.attacker_position));

    protectors
        .into_iter()
        .filter(|id| abilities.has_interceptor(state, *id))
        .collect::<Vec<_>>()
        .into_iter()
        .find_map(|protector| abilities.intercept(state, trigger, protector, interception, requests))
}

/// Process queued combat requests round by round until the queue is
/// empty or the chain budget is spent.
pub(crate) fn drain_requests(
    state: &mut MatchState,
    abilities: &AbilityTable,
    player: PlayerId,
    requests: &mut Vec<CombatRequest>,
    budget: &mut u32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    while !requests.is_empty() {
        if *budget == 0 {
            log::debug!("chain depth exhausted; dropping {} combat requests", requests.len());
            requests.clear();
            break;
        }
        *budget -= 1;

        let round = std::mem::take(requests);
        for request in round {
            match request {
                CombatRequest::ChainAttack { from } => {
                    let owned = state
                        .board
                        .card_at(from)
                        .and_then(|id| state.card(id))
                        .is_some_and(|card| card.owner == player);
                    if owned {
                        events.extend(attack_neighbors(state, abilities, from, player, requests));
                    }
                }
                CombatRequest::ForcedFlip { position, by } => {
                    let Some(target) = state.board.card_at(position) else {
                        continue;
                    };
                    let enemy = state.card(target).is_some_and(|card| card.owner != player);
                    if enemy && !state.board.cell(position).is_disabled() {
                        events.extend(flip_card(state, abilities, position, target, by, player, requests));
                    }
                }
            }
        }
    }

    events
}
