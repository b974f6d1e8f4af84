//! The trigger pipeline.
//!
//! [`fire`] routes one moment to every ability that listens for it, in a
//! fixed order:
//!
//! 1. The triggering card's own ability, if it declares the moment.
//! 2. Hand-held cards declaring the `Hand` variant: the current player's
//!    hand first, then the opponent's, each in hand order.
//! 3. Board cards, scanned once in row-major order, declaring the `Any`
//!    variant. For turn and round moments, which have no triggering card,
//!    the bare moment counts as well.
//!
//! After every activation the power of every board card is recomputed, and
//! after hand activations every hand card too, so later handlers in the
//! same pass see current numbers.

use rustc_hash::FxHashSet;

use super::event::GameEvent;
use super::moment::{TriggerMoment, TriggerScope};
use crate::abilities::AbilityTable;
use crate::board::BoardPosition;
use crate::combat::CombatRequest;
use crate::core::{InstanceId, MatchState, PlayerId};

/// One occurrence of a trigger moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trigger {
    pub moment: TriggerMoment,

    /// The card whose action caused the moment. `None` for turn and round moments.
    pub card: Option<InstanceId>,

    pub position: Option<BoardPosition>,

    /// The other party: the defender for `OnFlip`, the attacker for
    /// `OnFlipped` and `OnDefend`.
    pub counterpart: Option<InstanceId>,

    pub counterpart_position: Option<BoardPosition>,

    /// The seat whose turn it is.
    pub player: PlayerId,
}

impl Trigger {
    /// A moment caused by a card.
    #[must_use]
    pub fn card(
        moment: TriggerMoment,
        card: InstanceId,
        position: Option<BoardPosition>,
        player: PlayerId,
    ) -> Self {
        Self {
            moment,
            card: Some(card),
            position,
            counterpart: None,
            counterpart_position: None,
            player,
        }
    }

    /// A turn or round moment.
    #[must_use]
    pub fn lifecycle(moment: TriggerMoment, player: PlayerId) -> Self {
        debug_assert!(moment.is_lifecycle());
        Self {
            moment,
            card: None,
            position: None,
            counterpart: None,
            counterpart_position: None,
            player,
        }
    }

    /// Attach the other party (builder pattern).
    #[must_use]
    pub fn with_counterpart(mut self, card: InstanceId, position: Option<BoardPosition>) -> Self {
        self.counterpart = Some(card);
        self.counterpart_position = position;
        self
    }
}

/// Fire every ability listening for `trigger`, in pipeline order.
pub fn fire(
    state: &mut MatchState,
    abilities: &AbilityTable,
    trigger: Trigger,
    requests: &mut Vec<CombatRequest>,
) -> Vec<GameEvent> {
    let moment = trigger.moment;
    let mut events = Vec::new();

    // 1. The triggering card.
    if let Some(card) = trigger.card {
        let declares = state.card(card).is_some_and(|c| c.declares(moment.own()));
        if declares {
            events.extend(abilities.fire(state, trigger, card, TriggerScope::Own, requests));
            state.recompute_board_power();
        }
    }

    // 2. Hands, current player first.
    let current = state.current_player;
    for seat in [current, current.opponent()] {
        let holders: Vec<_> = state
            .player(seat)
            .hand
            .iter()
            .copied()
            .filter(|id| state.card(*id).is_some_and(|c| c.declares(moment.in_hand())))
            .collect();
        for id in holders {
            if !state.player(seat).hand_contains(id) {
                continue;
            }
            events.extend(abilities.fire(state, trigger, id, TriggerScope::Hand, requests));
            state.recompute_board_power();
            state.recompute_hand_power();
        }
    }

    // 3. Board watchers.
    let mut seen = FxHashSet::default();
    let watchers: Vec<_> = state.board.occupied().map(|(_, id)| id).collect();
    for id in watchers {
        if Some(id) == trigger.card || !seen.insert(id) {
            continue;
        }
        if state.board.position_of(id).is_none() {
            continue;
        }
        let Some(card) = state.card(id) else {
            continue;
        };
        let scope = if card.declares(moment.for_any()) {
            TriggerScope::Any
        } else if moment.is_lifecycle() && card.declares(moment.own()) {
            TriggerScope::Own
        } else {
            continue;
        };
        events.extend(abilities.fire(state, trigger, id, scope, requests));
        state.recompute_board_power();
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{AbilityContext, AbilityId};
    use crate::cards::test_support::ability_card;
    use crate::core::{GameRng, Player, PlayerMap};
    use crate::effects::{PowerDelta, PowerValues};
    use crate::triggers::EventKind;

    // Each test handler stamps an AbilityActivated event so firing order is visible.
    fn stamp(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
        vec![ctx.activated()]
    }

    fn pump(ctx: &mut AbilityContext<'_>) -> Vec<GameEvent> {
        let source = ctx.source();
        ctx.buff(source, PowerDelta::uniform(1)).into_iter().collect()
    }

    fn table() -> AbilityTable {
        let mut table = AbilityTable::new();
        for id in AbilityId::all() {
            table.register(id, stamp);
        }
        table.register(AbilityId::Ravenous, pump);
        table
    }

    fn state() -> MatchState {
        let players = PlayerMap::from_pair(Player::new("a", []), Player::new("b", []));
        MatchState::new(players, GameRng::new(5))
    }

    fn put_on_board(s: &mut MatchState, card: crate::cards::InGameCard, x: u8, y: u8) {
        let id = card.instance_id;
        s.cards.insert(id, card);
        assert!(s.board.place(BoardPosition::new(x, y), id));
    }

    fn put_in_hand(s: &mut MatchState, mut card: crate::cards::InGameCard, seat: PlayerId) {
        card.owner = seat;
        card.original_owner = seat;
        let id = card.instance_id;
        s.cards.insert(id, card);
        s.players[seat].hand.push_back(id);
    }

    fn fired(events: &[GameEvent]) -> Vec<InstanceId> {
        events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::AbilityActivated { .. }))
            .filter_map(|e| e.card)
            .collect()
    }

    #[test]
    fn test_order_own_then_hands_then_board() {
        let mut s = state();
        let placed = ability_card(1, PowerValues::uniform(3), AbilityId::Tide, TriggerMoment::OnPlace.own());
        put_on_board(&mut s, placed, 1, 1);
        put_on_board(&mut s, ability_card(2, PowerValues::uniform(3), AbilityId::Tide, TriggerMoment::OnPlace.for_any()), 3, 3);
        put_on_board(&mut s, ability_card(3, PowerValues::uniform(3), AbilityId::Tide, TriggerMoment::OnPlace.for_any()), 0, 0);
        put_in_hand(&mut s, ability_card(4, PowerValues::uniform(3), AbilityId::Bloodlust, TriggerMoment::OnPlace.in_hand()), PlayerId::TWO);
        put_in_hand(&mut s, ability_card(5, PowerValues::uniform(3), AbilityId::Bloodlust, TriggerMoment::OnPlace.in_hand()), PlayerId::ONE);

        let trigger = Trigger::card(TriggerMoment::OnPlace, InstanceId(1), Some(BoardPosition::new(1, 1)), PlayerId::ONE);
        let events = fire(&mut s, &table(), trigger, &mut Vec::new());

        assert_eq!(
            fired(&events),
            vec![InstanceId(1), InstanceId(5), InstanceId(4), InstanceId(3), InstanceId(2)]
        );
    }

    #[test]
    fn test_triggering_card_not_fired_as_watcher() {
        let mut s = state();
        let card = ability_card(1, PowerValues::uniform(3), AbilityId::Tide, TriggerMoment::OnPlace.for_any());
        put_on_board(&mut s, card, 2, 2);

        let trigger = Trigger::card(TriggerMoment::OnPlace, InstanceId(1), Some(BoardPosition::new(2, 2)), PlayerId::ONE);
        assert!(fire(&mut s, &table(), trigger, &mut Vec::new()).is_empty());
    }

    #[test]
    fn test_lifecycle_fires_bare_moment_on_board_only() {
        let mut s = state();
        put_on_board(&mut s, ability_card(1, PowerValues::uniform(3), AbilityId::Radiance, TriggerMoment::OnTurnEnd.own()), 0, 0);
        put_in_hand(&mut s, ability_card(2, PowerValues::uniform(3), AbilityId::Radiance, TriggerMoment::OnTurnEnd.own()), PlayerId::ONE);

        let events = fire(&mut s, &table(), Trigger::lifecycle(TriggerMoment::OnTurnEnd, PlayerId::ONE), &mut Vec::new());
        assert_eq!(fired(&events), vec![InstanceId(1)]);
    }

    #[test]
    fn test_non_lifecycle_ignores_bare_moment_on_watchers() {
        let mut s = state();
        put_on_board(&mut s, ability_card(1, PowerValues::uniform(3), AbilityId::Tide, TriggerMoment::OnPlace.own()), 0, 0);
        put_on_board(&mut s, ability_card(2, PowerValues::uniform(3), AbilityId::Tide, TriggerMoment::OnPlace.own()), 1, 0);

        let trigger = Trigger::card(TriggerMoment::OnPlace, InstanceId(2), Some(BoardPosition::new(1, 0)), PlayerId::ONE);
        let events = fire(&mut s, &table(), trigger, &mut Vec::new());
        assert_eq!(fired(&events), vec![InstanceId(2)]);
    }

    #[test]
    fn test_power_recomputed_between_firings() {
        let mut s = state();
        put_on_board(&mut s, ability_card(1, PowerValues::uniform(3), AbilityId::Ravenous, TriggerMoment::OnFlip.own()), 0, 0);

        let trigger = Trigger::card(TriggerMoment::OnFlip, InstanceId(1), Some(BoardPosition::new(0, 0)), PlayerId::ONE);
        let events = fire(&mut s, &table(), trigger, &mut Vec::new());

        assert_eq!(events.len(), 1);
        assert_eq!(s.card(InstanceId(1)).unwrap().current_power, PowerValues::uniform(4));
    }

    #[test]
    fn test_unknown_ability_is_noop() {
        use crate::abilities::AbilityDescriptor;
        use crate::cards::{CardDefinition, InGameCard};
        use std::sync::Arc;

        let mut s = state();
        let mut descriptor = AbilityDescriptor::new(AbilityId::Tide, &[TriggerMoment::OnPlace.own()]);
        descriptor.key = crate::abilities::AbilityKey::Unknown("Ragnarok".into());
        let definition = CardDefinition::new(crate::core::BaseCardId(9), "Surt", PowerValues::uniform(2))
            .with_ability(descriptor);
        put_on_board(&mut s, InGameCard::new(InstanceId(9), Arc::new(definition), PlayerId::ONE), 0, 0);

        let trigger = Trigger::card(TriggerMoment::OnPlace, InstanceId(9), Some(BoardPosition::new(0, 0)), PlayerId::ONE);
        assert!(fire(&mut s, &table(), trigger, &mut Vec::new()).is_empty());
    }
}
