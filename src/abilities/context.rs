//! The mutation interface handed to ability handlers.
//!
//! Handlers never touch `MatchState` fields directly. Each change goes
//! through an [`AbilityContext`] method that applies it, keeps derived
//! data (power, discard piles, analytics) consistent and returns the
//! display event it caused, if any. A change that is not allowed (a
//! blocked buff, an immune target, a tile that cannot take a status
//! while occupied) returns `None` and leaves the state as it was.

use crate::board::{BoardPosition, BoardQuery, TileEffect};
use crate::cards::InGameCard;
use crate::combat::CombatRequest;
use crate::core::{GameRng, InstanceId, MatchState, PlayerId};
use crate::effects::{self, EffectKind, PowerDelta};
use crate::outbound::AnalyticsEvent;
use crate::triggers::{EventKind, GameEvent, Trigger, TriggerScope};

use super::id::AbilityId;

/// What an ability handler can see and change.
pub struct AbilityContext<'a> {
    state: &'a mut MatchState,
    trigger: Trigger,
    ability: AbilityId,
    source: InstanceId,
    scope: TriggerScope,
    requests: &'a mut Vec<CombatRequest>,
}

impl<'a> AbilityContext<'a> {
    pub(crate) fn new(
        state: &'a mut MatchState,
        trigger: Trigger,
        ability: AbilityId,
        source: InstanceId,
        scope: TriggerScope,
        requests: &'a mut Vec<CombatRequest>,
    ) -> Self {
        Self {
            state,
            trigger,
            ability,
            source,
            scope,
            requests,
        }
    }

    // === Reading ===

    /// The moment being handled and who caused it.
    #[must_use]
    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    #[must_use]
    pub fn ability(&self) -> AbilityId {
        self.ability
    }

    /// Whether the source fired as its own trigger, from hand, or as a watcher.
    #[must_use]
    pub fn scope(&self) -> TriggerScope {
        self.scope
    }

    /// The card whose ability is firing.
    #[must_use]
    pub fn source(&self) -> InstanceId {
        self.source
    }

    #[must_use]
    pub fn source_card(&self) -> Option<&InGameCard> {
        self.state.card(self.source)
    }

    /// Where the source sits, if it is on the board.
    #[must_use]
    pub fn source_position(&self) -> Option<BoardPosition> {
        self.state.board.position_of(self.source)
    }

    /// The seat controlling the source.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.source_card()
            .map_or(self.trigger.player, |card| card.owner)
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        self.state
    }

    #[must_use]
    pub fn query(&self) -> BoardQuery<'_> {
        self.state.query()
    }

    #[must_use]
    pub fn card(&self, id: InstanceId) -> Option<&InGameCard> {
        self.state.card(id)
    }

    /// The match random source.
    pub fn rng(&mut self) -> &mut GameRng {
        &mut self.state.rng
    }

    fn user_id(&self, player: PlayerId) -> String {
        self.state.player(player).user_id.clone()
    }

    // === Events ===

    /// An "ability activated" event for the source card.
    pub fn activated(&mut self) -> GameEvent {
        let position = self.source_position();
        self.state
            .event(EventKind::AbilityActivated {
                ability: self.ability.name().to_string(),
            })
            .with_card(self.source)
            .at_opt(position)
    }

    /// A "defended" event, for interceptors that save a card.
    pub fn defended(&mut self, defender: InstanceId, attacker: InstanceId) -> GameEvent {
        self.card_event(EventKind::CardDefended { attacker }, defender)
    }

    fn card_event(&mut self, kind: EventKind, card: InstanceId) -> GameEvent {
        let position = self.state.board.position_of(card);
        self.state.event(kind).with_card(card).at_opt(position)
    }

    // === Power ===

    fn change_power(
        &mut self,
        target: InstanceId,
        apply: impl FnOnce(&mut InGameCard, &str) -> PowerDelta,
    ) -> Option<GameEvent> {
        let name = self.ability.name();
        let card = self.state.card_mut(target)?;
        let delta = apply(card, name);
        if delta.is_zero() {
            return None;
        }
        Some(self.card_event(EventKind::PowerChanged { delta }, target))
    }

    /// Permanent buff.
    pub fn buff(&mut self, target: InstanceId, power: PowerDelta) -> Option<GameEvent> {
        self.change_power(target, |card, name| effects::buff(card, power, name))
    }

    /// Permanent debuff. Magnitudes or negative values are both accepted.
    pub fn debuff(&mut self, target: InstanceId, power: PowerDelta) -> Option<GameEvent> {
        self.change_power(target, |card, name| effects::debuff(card, power, name))
    }

    pub fn temp_buff(
        &mut self,
        target: InstanceId,
        power: PowerDelta,
        duration: u32,
    ) -> Option<GameEvent> {
        self.change_power(target, |card, name| {
            effects::add_temp_buff(card, power, duration, name)
        })
    }

    pub fn temp_debuff(
        &mut self,
        target: InstanceId,
        power: PowerDelta,
        duration: u32,
    ) -> Option<GameEvent> {
        self.change_power(target, |card, name| {
            effects::add_temp_debuff(card, power, duration, name)
        })
    }

    /// Remove every buff from a card.
    pub fn strip_buffs(&mut self, target: InstanceId) -> Option<GameEvent> {
        self.change_power(target, |card, _| effects::strip_buffs(card))
    }

    /// Add a power-neutral status such as `BlockDefeat`.
    pub fn add_status(&mut self, target: InstanceId, kind: EffectKind, duration: u32) -> bool {
        let name = self.ability.name();
        match self.state.card_mut(target) {
            Some(card) => {
                effects::add_status(card, kind, duration, name);
                true
            }
            None => false,
        }
    }

    /// Lock a card against flips for at least `turns` turns.
    pub fn lock(&mut self, target: InstanceId, turns: u32) -> bool {
        match self.state.card_mut(target) {
            Some(card) => {
                card.locked_turns = card.locked_turns.max(turns);
                true
            }
            None => false,
        }
    }

    // === Ownership and removal ===

    /// Give the source's owner control of a board card. Immune cards refuse.
    pub fn take_control(&mut self, target: InstanceId) -> Option<GameEvent> {
        let new_owner = self.owner();
        let card = self.state.card(target)?;
        if card.owner == new_owner || card.is_flip_immune() {
            return None;
        }
        let base = card.base_card_id;
        self.state.card_mut(target)?.owner = new_owner;

        let user_id = self.user_id(new_owner);
        self.state.track(AnalyticsEvent::CardStolen { user_id, card: base });
        Some(self.card_event(EventKind::OwnershipChanged, target))
    }

    /// Destroy the card on `pos`: it leaves the board for its original
    /// owner's discard pile.
    pub fn destroy(&mut self, pos: BoardPosition) -> Option<GameEvent> {
        let id = self.state.board.card_at(pos)?;
        let card = self.state.card(id)?;
        let (base, original_owner) = (card.base_card_id, card.original_owner);

        self.state.board.take(pos);
        self.state.player_mut(original_owner).discard_pile.push_back(id);

        let user_id = self.user_id(self.owner());
        self.state.track(AnalyticsEvent::CardDestroyed { user_id, card: base });
        Some(self.state.event(EventKind::CardRemoved).with_card(id).at(pos))
    }

    /// Send the card on `pos` back to its original owner's hand, stripped
    /// of temporary effects and locks. Refused if that hand is full.
    pub fn return_to_hand(&mut self, pos: BoardPosition) -> Option<GameEvent> {
        let id = self.state.board.card_at(pos)?;
        let original_owner = self.state.card(id)?.original_owner;
        if self.state.player(original_owner).hand.len() >= self.state.max_cards_in_hand {
            return None;
        }

        self.state.board.take(pos);
        if let Some(card) = self.state.card_mut(id) {
            card.owner = original_owner;
            card.temporary_effects.clear();
            card.locked_turns = 0;
            card.recompute_power();
        }
        self.state.player_mut(original_owner).hand.push_back(id);
        Some(self.state.event(EventKind::CardReturnedToHand).with_card(id).at(pos))
    }

    // === Tiles ===

    /// Put a status on a tile.
    ///
    /// Blocking or removing an occupied tile is a programming error in the
    /// ability: it panics in debug builds and is ignored in release.
    pub fn set_tile(&mut self, pos: BoardPosition, effect: TileEffect) -> Option<GameEvent> {
        let cell = self.state.board.cell(pos);
        if effect.forbids_cards() && cell.card.is_some() {
            debug_assert!(false, "{} tried to block occupied tile {}", self.ability, pos);
            log::error!("{} tried to block occupied tile {}; ignored", self.ability, pos);
            return None;
        }
        if !cell.tile_enabled {
            return None;
        }

        let status = effect.status;
        let owner = self.owner();
        match status {
            crate::board::TileStatus::Cursed => {
                let user_id = self.user_id(owner);
                self.state.track(AnalyticsEvent::TileCursed { user_id });
            }
            crate::board::TileStatus::Boosted => {
                let user_id = self.user_id(owner);
                self.state.track(AnalyticsEvent::TileBlessed { user_id });
            }
            _ => {}
        }
        self.state.board.set_tile_effect(pos, effect);
        Some(
            self.state
                .event(EventKind::TileStateChanged { status: Some(status) })
                .at(pos),
        )
    }

    // === Hands ===

    /// Draw for `player` if their hand has room.
    pub fn draw(&mut self, player: PlayerId) -> Option<GameEvent> {
        let card = self.state.draw_into_hand(player)?;
        Some(self.state.event(EventKind::CardDrawn).with_player(player).with_card(card))
    }

    /// Discard a uniformly random card from `player`'s hand.
    pub fn discard_random(&mut self, player: PlayerId) -> Option<GameEvent> {
        let len = self.state.player(player).hand.len();
        let index = self.state.rng.choose_index(len)?;
        let card = self.state.discard_at(player, index).ok()?;
        Some(
            self.state
                .event(EventKind::CardDiscarded)
                .with_player(player)
                .with_card(card),
        )
    }

    // === Combat ===

    /// Queue follow-up combat for the resolver.
    pub fn request(&mut self, request: CombatRequest) {
        self.requests.push(request);
    }
}
