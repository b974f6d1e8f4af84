//! The match state machine.
//!
//! ## Operations
//!
//! | Operation | Fails when |
//! |-----------|------------|
//! | [`initialize`](MatchEngine::initialize) | a deck card cannot be hydrated |
//! | [`place_card`](MatchEngine::place_card) | not your turn, card not in hand, cell occupied / out of bounds / unavailable |
//! | [`end_turn`](MatchEngine::end_turn) | not your turn |
//! | [`surrender`](MatchEngine::surrender) | match already completed, unknown seat |
//! | [`draw_card`](MatchEngine::draw_card) | not your turn |
//! | [`discard_card`](MatchEngine::discard_card) | not your turn, empty hand, bad index |
//!
//! After any accepted operation the match ends if the board is full or
//! neither seat has a card left to place.
//!
//! Every operation runs against a snapshot of the state and commits only
//! on success. Snapshots are cheap: hands, decks and the card cache are
//! `im` collections that share structure with the original.
//!
//! ## Placement
//!
//! ```text
//! validate -> leave hand -> tile transfer -> CardPlaced -> OnPlace
//!   -> combat -> scores -> replacement draw -> game over? | end turn
//! ```
//!
//! ## End of turn
//!
//! ```text
//! decay tiles and effects -> OnTurnEnd [-> OnRoundEnd]
//!   -> hand over -> TurnEnded -> OnTurnStart [-> OnRoundStart]
//! ```

use std::cmp::Ordering;
use std::sync::Arc;

use crate::abilities::AbilityTable;
use crate::board::BoardPosition;
use crate::cards::CardDataProvider;
use crate::combat;
use crate::core::{
    Action, ActionRecord, CardArena, EngineError, EngineResult, GameRng, InstanceId, MatchConfig,
    MatchState, MatchStatus, Player, PlayerId, PlayerMap,
};
use crate::effects::{EffectKind, PowerDelta, TemporaryEffect};
use crate::outbound::MatchOutcome;
use crate::triggers::{self, batch_events, EventKind, GameEvent, Trigger, TriggerMoment};

use super::engine::{GameResult, RulesEngine};

/// Name carried by power transferred from a tile.
const TILE_BONUS: &str = "Tile";

/// The two seats of a new match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSetup {
    seats: PlayerMap<(String, Vec<InstanceId>)>,
}

impl MatchSetup {
    /// Seat one user and deck per side. Seat one moves first.
    #[must_use]
    pub fn new(
        first_user: impl Into<String>,
        first_deck: Vec<InstanceId>,
        second_user: impl Into<String>,
        second_deck: Vec<InstanceId>,
    ) -> Self {
        Self {
            seats: PlayerMap::from_pair(
                (first_user.into(), first_deck),
                (second_user.into(), second_deck),
            ),
        }
    }
}

/// The match state machine.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    abilities: Arc<AbilityTable>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl MatchEngine {
    /// Create an engine with every built-in ability.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            abilities: Arc::new(AbilityTable::standard()),
        }
    }

    /// Replace the ability table (builder pattern).
    #[must_use]
    pub fn with_abilities(mut self, abilities: AbilityTable) -> Self {
        self.abilities = Arc::new(abilities);
        self
    }

    #[must_use]
    pub fn abilities(&self) -> &AbilityTable {
        &self.abilities
    }

    // === Initialize ===

    /// Build a new match: hydrate every deck card, shuffle both decks
    /// independently and deal the opening hands.
    pub fn initialize(
        &self,
        setup: MatchSetup,
        provider: &dyn CardDataProvider,
    ) -> EngineResult<MatchState> {
        let rng = GameRng::new(self.config.seed);
        let mut cards = CardArena::new();
        let [first, second] = [PlayerId::ONE, PlayerId::TWO]
            .map(|seat| self.seat(&setup, seat, provider, &rng, &mut cards));

        let mut state = MatchState::new(PlayerMap::from_pair(first?, second?), rng);
        state.cards = cards;
        state.max_cards_in_hand = self.config.max_cards_in_hand;
        state.max_chain_depth = self.config.max_chain_depth;
        state.event_batch_size = self.config.event_batch_size;

        log::debug!(
            "initialized match {} vs {} (seed {})",
            state.player(PlayerId::ONE).user_id,
            state.player(PlayerId::TWO).user_id,
            self.config.seed
        );
        Ok(state)
    }

    fn seat(
        &self,
        setup: &MatchSetup,
        seat: PlayerId,
        provider: &dyn CardDataProvider,
        rng: &GameRng,
        cards: &mut CardArena,
    ) -> EngineResult<Player> {
        let (user_id, deck) = &setup.seats[seat];
        for &id in deck {
            let record = provider.fetch(id)?;
            cards.insert(id, record.hydrate(seat));
        }

        let mut deck = deck.clone();
        rng.for_context(&format!("deck-{}", seat.index())).shuffle(&mut deck);

        let mut player = Player::new(user_id.clone(), deck);
        let deal = self.config.opening_hand_size.min(self.config.max_cards_in_hand);
        for _ in 0..deal {
            match player.deck.pop_front() {
                Some(card) => player.hand.push_back(card),
                None => break,
            }
        }
        Ok(player)
    }

    // === Operations ===

    /// Place `card` from `player`'s hand on `position`.
    pub fn place_card(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        card: InstanceId,
        position: BoardPosition,
    ) -> EngineResult<Vec<GameEvent>> {
        self.apply(state, player, &Action::place(card, position))
    }

    /// End `player`'s turn without placing.
    pub fn end_turn(&self, state: &mut MatchState, player: PlayerId) -> EngineResult<Vec<GameEvent>> {
        self.apply(state, player, &Action::EndTurn)
    }

    /// Concede; the other seat wins.
    pub fn surrender(&self, state: &mut MatchState, player: PlayerId) -> EngineResult<Vec<GameEvent>> {
        self.apply(state, player, &Action::Surrender)
    }

    /// Draw the top card of `player`'s deck, if the hand has room.
    pub fn draw_card(&self, state: &mut MatchState, player: PlayerId) -> EngineResult<Vec<GameEvent>> {
        self.apply(state, player, &Action::DrawCard)
    }

    /// Discard from `player`'s hand; `None` picks a random slot.
    pub fn discard_card(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        index: Option<usize>,
    ) -> EngineResult<Vec<GameEvent>> {
        self.apply(state, player, &Action::DiscardCard { index })
    }

    /// Apply an action on behalf of a user id.
    pub fn apply_for_user(
        &self,
        state: &mut MatchState,
        user_id: &str,
        action: &Action,
    ) -> EngineResult<Vec<GameEvent>> {
        let player = state.seat_of(user_id)?;
        self.apply(state, player, action)
    }

    /// Apply any action. The state is untouched when this returns `Err`.
    pub fn apply(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        action: &Action,
    ) -> EngineResult<Vec<GameEvent>> {
        if !state.is_active() {
            return Err(EngineError::MatchCompleted);
        }
        if !PlayerId::all().any(|seat| seat == player) {
            return Err(EngineError::UnknownSeat(player));
        }

        let mut next = state.clone();
        let turn = next.turn_number;
        let mut events = match action {
            Action::PlaceCard { card, position } => self.place(&mut next, player, *card, *position)?,
            Action::EndTurn => {
                expect_turn(&next, player)?;
                self.hand_over(&mut next, player)
            }
            Action::Surrender => finish(&mut next, Some(player.opponent())),
            Action::DrawCard => draw(&mut next, player)?,
            Action::DiscardCard { index } => discard(&mut next, player, *index)?,
        };
        if next.is_active() && is_over(&next) {
            let winner = score_leader(&next);
            events.extend(finish(&mut next, winner));
        }

        next.history.push_back(ActionRecord::new(player, action.clone(), turn));
        batch_events(&mut events, next.event_batch_size);
        *state = next;
        Ok(events)
    }

    /// The record handed to persistence once the match is over.
    #[must_use]
    pub fn outcome(&self, state: &MatchState) -> Option<MatchOutcome> {
        MatchOutcome::from_state(state)
    }

    // === Placement ===

    fn place(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        card: InstanceId,
        position: BoardPosition,
    ) -> EngineResult<Vec<GameEvent>> {
        expect_turn(state, player)?;
        if !state.player(player).hand_contains(card) {
            return Err(EngineError::CardNotInHand { player, card });
        }
        let position = BoardPosition::checked(i32::from(position.x), i32::from(position.y))?;
        let cell = state.board.cell(position);
        if cell.card.is_some() {
            return Err(EngineError::CellOccupied(position));
        }
        if !cell.can_hold_card() {
            return Err(EngineError::TileUnavailable(position));
        }
        state.hydrated(card)?;
        if let Some(next_draw) = state.player(player).deck.front().copied() {
            state.hydrated(next_draw)?;
        }

        state.remove_from_hand(player, card);
        let transfer = state
            .board
            .cell(position)
            .tile_effect
            .as_ref()
            .filter(|effect| effect.transfers_to(player))
            .map(|effect| (effect.power, effect.turns_left));
        if let Some(placed) = state.card_mut(card) {
            placed.owner = player;
            if let Some((power, turns)) = transfer {
                placed.temporary_effects.push(
                    TemporaryEffect::new(EffectKind::TilePowerBonus, power, turns).named(TILE_BONUS),
                );
            }
            placed.recompute_power();
        }
        if transfer.is_some() {
            // One-shot: the status stays until it decays, the power does not.
            if let Some(effect) = state.board.cell_mut(position).tile_effect.as_mut() {
                effect.power = PowerDelta::default();
            }
        }
        state.board.place(position, card);
        log::debug!("{} places {} at {}", player, card, position);

        let mut events = vec![state.event(EventKind::CardPlaced).with_card(card).at(position)];
        let mut requests = Vec::new();
        let on_place = Trigger::card(TriggerMoment::OnPlace, card, Some(position), player);
        events.extend(triggers::fire(state, &self.abilities, on_place, &mut requests));
        events.extend(combat::resolve_combat_queued(
            state,
            &self.abilities,
            position,
            player,
            requests,
        ));

        state.recompute_scores();
        if let Some(drawn) = state.draw_into_hand(player) {
            events.push(state.event(EventKind::CardDrawn).with_player(player).with_card(drawn));
        }

        if is_over(state) {
            events.extend(finish(state, score_leader(state)));
        } else {
            events.extend(self.hand_over(state, player));
        }
        Ok(events)
    }

    // === End of turn ===

    fn hand_over(&self, state: &mut MatchState, player: PlayerId) -> Vec<GameEvent> {
        let mut events = decay(state);

        events.extend(self.fire_lifecycle(state, TriggerMoment::OnTurnEnd, player));
        if player == PlayerId::TWO {
            events.extend(self.fire_lifecycle(state, TriggerMoment::OnRoundEnd, player));
        }

        let next = player.opponent();
        state.current_player = next;
        state.turn_number += 1;
        events.push(
            state
                .event(EventKind::TurnEnded { next_player: next })
                .with_player(player),
        );
        log::debug!("turn {} begins for {}", state.turn_number, next);

        events.extend(self.fire_lifecycle(state, TriggerMoment::OnTurnStart, next));
        if next == PlayerId::ONE {
            events.extend(self.fire_lifecycle(state, TriggerMoment::OnRoundStart, next));
        }
        state.recompute_scores();
        events
    }

    fn fire_lifecycle(
        &self,
        state: &mut MatchState,
        moment: TriggerMoment,
        player: PlayerId,
    ) -> Vec<GameEvent> {
        let mut requests = Vec::new();
        let trigger = Trigger::lifecycle(moment, player);
        let mut events = triggers::fire(state, &self.abilities, trigger, &mut requests);
        let mut budget = state.max_chain_depth;
        events.extend(combat::drain_requests(
            state,
            &self.abilities,
            player,
            &mut requests,
            &mut budget,
        ));
        events
    }
}

fn expect_turn(state: &MatchState, player: PlayerId) -> EngineResult<()> {
    if !state.is_active() {
        return Err(EngineError::MatchCompleted);
    }
    if state.current_player != player {
        return Err(EngineError::NotYourTurn(player));
    }
    Ok(())
}

/// End-of-turn sweep over tiles, board cards and hand cards.
fn decay(state: &mut MatchState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for (position, status) in state.board.decay_tiles() {
        log::trace!("{:?} on {} expired", status, position);
        events.push(state.event(EventKind::TileStateChanged { status: None }).at(position));
    }

    let mut ticking: Vec<_> = state.board.occupied().map(|(_, id)| id).collect();
    for seat in PlayerId::all() {
        ticking.extend(state.player(seat).hand.iter().copied());
    }
    for id in ticking {
        let Some(card) = state.card_mut(id) else {
            continue;
        };
        let before = card.current_power;
        if !card.tick_effects() {
            continue;
        }
        let delta = card.power_change_since(&before);
        if !delta.is_zero() {
            let position = state.board.position_of(id);
            events.push(
                state
                    .event(EventKind::PowerChanged { delta })
                    .with_card(id)
                    .at_opt(position),
            );
        }
    }
    events
}

/// The board is full, or neither seat has a card left to place.
fn is_over(state: &MatchState) -> bool {
    state.board.is_full() || PlayerId::all().all(|seat| state.player(seat).is_exhausted())
}

fn score_leader(state: &MatchState) -> Option<PlayerId> {
    let (first, second) = state.scores();
    match first.cmp(&second) {
        Ordering::Greater => Some(PlayerId::ONE),
        Ordering::Less => Some(PlayerId::TWO),
        Ordering::Equal => None,
    }
}

fn finish(state: &mut MatchState, winner: Option<PlayerId>) -> Vec<GameEvent> {
    state.status = MatchStatus::Completed;
    state.winner = winner;
    let (first, second) = state.scores();
    log::debug!(
        "match over after {} turns: {}-{}, winner {:?}",
        state.turn_number,
        first,
        second,
        winner
    );
    vec![state.event(EventKind::GameEnded { winner })]
}

fn draw(state: &mut MatchState, player: PlayerId) -> EngineResult<Vec<GameEvent>> {
    expect_turn(state, player)?;
    if let Some(next_draw) = state.player(player).deck.front().copied() {
        state.hydrated(next_draw)?;
    }
    match state.draw_into_hand(player) {
        Some(card) => Ok(vec![state
            .event(EventKind::CardDrawn)
            .with_player(player)
            .with_card(card)]),
        None => {
            log::debug!("{} cannot draw: hand full or deck empty", player);
            Ok(Vec::new())
        }
    }
}

fn discard(
    state: &mut MatchState,
    player: PlayerId,
    index: Option<usize>,
) -> EngineResult<Vec<GameEvent>> {
    expect_turn(state, player)?;
    let len = state.player(player).hand.len();
    let index = match index {
        Some(index) => index,
        None => state
            .rng
            .choose_index(len)
            .ok_or(EngineError::EmptyHand(player))?,
    };
    let card = state.discard_at(player, index)?;
    Ok(vec![state
        .event(EventKind::CardDiscarded)
        .with_player(player)
        .with_card(card)])
}

impl RulesEngine for MatchEngine {
    fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn legal_actions(&self, state: &MatchState, player: PlayerId) -> Vec<Action> {
        if !state.is_active() || state.current_player != player {
            return Vec::new();
        }

        let open: Vec<_> = state.board.open_positions().collect();
        let mut actions: Vec<_> = state
            .player(player)
            .hand
            .iter()
            .flat_map(|card| open.iter().map(move |pos| Action::place(*card, *pos)))
            .collect();
        if actions.is_empty() {
            actions.push(Action::EndTurn);
        }
        actions
    }

    fn apply_action(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        action: &Action,
    ) -> EngineResult<Vec<GameEvent>> {
        self.apply(state, player, action)
    }

    fn is_terminal(&self, state: &MatchState) -> Option<GameResult> {
        match state.status {
            MatchStatus::Active => None,
            MatchStatus::Completed => Some(state.winner.map_or(GameResult::Draw, GameResult::Winner)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{TileEffect, TileStatus};
    use crate::cards::catalog::{id_of, sample_provider};
    use crate::cards::InMemoryCardProvider;
    use crate::core::CardDataError;
    use crate::effects::PowerValues;

    fn deck(provider: &mut InMemoryCardProvider, names: &[&str]) -> Vec<InstanceId> {
        let bases: Vec<_> = names.iter().map(|name| id_of(name).unwrap()).collect();
        provider.mint_deck(&bases)
    }

    const VANILLA: [&str; 8] = [
        "Einherjar", "Hoplite", "Ashigaru", "Scribe", "Grey Wolf", "Einherjar", "Hoplite", "Ashigaru",
    ];

    fn new_match(config: MatchConfig) -> (MatchEngine, MatchState) {
        let mut provider = sample_provider();
        let first = deck(&mut provider, &VANILLA);
        let second = deck(&mut provider, &VANILLA);
        let engine = MatchEngine::new(config);
        let state = engine
            .initialize(MatchSetup::new("alice", first, "bob", second), &provider)
            .unwrap();
        (engine, state)
    }

    fn first_card(state: &MatchState, player: PlayerId) -> InstanceId {
        state.player(player).hand[0]
    }

    #[test]
    fn test_initialize_deals_and_hydrates() {
        let (_, state) = new_match(MatchConfig::default());

        for seat in PlayerId::all() {
            assert_eq!(state.player(seat).hand.len(), 5);
            assert_eq!(state.player(seat).deck.len(), 3);
        }
        assert_eq!(state.current_player, PlayerId::ONE);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.cards.len(), 16);
        assert!(state.check_hydration().is_ok());
        assert!(state.cards.values().all(|card| card.owner == card.original_owner));
    }

    #[test]
    fn test_initialize_is_seeded() {
        let (_, a) = new_match(MatchConfig::default().with_seed(3));
        let (_, b) = new_match(MatchConfig::default().with_seed(3));
        assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
    }

    #[test]
    fn test_initialize_fails_on_unknown_instance() {
        let provider = sample_provider();
        let setup = MatchSetup::new("alice", vec![InstanceId(77)], "bob", Vec::new());
        let err = MatchEngine::default().initialize(setup, &provider).unwrap_err();
        assert_eq!(err, EngineError::CardData(CardDataError::MissingInstance(InstanceId(77))));
    }

    #[test]
    fn test_place_hands_over_and_refills() {
        let (engine, mut state) = new_match(MatchConfig::default());
        let card = first_card(&state, PlayerId::ONE);

        let events = engine
            .place_card(&mut state, PlayerId::ONE, card, BoardPosition::new(0, 0))
            .unwrap();

        assert_eq!(state.board.card_at(BoardPosition::new(0, 0)), Some(card));
        assert_eq!(state.player(PlayerId::ONE).hand.len(), 5);
        assert_eq!(state.player(PlayerId::ONE).score, 1);
        assert_eq!(state.current_player, PlayerId::TWO);
        assert_eq!(state.turn_number, 2);
        assert_eq!(state.history.len(), 1);
        assert!(matches!(events[0].kind, EventKind::CardPlaced));
        assert!(events.iter().any(|e| e.kind == EventKind::TurnEnded { next_player: PlayerId::TWO }));
        assert!(events.windows(2).all(|pair| pair[0].seq < pair[1].seq));
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let (engine, mut state) = new_match(MatchConfig::default());
        let mine = first_card(&state, PlayerId::ONE);
        let theirs = first_card(&state, PlayerId::TWO);
        engine
            .place_card(&mut state, PlayerId::ONE, mine, BoardPosition::new(1, 1))
            .unwrap();
        state
            .board
            .set_tile_effect(BoardPosition::new(2, 2), TileEffect::new(TileStatus::Blocked, 2));
        let before = state.clone();

        let cases = [
            (PlayerId::ONE, Action::place(mine, BoardPosition::new(0, 0)), EngineError::NotYourTurn(PlayerId::ONE)),
            (
                PlayerId::TWO,
                Action::place(mine, BoardPosition::new(0, 0)),
                EngineError::CardNotInHand { player: PlayerId::TWO, card: mine },
            ),
            (
                PlayerId::TWO,
                Action::place(theirs, BoardPosition::new(1, 1)),
                EngineError::CellOccupied(BoardPosition::new(1, 1)),
            ),
            (
                PlayerId::TWO,
                Action::place(theirs, BoardPosition { x: 4, y: 0 }),
                EngineError::OutOfBounds { x: 4, y: 0 },
            ),
            (
                PlayerId::TWO,
                Action::place(theirs, BoardPosition::new(2, 2)),
                EngineError::TileUnavailable(BoardPosition::new(2, 2)),
            ),
            (PlayerId::ONE, Action::EndTurn, EngineError::NotYourTurn(PlayerId::ONE)),
            (
                PlayerId::TWO,
                Action::DiscardCard { index: Some(9) },
                EngineError::InvalidDiscardIndex { index: 9, len: 5 },
            ),
            (PlayerId(9), Action::Surrender, EngineError::UnknownSeat(PlayerId(9))),
        ];
        for (player, action, expected) in cases {
            assert_eq!(engine.apply(&mut state, player, &action).unwrap_err(), expected);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_tile_bonus_transfers_once() {
        let (engine, mut state) = new_match(MatchConfig::default());
        let pos = BoardPosition::new(3, 3);
        let boost = TileEffect::new(TileStatus::Boosted, 3)
            .with_power(PowerDelta::uniform(1))
            .for_player(PlayerId::ONE);
        state.board.set_tile_effect(pos, boost);
        let card = first_card(&state, PlayerId::ONE);
        let base = state.card(card).unwrap().current_power;

        engine.place_card(&mut state, PlayerId::ONE, card, pos).unwrap();

        let placed = state.card(card).unwrap();
        assert_eq!(placed.current_power, base.apply(&PowerDelta::uniform(1)));
        assert!(placed.has_active_effect(EffectKind::TilePowerBonus));
        let tile = state.board.cell(pos).tile_effect.as_ref().unwrap();
        assert!(tile.power.is_zero());
        assert_eq!(tile.status, TileStatus::Boosted);
    }

    #[test]
    fn test_end_turn_passes_and_decays() {
        let (engine, mut state) = new_match(MatchConfig::default());
        let held = first_card(&state, PlayerId::ONE);
        crate::effects::add_temp_buff(state.card_mut(held).unwrap(), PowerDelta::uniform(2), 1, "Test");
        let pos = BoardPosition::new(0, 3);
        state.board.set_tile_effect(pos, TileEffect::new(TileStatus::Blocked, 1));

        let events = engine.end_turn(&mut state, PlayerId::ONE).unwrap();

        assert_eq!(state.current_player, PlayerId::TWO);
        assert!(state.board.cell(pos).can_hold_card());
        assert!(state.card(held).unwrap().temporary_effects.is_empty());
        assert!(events.iter().any(|e| matches!(e.kind, EventKind::PowerChanged { .. })));
        assert!(events
            .iter()
            .any(|e| e.kind == EventKind::TileStateChanged { status: None } && e.position == Some(pos)));
    }

    #[test]
    fn test_surrender_completes() {
        let (engine, mut state) = new_match(MatchConfig::default());
        engine.surrender(&mut state, PlayerId::TWO).unwrap();

        assert_eq!(state.status, MatchStatus::Completed);
        assert_eq!(state.winner, Some(PlayerId::ONE));
        assert_eq!(engine.is_terminal(&state), Some(GameResult::Winner(PlayerId::ONE)));
        assert_eq!(
            engine.surrender(&mut state, PlayerId::ONE).unwrap_err(),
            EngineError::MatchCompleted
        );
        assert_eq!(engine.outcome(&state).unwrap().winner_user_id.as_deref(), Some("alice"));
    }

    #[test]
    fn test_draw_and_discard() {
        let (engine, mut state) = new_match(MatchConfig::default().with_opening_hand_size(3));
        assert_eq!(state.player(PlayerId::ONE).hand.len(), 3);

        let events = engine.draw_card(&mut state, PlayerId::ONE).unwrap();
        assert_eq!(state.player(PlayerId::ONE).hand.len(), 4);
        assert!(matches!(events[0].kind, EventKind::CardDrawn));

        let second = state.player(PlayerId::ONE).hand[1];
        engine.discard_card(&mut state, PlayerId::ONE, Some(1)).unwrap();
        assert!(state.player(PlayerId::ONE).discard_pile.contains(&second));

        engine.discard_card(&mut state, PlayerId::ONE, None).unwrap();
        assert_eq!(state.player(PlayerId::ONE).hand.len(), 2);
        assert_eq!(state.player(PlayerId::ONE).discard_pile.len(), 2);
        assert_eq!(state.current_player, PlayerId::ONE);
    }

    #[test]
    fn test_apply_for_user() {
        let (engine, mut state) = new_match(MatchConfig::default());
        assert_eq!(
            engine.apply_for_user(&mut state, "mallory", &Action::EndTurn).unwrap_err(),
            EngineError::UnknownUser("mallory".into())
        );
        engine.apply_for_user(&mut state, "alice", &Action::EndTurn).unwrap();
        assert_eq!(state.current_player, PlayerId::TWO);
    }

    #[test]
    fn test_legal_actions() {
        let (engine, mut state) = new_match(MatchConfig::default());
        assert_eq!(engine.legal_actions(&state, PlayerId::ONE).len(), 5 * 16);
        assert!(engine.legal_actions(&state, PlayerId::TWO).is_empty());

        state.players[PlayerId::ONE].hand.clear();
        assert_eq!(engine.legal_actions(&state, PlayerId::ONE), vec![Action::EndTurn]);
    }

    #[test]
    fn test_round_moments_follow_seats() {
        let (engine, mut state) = new_match(MatchConfig::default());
        let card = first_card(&state, PlayerId::TWO);
        // Swap in a Dawn card for seat two so its round-start buff is visible.
        let dawn = crate::cards::catalog::sample_catalog()
            .find_by_name("Amaterasu")
            .cloned()
            .unwrap();
        state
            .cards
            .insert(card, crate::cards::InGameCard::new(card, dawn, PlayerId::TWO));

        engine.end_turn(&mut state, PlayerId::ONE).unwrap();
        engine
            .place_card(&mut state, PlayerId::TWO, card, BoardPosition::new(2, 2))
            .unwrap();

        // Seat two's turn closed the round; seat one's new turn opened the next.
        assert_eq!(state.current_player, PlayerId::ONE);
        assert_eq!(state.turn_number, 3);
        assert_eq!(state.card(card).unwrap().current_power, PowerValues::new(7, 6, 6, 7));
    }
}
