//! Match lifecycle integration tests.
//!
//! Full matches built from the sample catalog, played through the public
//! engine API from initialization to the finished-match record.

use mythic_triad::cards::catalog::{id_of, ids_tagged, sample_provider};
use mythic_triad::cards::InMemoryCardProvider;
use mythic_triad::core::{
    Action, CardDataError, EngineError, GameRng, InstanceId, MatchConfig, MatchState, MatchStatus,
    PlayerId,
};
use mythic_triad::outbound::{flush_outbound, AnalyticsError, AnalyticsEvent, AnalyticsSink};
use mythic_triad::rules::{GameResult, MatchEngine, MatchSetup, RulesEngine};
use mythic_triad::triggers::EventKind;

fn decks(provider: &mut InMemoryCardProvider) -> (Vec<InstanceId>, Vec<InstanceId>) {
    let mut first = ids_tagged("Norse");
    first.extend(ids_tagged("Egyptian"));
    let mut second = ids_tagged("Greek");
    second.extend(ids_tagged("Japanese"));
    (provider.mint_deck(&first), provider.mint_deck(&second))
}

fn new_match(seed: u64) -> (MatchEngine, MatchState) {
    let mut provider = sample_provider();
    let (first, second) = decks(&mut provider);
    let engine = MatchEngine::new(MatchConfig::default().with_seed(seed));
    let state = engine
        .initialize(MatchSetup::new("alice", first, "bob", second), &provider)
        .unwrap();
    (engine, state)
}

/// Play random legal actions to the end, checking invariants on the way.
/// Returns every event produced.
fn play_out(engine: &MatchEngine, state: &mut MatchState, seed: u64) -> Vec<mythic_triad::GameEvent> {
    let mut picker = GameRng::new(seed);
    let mut log = Vec::new();

    for _ in 0..200 {
        if engine.is_terminal(state).is_some() {
            return log;
        }
        let seat = engine.to_move(state);
        let actions = engine.legal_actions(state, seat);
        assert!(!actions.is_empty(), "an active match always offers an action");
        let action = picker.choose(&actions).unwrap().clone();

        let events = engine.apply_action(state, seat, &action).unwrap();
        assert!(events.windows(2).all(|pair| pair[0].seq < pair[1].seq));
        log.extend(events);

        let (first, second) = state.scores();
        assert_eq!((first + second) as usize, state.board.occupied_count());
        if state.is_active() {
            assert_eq!(state.current_player, seat.opponent());
        }
        assert!(state.cards.values().all(|card| {
            let power = card.current_power;
            power.top >= 0 && power.right >= 0 && power.bottom >= 0 && power.left >= 0
        }));
    }
    panic!("match did not finish within 200 actions");
}

#[test]
fn test_full_match_completes() {
    let (engine, mut state) = new_match(7);
    let log = play_out(&engine, &mut state, 1);

    assert_eq!(state.status, MatchStatus::Completed);
    assert!(matches!(log.last().map(|e| &e.kind), Some(EventKind::GameEnded { .. })));

    let outcome = engine.outcome(&state).unwrap();
    assert_eq!(outcome.user_ids, ("alice".to_string(), "bob".to_string()));
    assert_eq!(outcome.scores, state.scores());
    let (first, second) = outcome.scores;
    match engine.is_terminal(&state).unwrap() {
        GameResult::Winner(PlayerId::ONE) => assert!(first > second),
        GameResult::Winner(_) => assert!(second > first),
        GameResult::Draw => assert_eq!(first, second),
    }
}

#[test]
fn test_same_seed_same_match() {
    let run = || {
        let (engine, mut state) = new_match(21);
        let log = play_out(&engine, &mut state, 5);
        (state.to_bytes().unwrap(), log)
    };
    let (bytes_a, log_a) = run();
    let (bytes_b, log_b) = run();
    assert_eq!(bytes_a, bytes_b);
    assert_eq!(log_a, log_b);
}

#[test]
fn test_history_records_accepted_actions() {
    let (engine, mut state) = new_match(3);
    let card = state.player(PlayerId::ONE).hand[0];
    let target = mythic_triad::board::BoardPosition::new(0, 0);

    engine.place_card(&mut state, PlayerId::ONE, card, target).unwrap();
    assert!(engine.end_turn(&mut state, PlayerId::ONE).is_err());
    engine.end_turn(&mut state, PlayerId::TWO).unwrap();

    let recorded: Vec<_> = state.history.iter().map(|r| (r.player, r.action.clone(), r.turn)).collect();
    assert_eq!(
        recorded,
        vec![
            (PlayerId::ONE, Action::place(card, target), 1),
            (PlayerId::TWO, Action::EndTurn, 2),
        ]
    );
}

#[test]
fn test_initialize_rejects_unknown_base() {
    let mut provider = sample_provider();
    let deck = provider.mint_deck(&[id_of("Thor").unwrap()]);
    let stray = InstanceId::new(900);
    provider.add_instance(stray, mythic_triad::core::BaseCardId::new(777));

    let err = MatchEngine::default()
        .initialize(MatchSetup::new("alice", deck, "bob", vec![stray]), &provider)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::CardData(CardDataError::MissingDefinition(mythic_triad::core::BaseCardId::new(777)))
    );
}

#[test]
fn test_unhydrated_card_rejects_only_that_placement() {
    let (engine, mut state) = new_match(4);
    let card = state.player(PlayerId::ONE).hand[0];
    state.cards.remove(&card);
    let before = state.clone();

    let err = engine
        .place_card(&mut state, PlayerId::ONE, card, mythic_triad::board::BoardPosition::new(2, 2))
        .unwrap_err();
    assert_eq!(err, EngineError::CardData(CardDataError::NotHydrated(card)));
    assert_eq!(state, before);

    // The rest of the hand still plays.
    let other = state.player(PlayerId::ONE).hand[1];
    engine
        .place_card(&mut state, PlayerId::ONE, other, mythic_triad::board::BoardPosition::new(2, 2))
        .unwrap();
}

#[test]
fn test_surrender_any_time() {
    let (engine, mut state) = new_match(9);
    // Not seat one's turn to act otherwise, but a concession is always accepted.
    engine.end_turn(&mut state, PlayerId::ONE).unwrap();
    let events = engine.surrender(&mut state, PlayerId::ONE).unwrap();

    assert_eq!(events.last().unwrap().kind, EventKind::GameEnded { winner: Some(PlayerId::TWO) });
    assert_eq!(engine.outcome(&state).unwrap().winner_user_id.as_deref(), Some("bob"));
    assert!(engine.legal_actions(&state, PlayerId::TWO).is_empty());
}

#[test]
fn test_discarding_the_last_card_ends_the_match() {
    let mut provider = sample_provider();
    let mine = provider.mint_deck(&[id_of("Einherjar").unwrap()]);
    let theirs = provider.mint_deck(&[id_of("Hoplite").unwrap()]);
    let engine = MatchEngine::default();
    let mut state = engine
        .initialize(MatchSetup::new("alice", mine.clone(), "bob", theirs), &provider)
        .unwrap();

    engine
        .place_card(&mut state, PlayerId::ONE, mine[0], mythic_triad::board::BoardPosition::new(1, 1))
        .unwrap();
    assert!(state.is_active());

    let events = engine.discard_card(&mut state, PlayerId::TWO, Some(0)).unwrap();
    assert_eq!(state.status, MatchStatus::Completed);
    assert_eq!(state.winner, Some(PlayerId::ONE));
    assert_eq!(events.last().unwrap().kind, EventKind::GameEnded { winner: Some(PlayerId::ONE) });
    assert_eq!(engine.end_turn(&mut state, PlayerId::ONE).unwrap_err(), EngineError::MatchCompleted);
}

struct Recorder {
    seen: Vec<AnalyticsEvent>,
    fail: bool,
}

impl AnalyticsSink for Recorder {
    fn record(&mut self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        if self.fail {
            return Err(AnalyticsError("offline".into()));
        }
        self.seen.push(event.clone());
        Ok(())
    }
}

#[test]
fn test_outbound_queue_is_drained_by_caller() {
    // Hades destroys the wolf and curses its tile.
    let mut provider = sample_provider();
    let hades = provider.mint_deck(&[id_of("Hades").unwrap()]);
    let wolf = provider.mint_deck(&[id_of("Grey Wolf").unwrap()]);
    let engine = MatchEngine::default();
    let mut state = engine
        .initialize(MatchSetup::new("alice", hades.clone(), "bob", wolf.clone()), &provider)
        .unwrap();

    let at = mythic_triad::board::BoardPosition::new;
    engine.end_turn(&mut state, PlayerId::ONE).unwrap();
    engine.place_card(&mut state, PlayerId::TWO, wolf[0], at(1, 1)).unwrap();
    engine.place_card(&mut state, PlayerId::ONE, hades[0], at(1, 2)).unwrap();

    assert_eq!(state.pending_outbound(), 2);
    let mut copy = state.clone();
    let mut working = Recorder { seen: Vec::new(), fail: false };
    assert_eq!(flush_outbound(&mut copy, &mut working), 2);
    assert_eq!(
        working.seen,
        vec![
            AnalyticsEvent::CardDestroyed { user_id: "alice".into(), card: id_of("Grey Wolf").unwrap() },
            AnalyticsEvent::TileCursed { user_id: "alice".into() },
        ]
    );

    let mut failing = Recorder { seen: Vec::new(), fail: true };
    assert_eq!(flush_outbound(&mut state, &mut failing), 0);
    assert_eq!(state.pending_outbound(), 0);
    assert!(failing.seen.is_empty());
}
