//! Combat integration tests.
//!
//! Every scenario is driven through `MatchEngine` so validation, combat,
//! scoring and the end-of-turn sweep all take part.

use std::sync::Arc;

use mythic_triad::board::BoardPosition;
use mythic_triad::cards::{CardDefinition, CardRegistry, InGameCard, InMemoryCardProvider};
use mythic_triad::core::{BaseCardId, EngineError, InstanceId, MatchConfig, MatchState, MatchStatus, PlayerId};
use mythic_triad::effects::{add_status, EffectKind, PowerValues};
use mythic_triad::rules::{MatchEngine, MatchSetup};
use mythic_triad::triggers::EventKind;

/// A provider with one vanilla definition per power. Instance `i` is an
/// instance of definition `i`.
fn provider(powers: &[PowerValues]) -> InMemoryCardProvider {
    let mut registry = CardRegistry::new();
    for (i, power) in powers.iter().enumerate() {
        let id = BaseCardId::new(i as u32 + 1);
        registry.register(CardDefinition::new(id, format!("Card {}", i + 1), *power));
    }
    let mut provider = InMemoryCardProvider::new(registry);
    for i in 1..=powers.len() as u32 {
        provider.add_instance(InstanceId::new(i), BaseCardId::new(i));
    }
    provider
}

fn start(provider: &InMemoryCardProvider, first: &[u32], second: &[u32]) -> (MatchEngine, MatchState) {
    let deck = |ids: &[u32]| ids.iter().map(|id| InstanceId::new(*id)).collect::<Vec<_>>();
    let engine = MatchEngine::new(MatchConfig::default());
    let state = engine
        .initialize(MatchSetup::new("alice", deck(first), "bob", deck(second)), provider)
        .unwrap();
    (engine, state)
}

fn owner(state: &MatchState, id: u32) -> PlayerId {
    state.card(InstanceId::new(id)).unwrap().owner
}

/// Stronger facing edge flips the neighbor.
#[test]
fn test_stronger_edge_flips() {
    let provider = provider(&[PowerValues::new(5, 3, 2, 4), PowerValues::uniform(1)]);
    let (engine, mut state) = start(&provider, &[1], &[2]);

    engine.end_turn(&mut state, PlayerId::ONE).unwrap();
    engine
        .place_card(&mut state, PlayerId::TWO, InstanceId::new(2), BoardPosition::new(1, 0))
        .unwrap();
    let events = engine
        .place_card(&mut state, PlayerId::ONE, InstanceId::new(1), BoardPosition::new(1, 1))
        .unwrap();

    assert_eq!(owner(&state, 2), PlayerId::ONE);
    assert_eq!(state.scores(), (2, 0));
    let flip = events
        .iter()
        .find(|e| matches!(e.kind, EventKind::CardFlipped { .. }))
        .expect("a flip event");
    assert_eq!(flip.kind, EventKind::CardFlipped { attacker: InstanceId::new(1) });
    assert_eq!(flip.card, Some(InstanceId::new(2)));
    assert_eq!(flip.position, Some(BoardPosition::new(1, 0)));

    // Nobody has a card left to place.
    assert_eq!(state.status, MatchStatus::Completed);
    assert_eq!(state.winner, Some(PlayerId::ONE));
}

/// Only strictly greater wins; equal edges hold.
#[test]
fn test_equal_edges_hold() {
    let provider = provider(&[PowerValues::new(3, 9, 9, 9), PowerValues::new(9, 9, 3, 9)]);
    let (engine, mut state) = start(&provider, &[1], &[2]);

    engine.end_turn(&mut state, PlayerId::ONE).unwrap();
    engine
        .place_card(&mut state, PlayerId::TWO, InstanceId::new(2), BoardPosition::new(2, 2))
        .unwrap();
    let events = engine
        .place_card(&mut state, PlayerId::ONE, InstanceId::new(1), BoardPosition::new(2, 3))
        .unwrap();

    assert_eq!(owner(&state, 2), PlayerId::TWO);
    assert!(events
        .iter()
        .any(|e| e.kind == EventKind::CardDefended { attacker: InstanceId::new(1) }));
    assert_eq!(state.scores(), (1, 1));
    assert_eq!(state.winner, None);
}

/// BlockDefeat holds until two end-of-turn sweeps have run.
#[test]
fn test_block_defeat_expires() {
    let provider = provider(&[
        PowerValues::uniform(5),
        PowerValues::uniform(5),
        PowerValues::uniform(2),
    ]);
    let (engine, mut state) = start(&provider, &[1, 2], &[3]);
    let defender = InstanceId::new(3);

    engine.end_turn(&mut state, PlayerId::ONE).unwrap();
    engine
        .place_card(&mut state, PlayerId::TWO, defender, BoardPosition::new(1, 0))
        .unwrap();
    add_status(state.card_mut(defender).unwrap(), EffectKind::BlockDefeat, 2, "Shield");

    let events = engine
        .place_card(&mut state, PlayerId::ONE, InstanceId::new(1), BoardPosition::new(1, 1))
        .unwrap();
    assert_eq!(owner(&state, 3), PlayerId::TWO);
    assert!(events.iter().any(|e| e.kind == EventKind::CardDefended { attacker: InstanceId::new(1) }
        && e.card == Some(defender)));
    assert!(state.card(defender).unwrap().has_active_effect(EffectKind::BlockDefeat));

    // Seat two has nothing left; its pass is the second sweep.
    engine.end_turn(&mut state, PlayerId::TWO).unwrap();
    assert!(state.card(defender).unwrap().temporary_effects.is_empty());

    engine
        .place_card(&mut state, PlayerId::ONE, InstanceId::new(2), BoardPosition::new(0, 0))
        .unwrap();
    assert_eq!(owner(&state, 3), PlayerId::ONE);
    assert_eq!(state.scores(), (3, 0));
}

/// Placing the last card on a 9-7 board ends the match.
#[test]
fn test_full_board_completes() {
    let provider = provider(&[PowerValues::uniform(1), PowerValues::uniform(1)]);
    let (engine, mut state) = start(&provider, &[1], &[2]);

    let filler = Arc::new(CardDefinition::new(BaseCardId::new(99), "Wall", PowerValues::uniform(9)));
    let last = BoardPosition::new(3, 3);
    // Seat one owns the two neighbors of the last cell plus six more.
    let ones = [0, 1, 2, 3, 4, 5, 11, 14];
    for (n, pos) in BoardPosition::all().filter(|pos| *pos != last).enumerate() {
        let seat = if ones.contains(&pos.index()) { PlayerId::ONE } else { PlayerId::TWO };
        let id = InstanceId::new(100 + n as u32);
        state.cards.insert(id, InGameCard::new(id, Arc::clone(&filler), seat));
        assert!(state.board.place(pos, id));
    }
    state.recompute_scores();
    assert_eq!(state.scores(), (8, 7));

    let events = engine
        .place_card(&mut state, PlayerId::ONE, InstanceId::new(1), last)
        .unwrap();

    assert_eq!(state.status, MatchStatus::Completed);
    assert_eq!(state.winner, Some(PlayerId::ONE));
    assert_eq!(state.scores(), (9, 7));
    assert_eq!(
        events.last().map(|e| &e.kind),
        Some(&EventKind::GameEnded { winner: Some(PlayerId::ONE) })
    );

    let before = state.clone();
    let err = engine
        .place_card(&mut state, PlayerId::TWO, InstanceId::new(2), BoardPosition::new(0, 0))
        .unwrap_err();
    assert_eq!(err, EngineError::MatchCompleted);
    assert_eq!(state, before);
}

/// Disabled cells take no part in combat.
#[test]
fn test_disabled_cell_is_ignored() {
    let provider = provider(&[PowerValues::uniform(8), PowerValues::uniform(1)]);
    let (engine, mut state) = start(&provider, &[1], &[2]);

    engine.end_turn(&mut state, PlayerId::ONE).unwrap();
    engine
        .place_card(&mut state, PlayerId::TWO, InstanceId::new(2), BoardPosition::new(0, 1))
        .unwrap();
    state.board.cell_mut(BoardPosition::new(0, 1)).tile_enabled = false;

    engine
        .place_card(&mut state, PlayerId::ONE, InstanceId::new(1), BoardPosition::new(0, 0))
        .unwrap();
    assert_eq!(owner(&state, 2), PlayerId::TWO);
}

/// Jormungandr's flips keep attacking, bounded by the chain depth.
#[test]
fn test_chain_depth_bounds_cascades() {
    use mythic_triad::cards::catalog::{id_of, sample_provider};

    let run = |depth: u32| {
        let mut provider = sample_provider();
        let serpent = provider.mint_deck(&[id_of("Jormungandr").unwrap()]);
        let wolves = provider.mint_deck(&[id_of("Grey Wolf").unwrap(); 3]);
        let engine = MatchEngine::new(MatchConfig::default().with_max_chain_depth(depth));
        let mut state = engine
            .initialize(MatchSetup::new("alice", serpent.clone(), "bob", wolves.clone()), &provider)
            .unwrap();

        // Wolves in a column above the serpent's cell.
        engine.end_turn(&mut state, PlayerId::ONE).unwrap();
        for (i, wolf) in wolves.iter().enumerate() {
            let y = 2 - i as u8;
            engine
                .place_card(&mut state, PlayerId::TWO, *wolf, BoardPosition::new(0, y))
                .unwrap();
            if i + 1 < wolves.len() {
                engine.end_turn(&mut state, PlayerId::ONE).unwrap();
            }
        }
        engine
            .place_card(&mut state, PlayerId::ONE, serpent[0], BoardPosition::new(0, 3))
            .unwrap();
        state.scores()
    };

    // The serpent takes (0, 2); that wolf's top 3 then beats the bottom 1 above it.
    assert_eq!(run(8), (3, 1));
    assert_eq!(run(0), (2, 2));
}
