//! Trigger pipeline ordering, observed through the engine's event log.

use mythic_triad::board::BoardPosition;
use mythic_triad::cards::catalog::{id_of, sample_provider};
use mythic_triad::core::{InstanceId, MatchConfig, MatchState, PlayerId};
use mythic_triad::rules::{MatchEngine, MatchSetup};
use mythic_triad::triggers::{EventKind, GameEvent};

fn start(first: &[&str], second: &[&str]) -> (MatchEngine, MatchState, Vec<InstanceId>, Vec<InstanceId>) {
    let mut provider = sample_provider();
    let mut mint = |names: &[&str]| {
        let bases: Vec<_> = names.iter().map(|name| id_of(name).unwrap()).collect();
        provider.mint_deck(&bases)
    };
    let first_ids = mint(first);
    let second_ids = mint(second);
    let engine = MatchEngine::new(MatchConfig::default());
    let state = engine
        .initialize(
            MatchSetup::new("alice", first_ids.clone(), "bob", second_ids.clone()),
            &provider,
        )
        .unwrap();
    (engine, state, first_ids, second_ids)
}

/// A compact trace: ability names plus the combat and flow events around them.
fn trace(events: &[GameEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match &e.kind {
            EventKind::AbilityActivated { ability } => Some(ability.clone()),
            EventKind::CardPlaced => Some("placed".to_string()),
            EventKind::CardFlipped { .. } => Some("flipped".to_string()),
            EventKind::TurnEnded { .. } => Some("turn ended".to_string()),
            _ => None,
        })
        .collect()
}

/// The placed card's own ability, then hand watchers, then board watchers.
#[test]
fn test_own_then_hand_then_board() {
    let (engine, mut state, mine, theirs) = start(&["Set", "Sekhmet"], &["Ryujin"]);

    engine.end_turn(&mut state, PlayerId::ONE).unwrap();
    engine
        .place_card(&mut state, PlayerId::TWO, theirs[0], BoardPosition::new(1, 1))
        .unwrap();
    let events = engine
        .place_card(&mut state, PlayerId::ONE, mine[0], BoardPosition::new(1, 0))
        .unwrap();

    assert_eq!(
        trace(&events),
        vec!["placed", "Chaos", "Bloodlust", "Tide", "turn ended"]
    );
}

/// OnFlip fires on the attacker before the flip, OnFlipped on the defender after.
#[test]
fn test_flip_moments_bracket_the_flip() {
    let (engine, mut state, mine, theirs) = start(&["Fenrir", "Einherjar", "Hoplite"], &["Inari"]);

    engine.end_turn(&mut state, PlayerId::ONE).unwrap();
    engine
        .place_card(&mut state, PlayerId::TWO, theirs[0], BoardPosition::new(1, 0))
        .unwrap();
    let events = engine
        .place_card(&mut state, PlayerId::ONE, mine[0], BoardPosition::new(1, 1))
        .unwrap();

    assert_eq!(
        trace(&events),
        vec!["placed", "Ravenous", "flipped", "Rice Tithe", "turn ended"]
    );
}

/// Turn-end watchers fire before the hand-off, turn-start watchers after.
#[test]
fn test_lifecycle_moments_around_handoff() {
    let (engine, mut state, mine, theirs) = start(&["Apollo", "Einherjar"], &["Hoplite", "Ashigaru"]);

    engine
        .place_card(&mut state, PlayerId::ONE, mine[1], BoardPosition::new(0, 0))
        .unwrap();
    engine
        .place_card(&mut state, PlayerId::TWO, theirs[0], BoardPosition::new(3, 3))
        .unwrap();
    let events = engine
        .place_card(&mut state, PlayerId::ONE, mine[0], BoardPosition::new(1, 0))
        .unwrap();

    // Radiance: Apollo's turn-end buff on the adjacent Einherjar.
    assert_eq!(trace(&events), vec!["placed", "Radiance", "turn ended"]);
    let einherjar = state.card(mine[1]).unwrap();
    assert_eq!(einherjar.current_power.total(), 14 + 4);
}
