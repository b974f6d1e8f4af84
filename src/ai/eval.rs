//! Static position evaluation.
//!
//! Values are from one seat's point of view, higher is better:
//!
//! | Position | Value |
//! |----------|-------|
//! | won | `WIN_SCORE` |
//! | lost | `-WIN_SCORE` |
//! | drawn | 0 |
//! | in progress | score difference x 100 + owned power difference |
//!
//! Owned power can never reach 100 on a 4x4 board of realistic cards, so
//! one extra cell always outweighs any amount of extra power.

use crate::core::{MatchState, MatchStatus, PlayerId};

/// Value of a won position.
pub const WIN_SCORE: i64 = 1_000_000;

const CELL_WEIGHT: i64 = 100;

/// Evaluate `state` for `player`.
#[must_use]
pub fn evaluate(state: &MatchState, player: PlayerId) -> i64 {
    if state.status == MatchStatus::Completed {
        return match state.winner {
            Some(winner) if winner == player => WIN_SCORE,
            Some(_) => -WIN_SCORE,
            None => 0,
        };
    }

    let opponent = player.opponent();
    let cells = i64::from(state.player(player).score) - i64::from(state.player(opponent).score);
    CELL_WEIGHT * cells + owned_power(state, player) - owned_power(state, opponent)
}

/// Sum of current power over the board cards `player` owns.
#[must_use]
pub fn owned_power(state: &MatchState, player: PlayerId) -> i64 {
    state
        .board
        .occupied()
        .filter_map(|(_, id)| state.card(id))
        .filter(|card| card.owner == player)
        .map(|card| i64::from(card.current_power.total()))
        .sum()
}
