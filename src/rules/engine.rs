//! Rules engine trait.
//!
//! The lookahead and the transport layer both drive matches through
//! `RulesEngine`, so an AI move and a human move take the same path.

use crate::core::{Action, EngineResult, MatchConfig, MatchState, PlayerId};
use crate::triggers::GameEvent;

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Equal scores, or no winner recorded.
    Draw,
}

impl GameResult {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: return empty if the seat cannot act
/// - `apply_action`: must be deterministic given the state's random source,
///   and must leave `state` untouched when it returns `Err`
/// - `is_terminal`: return `None` while the match continues
pub trait RulesEngine {
    /// Get the match configuration.
    fn config(&self) -> &MatchConfig;

    /// Enumerate every legal action for a seat.
    fn legal_actions(&self, state: &MatchState, player: PlayerId) -> Vec<Action>;

    /// Apply an action and return the display events it caused.
    fn apply_action(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        action: &Action,
    ) -> EngineResult<Vec<GameEvent>>;

    /// Check if the match is over.
    fn is_terminal(&self, state: &MatchState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// The seat expected to act next.
    fn to_move(&self, state: &MatchState) -> PlayerId {
        state.current_player
    }
}
