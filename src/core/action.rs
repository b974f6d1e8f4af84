//! Player actions.
//!
//! Every state change a client (or the lookahead) can request is one
//! [`Action`]. The engine applies human and AI actions through the same
//! path; there is no special-cased AI entry point.

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::player::PlayerId;
use crate::board::BoardPosition;

/// A requested state change.
///
/// ```
/// use mythic_triad::board::BoardPosition;
/// use mythic_triad::core::{Action, InstanceId};
///
/// let place = Action::place(InstanceId::new(4), BoardPosition::new(1, 1));
/// assert!(place.is_placement());
/// assert!(!Action::EndTurn.is_placement());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place a card from hand onto the board.
    PlaceCard {
        card: InstanceId,
        position: BoardPosition,
    },
    /// End the turn without placing.
    EndTurn,
    /// Concede the match.
    Surrender,
    /// Draw the next card from the deck.
    DrawCard,
    /// Discard a card from hand; `None` picks a random slot.
    DiscardCard { index: Option<usize> },
}

impl Action {
    /// Create a placement action.
    #[must_use]
    pub fn place(card: InstanceId, position: BoardPosition) -> Self {
        Self::PlaceCard { card, position }
    }

    /// Check if this is a placement.
    #[must_use]
    pub fn is_placement(&self) -> bool {
        matches!(self, Self::PlaceCard { .. })
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay/debugging and by the lookahead for move ordering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32) -> Self {
        Self {
            player,
            action,
            turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_constructor() {
        let action = Action::place(InstanceId(1), BoardPosition::new(2, 3));
        assert_eq!(
            action,
            Action::PlaceCard {
                card: InstanceId(1),
                position: BoardPosition::new(2, 3),
            }
        );
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(
            PlayerId::TWO,
            Action::DiscardCard { index: Some(2) },
            7,
        );
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
