//! Messages between abilities and the combat resolver.

use serde::{Deserialize, Serialize};

use crate::board::{BoardPosition, Direction};
use crate::core::InstanceId;

/// Follow-up combat an ability asks for.
///
/// Abilities never start combat themselves. They queue a request and the
/// resolver drains the queue after the directional scan and again after
/// `AfterCombat`, up to the match's chain depth limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatRequest {
    /// The card at `from` attacks its own neighbors.
    ChainAttack { from: BoardPosition },
    /// Flip the card at `position` without a power comparison.
    ForcedFlip { position: BoardPosition, by: InstanceId },
}

/// A comparison the attacker is about to win, offered to interceptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interception {
    pub attacker: InstanceId,
    pub attacker_position: BoardPosition,
    pub defender: InstanceId,
    pub defender_position: BoardPosition,
    /// From the attacker toward the defender.
    pub direction: Direction,
    pub attack: i32,
    pub defense: i32,
}

impl Interception {
    /// How much the attack exceeds the defense.
    #[must_use]
    pub fn margin(&self) -> i32 {
        self.attack - self.defense
    }
}
