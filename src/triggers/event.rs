//! Display events.
//!
//! Every state-changing operation returns an ordered `Vec<GameEvent>` for
//! the transport layer to animate. Event shape is a stable contract;
//! `animation` strings are opaque hints owned by the presentation layer.
//!
//! ## Timestamps
//!
//! `seq` is a logical clock owned by the match state, strictly increasing
//! across the whole match. Wall-clock time would make two identical runs
//! produce different logs.

use serde::{Deserialize, Serialize};

use crate::board::{BoardPosition, TileStatus};
use crate::core::{InstanceId, PlayerId};
use crate::effects::PowerDelta;

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    CardPlaced,
    CardFlipped { attacker: InstanceId },
    CardDefended { attacker: InstanceId },
    AbilityActivated { ability: String },
    PowerChanged { delta: PowerDelta },
    TileStateChanged { status: Option<TileStatus> },
    OwnershipChanged,
    CardRemoved,
    CardReturnedToHand,
    CardDrawn,
    CardDiscarded,
    TurnEnded { next_player: PlayerId },
    GameEnded { winner: Option<PlayerId> },
}

/// One display event.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameEvent {
    /// Logical timestamp.
    pub seq: u64,

    pub kind: EventKind,

    /// Seat the event is attributed to.
    pub player: Option<PlayerId>,

    pub card: Option<InstanceId>,

    pub position: Option<BoardPosition>,

    /// Opaque presentation hint.
    pub animation: Option<String>,

    /// Display batch, assigned by [`batch_events`].
    pub batch: u32,
}

impl GameEvent {
    /// Create an event. Prefer [`MatchState::event`](crate::core::MatchState::event),
    /// which assigns the next timestamp.
    pub fn new(seq: u64, kind: EventKind) -> Self {
        Self {
            seq,
            kind,
            player: None,
            card: None,
            position: None,
            animation: None,
            batch: 0,
        }
    }

    /// Set the attributed seat (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Set the card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: InstanceId) -> Self {
        self.card = Some(card);
        self
    }

    /// Set the board position (builder pattern).
    #[must_use]
    pub fn at(mut self, position: BoardPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the position if known (builder pattern).
    #[must_use]
    pub fn at_opt(mut self, position: Option<BoardPosition>) -> Self {
        self.position = position;
        self
    }

    /// Set the presentation hint (builder pattern).
    #[must_use]
    pub fn with_animation(mut self, animation: Option<String>) -> Self {
        self.animation = animation;
        self
    }
}

/// Group events into display batches of at most `batch_size`.
///
/// Purely a pacing aid for the presentation layer; order is untouched.
pub fn batch_events(events: &mut [GameEvent], batch_size: usize) {
    let size = batch_size.max(1);
    for (chunk_index, chunk) in events.chunks_mut(size).enumerate() {
        let batch = u32::try_from(chunk_index).unwrap_or(u32::MAX);
        for event in chunk {
            event.batch = batch;
        }
    }
}
