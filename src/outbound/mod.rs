//! What the engine hands to collaborators outside a match.
//!
//! - [`AnalyticsEvent`]: best-effort counters (daily tasks, achievements)
//!   queued on the match state while an operation runs
//! - [`flush_outbound`]: delivers the queue to an [`AnalyticsSink`] after
//!   the operation has returned; failures are logged and dropped
//! - [`MatchOutcome`]: the final result for rating, rewards and history
//!
//! The engine never calls out while resolving an action. Delivery is the
//! caller's job and can never fail or block the operation that produced
//! the events.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{BaseCardId, MatchState, MatchStatus, PlayerId};

/// A best-effort analytics counter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalyticsEvent {
    /// A card ability destroyed an enemy card.
    CardDestroyed { user_id: String, card: BaseCardId },
    /// A card ability cursed a tile.
    TileCursed { user_id: String },
    /// A card ability blessed a tile.
    TileBlessed { user_id: String },
    /// A card ability took control of an enemy card.
    CardStolen { user_id: String, card: BaseCardId },
}

impl AnalyticsEvent {
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            AnalyticsEvent::CardDestroyed { user_id, .. }
            | AnalyticsEvent::TileCursed { user_id }
            | AnalyticsEvent::TileBlessed { user_id }
            | AnalyticsEvent::CardStolen { user_id, .. } => user_id,
        }
    }
}

/// Delivery failure reported by a sink.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("analytics delivery failed: {0}")]
pub struct AnalyticsError(pub String);

/// Receiver for analytics events.
pub trait AnalyticsSink {
    fn record(&mut self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Drain the state's analytics queue into `sink`.
///
/// Every event is attempted once. Failures are logged and dropped.
/// Returns how many were delivered.
pub fn flush_outbound(state: &mut MatchState, sink: &mut dyn AnalyticsSink) -> usize {
    let mut delivered = 0;
    for event in state.drain_outbound() {
        match sink.record(&event) {
            Ok(()) => delivered += 1,
            Err(err) => log::warn!("dropping analytics event {:?}: {}", event, err),
        }
    }
    delivered
}

/// Final result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// `None` for a draw.
    pub winner: Option<PlayerId>,
    pub winner_user_id: Option<String>,
    pub user_ids: (String, String),
    pub scores: (u32, u32),
    pub turns: u32,
}

impl MatchOutcome {
    /// Summarize a completed match. `None` while it is still active.
    #[must_use]
    pub fn from_state(state: &MatchState) -> Option<Self> {
        if state.status != MatchStatus::Completed {
            return None;
        }
        Some(Self {
            winner: state.winner,
            winner_user_id: state
                .winner
                .map(|seat| state.player(seat).user_id.clone()),
            user_ids: (
                state.player(PlayerId::ONE).user_id.clone(),
                state.player(PlayerId::TWO).user_id.clone(),
            ),
            scores: state.scores(),
            turns: state.turn_number,
        })
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}
