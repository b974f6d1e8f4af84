//! Engine error types.
//!
//! Two families:
//! - [`EngineError`]: an operation was rejected. The caller's state is untouched.
//! - [`CardDataError`]: card data could not be hydrated or failed validation.

use thiserror::Error;

use super::entity::{BaseCardId, InstanceId};
use super::player::PlayerId;
use crate::board::BoardPosition;

/// Card data / hydration failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CardDataError {
    /// The data provider has no record of this instance.
    #[error("card instance {0} is unknown to the card data provider")]
    MissingInstance(InstanceId),

    /// An instance references a base card that is not registered.
    #[error("base card {0} is not registered")]
    MissingDefinition(BaseCardId),

    /// An ability declares a trigger moment that does not exist.
    #[error("ability '{ability}' declares unknown trigger moment '{moment}'")]
    UnknownTrigger { ability: String, moment: String },

    /// An ability declares no trigger moments at all.
    #[error("ability '{0}' declares no trigger moments")]
    EmptyTriggerList(String),

    /// A card reachable from hand, deck or board is missing from the hydration cache.
    #[error("card instance {0} has not been hydrated")]
    NotHydrated(InstanceId),
}

/// Rejected engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The match is over; no further state changes are accepted.
    #[error("the match is already completed")]
    MatchCompleted,

    /// The acting seat is not the current player.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// The card is not in the acting seat's hand.
    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, card: InstanceId },

    /// The target position is outside the 4x4 board.
    #[error("position ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    /// The target cell already holds a card.
    #[error("cell {0} is occupied")]
    CellOccupied(BoardPosition),

    /// The target cell is disabled, blocked or removed.
    #[error("cell {0} cannot hold a card")]
    TileUnavailable(BoardPosition),

    /// Discard from an empty hand.
    #[error("{0} has no cards in hand")]
    EmptyHand(PlayerId),

    /// Discard index past the end of the hand.
    #[error("discard index {index} is out of range for a hand of {len}")]
    InvalidDiscardIndex { index: usize, len: usize },

    /// No seat belongs to this user.
    #[error("user '{0}' is not seated in this match")]
    UnknownUser(String),

    /// The seat id is not one of the two seats.
    #[error("{0} is not a seat in this match")]
    UnknownSeat(PlayerId),

    /// Card data problem for the card this operation needed.
    #[error(transparent)]
    CardData(#[from] CardDataError),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
