//! Core engine types: ids, seats, state, actions, RNG, configuration, errors.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{MatchConfig, PERMANENT_DURATION};
pub use entity::{BaseCardId, InstanceId};
pub use error::{CardDataError, EngineError, EngineResult};
pub use player::{PlayerId, PlayerMap, SEAT_COUNT};
pub use rng::{GameRng, RngCheckpoint};
pub use state::{CardArena, MatchState, MatchStatus, Player};
