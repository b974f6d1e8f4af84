//! # mythic-triad
//!
//! Server-authoritative match engine for a 4x4 tile-placement card battle
//! with mythological card sets.
//!
//! ## Design Principles
//!
//! 1. **Transactional operations**: every state change runs against a
//!    snapshot and commits only on success. A rejected action leaves the
//!    caller's state byte-for-byte unchanged.
//!
//! 2. **Deterministic**: all randomness flows from one seeded, serializable
//!    random source on the match state. Same seed and same actions give
//!    identical states and event logs.
//!
//! 3. **Closed ability dispatch**: abilities are an enum mapped to plain
//!    function handlers. Card data is validated when it is loaded, and
//!    handlers mutate the match only through a scoped context.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, used for
//!   operation snapshots and lookahead branches alike.
//!
//! - **Events, not callbacks**: operations return an ordered event log for
//!   the presentation layer; analytics go to an outbound queue the caller
//!   drains.
//!
//! ## Modules
//!
//! - `core`: ids, seats, match state, actions, RNG, configuration, errors
//! - `board`: the 4x4 grid, tile effects and read-only board queries
//! - `cards`: card definitions, in-match instances and card data providers
//! - `effects`: power values and temporary effects
//! - `triggers`: trigger moments, events and the trigger pipeline
//! - `abilities`: the ability table and every built-in ability
//! - `combat`: adjacency combat and the flip procedure
//! - `rules`: `RulesEngine` and the match state machine
//! - `outbound`: analytics queue and the finished-match record
//! - `ai`: iterative-deepening lookahead

pub mod abilities;
pub mod ai;
pub mod board;
pub mod cards;
pub mod combat;
pub mod core;
pub mod effects;
pub mod outbound;
pub mod rules;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, BaseCardId, CardDataError, EngineError, EngineResult, GameRng,
    InstanceId, MatchConfig, MatchState, MatchStatus, PlayerId, PlayerMap,
};

pub use crate::board::{Board, BoardPosition, Direction, TileEffect, TileStatus};

pub use crate::cards::{CardDataProvider, CardDefinition, CardRegistry, InGameCard, InMemoryCardProvider};

pub use crate::effects::{EffectKind, PowerDelta, PowerValues, TemporaryEffect};

pub use crate::triggers::{EventKind, GameEvent, TriggerMoment};

pub use crate::abilities::{AbilityId, AbilityTable};

pub use crate::rules::{GameResult, MatchEngine, MatchSetup, RulesEngine};

pub use crate::outbound::{AnalyticsEvent, MatchOutcome};

pub use crate::ai::{LookaheadConfig, LookaheadSearch, LookaheadStats};
