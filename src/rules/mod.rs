//! Match rules.
//!
//! - [`RulesEngine`]: what the lookahead and transport layer drive
//! - [`MatchEngine`]: the match state machine (initialize, place, end
//!   turn, surrender, draw, discard)

pub mod engine;
mod match_engine;

pub use engine::{GameResult, RulesEngine};
pub use match_engine::{MatchEngine, MatchSetup};
