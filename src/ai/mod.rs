//! Move selection by lookahead.
//!
//! ## Overview
//!
//! - **Same path as players**: moves are tried through
//!   [`RulesEngine::apply_action`](crate::rules::RulesEngine::apply_action)
//! - **Snapshots**: every branch is a cheap clone with its own random source
//! - **Anytime**: iterative deepening under a wall-clock budget
//!
//! ## Usage
//!
//! ```rust
//! use mythic_triad::ai::{LookaheadConfig, LookaheadSearch};
//! use mythic_triad::core::{MatchState, PlayerId};
//! use mythic_triad::rules::MatchEngine;
//!
//! fn suggest(state: &MatchState) {
//!     let config = LookaheadConfig::default().with_max_depth(2);
//!     let mut search = LookaheadSearch::new(MatchEngine::default(), config);
//!
//!     if let Some(action) = search.best_action(state, PlayerId::TWO) {
//!         println!("suggested: {:?}", action);
//!     }
//!     println!("{} nodes", search.stats().nodes);
//! }
//! ```

pub mod config;
pub mod eval;
pub mod search;
pub mod stats;

pub use config::LookaheadConfig;
pub use eval::{evaluate, WIN_SCORE};
pub use search::LookaheadSearch;
pub use stats::LookaheadStats;
