//! Lookahead configuration parameters.

use serde::{Deserialize, Serialize};

/// Lookahead configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookaheadConfig {
    /// Deepest iteration, in plies. Each ply is one action by one seat.
    pub max_depth: u32,

    /// Wall-clock budget per decision in milliseconds (0 = unlimited).
    pub time_budget_ms: u64,

    /// Seed for the random source handed to speculative branches.
    /// Same seed produces the same speculative dice.
    pub seed: u64,

    /// Actions considered per node (0 = unlimited).
    /// Keeps wide positions inside the time budget.
    pub max_branching: usize,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            time_budget_ms: 150,
            seed: 42,
            max_branching: 0,
        }
    }
}

impl LookaheadConfig {
    /// Create a new config with custom max depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Create a new config with a custom time budget.
    #[must_use]
    pub fn with_time_budget_ms(mut self, millis: u64) -> Self {
        self.time_budget_ms = millis;
        self
    }

    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a branching cap.
    #[must_use]
    pub fn with_max_branching(mut self, width: usize) -> Self {
        self.max_branching = width;
        self
    }
}
