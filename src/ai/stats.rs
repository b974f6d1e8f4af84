//! Lookahead statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookaheadStats {
    /// Positions visited, including leaves.
    pub nodes: u64,

    /// Deepest iteration that finished inside the budget.
    pub completed_depth: u32,

    /// Total time spent searching (microseconds).
    pub elapsed_us: u64,

    /// The budget ran out before the last iteration finished.
    pub timed_out: bool,
}

impl LookaheadStats {
    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate nodes per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.elapsed_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.elapsed_us as f64 / 1_000_000.0)
        }
    }
}
