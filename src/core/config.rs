//! Match configuration.
//!
//! The engine never hardcodes hand sizes or pacing knobs; a `MatchConfig`
//! is handed to [`MatchEngine`](crate::rules::MatchEngine) at construction.

use serde::{Deserialize, Serialize};

/// Duration used for "permanent" temporary effects.
///
/// Permanent-style buffs are stored as temporary effects with a duration
/// no match can outlive, so they share one decay path with real ones.
pub const PERMANENT_DURATION: u32 = 1000;

/// Configuration for a single match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Cards dealt to each seat at initialization.
    pub opening_hand_size: usize,

    /// Hand size the replacement draw refills up to.
    pub max_cards_in_hand: usize,

    /// Maximum events per display batch (presentation pacing only).
    pub event_batch_size: usize,

    /// Maximum rounds of chain attacks / forced flips per placement.
    pub max_chain_depth: u32,

    /// Seed for the match random source.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            opening_hand_size: 5,
            max_cards_in_hand: 5,
            event_batch_size: 6,
            max_chain_depth: 8,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Set the maximum hand size.
    #[must_use]
    pub fn with_max_cards_in_hand(mut self, size: usize) -> Self {
        self.max_cards_in_hand = size;
        self
    }

    /// Set the display batch size.
    #[must_use]
    pub fn with_event_batch_size(mut self, size: usize) -> Self {
        self.event_batch_size = size;
        self
    }

    /// Set the chain depth limit.
    #[must_use]
    pub fn with_max_chain_depth(mut self, depth: u32) -> Self {
        self.max_chain_depth = depth;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.opening_hand_size, 5);
        assert_eq!(config.max_cards_in_hand, 5);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MatchConfig::default()
            .with_opening_hand_size(3)
            .with_max_cards_in_hand(4)
            .with_event_batch_size(2)
            .with_max_chain_depth(1)
            .with_seed(7);

        assert_eq!(config.opening_hand_size, 3);
        assert_eq!(config.max_cards_in_hand, 4);
        assert_eq!(config.event_batch_size, 2);
        assert_eq!(config.max_chain_depth, 1);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_serialization() {
        let config = MatchConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
