//! Deterministic random number generation.
//!
//! Every random decision the engine makes (deck shuffles, random ability
//! targets, random discard slots, coin-flip activations) draws from the
//! single [`GameRng`] stored on the match state. Seeding it fixes the whole
//! match, and serializing it with the state fixes every match that follows.
//!
//! ## Streams
//!
//! - The match stream: the RNG on `MatchState`, consumed by abilities and
//!   random discards in the order they happen.
//! - Named streams ([`GameRng::for_context`]): derived from the seed and a
//!   label, e.g. one per seat for the opening shuffle, so shuffling one
//!   deck never shifts the other.
//! - Forks ([`GameRng::fork`]): handed to lookahead branches, which must
//!   never advance the match stream.
//!
//! ```
//! use mythic_triad::core::GameRng;
//!
//! let mut match_rng = GameRng::new(42);
//! let mut branch = match_rng.fork();
//!
//! let mut replay = GameRng::new(42);
//! let mut replay_branch = replay.fork();
//! assert_eq!(branch.choose_index(100), replay_branch.choose_index(100));
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// The match's random source.
///
/// ChaCha8 underneath. Serializes as a [`RngCheckpoint`], so a saved match
/// resumes the exact sequence it left off at.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "RngCheckpoint", into = "RngCheckpoint")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split off an independent branch.
    ///
    /// Only the fork counter advances; the parent's own sequence is not
    /// consumed. The n-th fork of a given seed is always the same.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// A named stream derived from the seed and `context`.
    ///
    /// Does not touch `self`. The hash is `FxHasher`, which is stable across
    /// runs and platforms, so stored seeds replay identically.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A random index below `len`, or `None` when `len` is zero.
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// True with the given probability (clamped to `0.0..=1.0`).
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Capture the position in the sequence.
    #[must_use]
    pub fn checkpoint(&self) -> RngCheckpoint {
        RngCheckpoint {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            forks: self.forks,
        }
    }

    /// Resume from a checkpoint.
    #[must_use]
    pub fn restore(checkpoint: &RngCheckpoint) -> Self {
        let mut rng = Self::new(checkpoint.seed);
        rng.inner.set_word_pos(checkpoint.word_pos);
        rng.forks = checkpoint.forks;
        rng
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.checkpoint() == other.checkpoint()
    }
}

impl Eq for GameRng {}

impl From<RngCheckpoint> for GameRng {
    fn from(checkpoint: RngCheckpoint) -> Self {
        Self::restore(&checkpoint)
    }
}

impl From<GameRng> for RngCheckpoint {
    fn from(rng: GameRng) -> Self {
        rng.checkpoint()
    }
}

/// Serialized form of a [`GameRng`]. Constant size however long the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngCheckpoint {
    pub seed: u64,
    /// ChaCha word position.
    pub word_pos: u128,
    pub forks: u64,
}
