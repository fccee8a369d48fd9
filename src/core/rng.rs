//! Seeded random source for computer competitors.
//!
//! The engine itself never draws random numbers: cascades and turn order
//! are fully determined by the placements. Only the move selector needs
//! randomness (score jitter and the top-K pick), and it always takes a
//! `GameRng` by `&mut`, so two peers seeded alike pick the same moves.
//!
//! ```
//! use chain_reaction::core::{CompetitorId, GameRng};
//!
//! let match_rng = GameRng::new(42);
//! let mut bot = match_rng.for_competitor(CompetitorId::new(2));
//! let mut same_bot = match_rng.for_competitor(CompetitorId::new(2));
//! assert_eq!(bot.pick_index(10), same_bot.pick_index(10));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::player::CompetitorId;

/// ChaCha8 stream plus the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a stream from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy. The drawn seed is kept so `state()` still
    /// captures a resumable position.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream for one competitor's bot, derived from this seed.
    ///
    /// Does not advance `self`.
    #[must_use]
    pub fn for_competitor(&self, competitor: CompetitorId) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        competitor.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform float in `[0, upper)`; 0 when `upper` is not positive.
    pub fn jitter(&mut self, upper: f64) -> f64 {
        if upper > 0.0 {
            self.inner.gen_range(0.0..upper)
        } else {
            0.0
        }
    }

    /// Uniform index below `len`, or `None` for an empty range.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// Uniform element of `slice`.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Current stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume exactly where `state` was captured.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng
    }
}

/// Serializable stream position, stored in match snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed of the stream.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}
