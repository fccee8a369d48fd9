//! Move selection policies.
//!
//! Policies only read the grid. They may be called speculatively and never
//! commit a move:
//! - `HeuristicPolicy`: scores every legal cell, picks among the top-K
//! - `RandomPolicy`: uniform over legal cells (baseline for simulations)

use serde::{Deserialize, Serialize};

use crate::core::{CompetitorId, GameRng};
use crate::error::{EngineError, Result};
use crate::grid::{Coord, Grid};

use super::heuristic::{score_in_bounds, HeuristicWeights};

/// Selector configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Scoring constants.
    pub weights: HeuristicWeights,

    /// Final choice is uniform among this many best-scoring candidates.
    pub top_k: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            weights: HeuristicWeights::default(),
            top_k: 3,
        }
    }
}

impl SelectorConfig {
    /// Set top-K.
    #[must_use]
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Set scoring weights.
    #[must_use]
    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(EngineError::InvalidConfig("top_k must be positive".to_string()));
        }
        if self.weights.jitter.is_nan() || self.weights.jitter < 0.0 {
            return Err(EngineError::InvalidConfig(
                "jitter must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Every legal candidate with its score, best first.
///
/// Ties keep row-major order.
pub fn ranked_moves(
    grid: &Grid,
    competitor: CompetitorId,
    weights: &HeuristicWeights,
    rng: &mut GameRng,
) -> Vec<(Coord, f64)> {
    let mut scored: Vec<(Coord, f64)> = grid
        .legal_placements(competitor)
        .map(|coord| {
            let score = score_in_bounds(grid, coord, competitor, weights) + rng.jitter(weights.jitter);
            (coord, score)
        })
        .collect();
    scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    scored
}

/// Pick a placement for `competitor`, or `None` when it has no legal cell.
pub fn find_best_move(
    grid: &Grid,
    competitor: CompetitorId,
    config: &SelectorConfig,
    rng: &mut GameRng,
) -> Option<Coord> {
    let ranked = ranked_moves(grid, competitor, &config.weights, rng);
    let k = config.top_k.max(1).min(ranked.len());
    let pick = rng.pick_index(k)?;
    Some(ranked[pick].0)
}

// =============================================================================
// Policies
// =============================================================================

/// Strategy a computer-controlled competitor plays with.
pub trait MovePolicy: Send + Sync {
    /// Choose a placement, or `None` when there is no legal cell.
    fn choose(&self, grid: &Grid, competitor: CompetitorId, rng: &mut GameRng) -> Option<Coord>;
}

/// Heuristic top-K policy.
#[derive(Clone, Debug, Default)]
pub struct HeuristicPolicy {
    config: SelectorConfig,
}

impl HeuristicPolicy {
    /// Create a policy from a validated config.
    pub fn new(config: SelectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The selector config.
    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }
}

impl MovePolicy for HeuristicPolicy {
    fn choose(&self, grid: &Grid, competitor: CompetitorId, rng: &mut GameRng) -> Option<Coord> {
        find_best_move(grid, competitor, &self.config, rng)
    }
}

/// Uniformly random legal placement.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl MovePolicy for RandomPolicy {
    fn choose(&self, grid: &Grid, competitor: CompetitorId, rng: &mut GameRng) -> Option<Coord> {
        let legal: Vec<Coord> = grid.legal_placements(competitor).collect();
        rng.choose(&legal).copied()
    }
}
