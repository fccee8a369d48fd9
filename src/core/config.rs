//! Match configuration types.
//!
//! Hosts configure a match at startup by providing:
//! - `GridConfig`: board dimensions
//! - `MatchConfig`: grid, roster, cascade step bound and RNG seed
//!
//! Configs are plain serde data so hosts can load them from any format.

use serde::{Deserialize, Serialize};

use super::player::Roster;
use crate::error::{EngineError, Result};

/// Default cascade step bound. Far above any cascade a legal 9 x 6 game
/// produces before a winner is declared.
pub const DEFAULT_MAX_CASCADE_STEPS: usize = 10_000;

/// Board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows (R).
    pub rows: usize,
    /// Number of columns (C).
    pub cols: usize,
}

impl GridConfig {
    /// Create a grid configuration.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Both dimensions must be at least 2 so every cell has a capacity >= 1.
    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 || self.cols < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "grid must be at least 2 x 2, got {} x {}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 9, cols: 6 }
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Board dimensions.
    pub grid: GridConfig,

    /// Participants in turn order.
    pub roster: Roster,

    /// Explosions resolved per placement before the cascade is cut short
    /// and reported as an anomaly.
    pub max_cascade_steps: usize,

    /// Seed for the match RNG (bot move selection).
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            roster: Roster::default(),
            max_cascade_steps: DEFAULT_MAX_CASCADE_STEPS,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Create a default config for a roster.
    #[must_use]
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    /// Set board dimensions.
    #[must_use]
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid = GridConfig::new(rows, cols);
        self
    }

    /// Set the cascade step bound.
    #[must_use]
    pub fn with_max_cascade_steps(mut self, steps: usize) -> Self {
        self.max_cascade_steps = steps;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.roster.validate()?;
        if self.max_cascade_steps == 0 {
            return Err(EngineError::InvalidConfig(
                "max_cascade_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
