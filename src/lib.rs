//! # chain-reaction
//!
//! Deterministic engine for Chain Reaction, the grid capture game for 1-4
//! competitors.
//!
//! ## Design Principles
//!
//! 1. **Pure and synchronous**: no timers, devices or I/O. Hosts (renderers,
//!    input handlers, network relays) call in and read results back.
//!
//! 2. **Deterministic**: the same placements on the same grid produce the
//!    same cascade, event log and turn state on every peer. Bot randomness
//!    comes from an injected seeded [`GameRng`].
//!
//! 3. **Derived state over stored state**: liveness and turn phase are
//!    recomputed from the grid and move count, never kept as flags.
//!
//! ## Control Flow
//!
//! ```text
//! propose placement -> Grid::check_placement
//!                   -> CascadeResolver (settled grid + ordered explosions)
//!                   -> TurnState::advance (winner first, then next actor)
//! ```
//!
//! ## Modules
//!
//! - `core`: Competitor ids, rosters, RNG, configuration
//! - `grid`: Cells, topology and placement validation
//! - `cascade`: Explosion chain resolution
//! - `rules`: Turn order, elimination and winner detection
//! - `ai`: Move scoring and selection for computer competitors
//! - `session`: Match sessions, move log, snapshots
//!
//! ## Example
//!
//! ```
//! use chain_reaction::{CompetitorId, Coord, Match, MatchConfig};
//!
//! let mut game = Match::new(MatchConfig::default()).unwrap();
//! let report = game.apply_placement(Coord::new(0, 0), CompetitorId::new(1)).unwrap();
//! assert_eq!(report.next_actor, Some(CompetitorId::new(2)));
//! ```

pub mod core;
pub mod error;
pub mod grid;
pub mod cascade;
pub mod rules;
pub mod ai;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CompetitorId, Roster, MAX_COMPETITORS,
    GameRng, GameRngState,
    GridConfig, MatchConfig, DEFAULT_MAX_CASCADE_STEPS,
};

pub use crate::error::{EngineError, Result};

pub use crate::grid::{Cell, CellKind, Coord, Grid, Neighbors};

pub use crate::cascade::{CascadeAnomaly, CascadeOutcome, CascadeResolver, ExplosionEvent};

pub use crate::rules::{
    alive_competitors, check_winner, evaluate, next_actor,
    Phase, TurnState, Verdict,
};

pub use crate::ai::{
    find_best_move, ranked_moves, score_move, static_score,
    HeuristicPolicy, HeuristicWeights, MovePolicy, RandomPolicy, SelectorConfig,
};

pub use crate::session::{Match, MatchSnapshot, MoveIntent, MoveRecord, PlacementReport};
