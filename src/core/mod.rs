//! Core engine types: competitors, rosters, RNG, configuration.
//!
//! These are the building blocks every other module shares.

pub mod player;
pub mod rng;
pub mod config;

pub use player::{CompetitorId, Roster, MAX_COMPETITORS};
pub use rng::{GameRng, GameRngState};
pub use config::{GridConfig, MatchConfig, DEFAULT_MAX_CASCADE_STEPS};
