//! Match sessions: the host-facing surface.
//!
//! - `Match`: owns the grid and turn state, applies placements and intents
//! - `MoveIntent` / `MoveRecord`: ordered moves in and the move log out
//! - `MatchSnapshot`: lossless save/resume

pub mod game;
pub mod record;
pub mod snapshot;

pub use game::Match;
pub use record::{MoveIntent, MoveRecord, PlacementReport};
pub use snapshot::MatchSnapshot;
