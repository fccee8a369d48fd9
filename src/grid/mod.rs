//! Grid model: cell topology, capacity rules and coordinate validity.
//!
//! Capacity is never stored: it is recomputed from position, so a grid
//! restored from any snapshot always has correct topology.

pub mod board;
pub mod cell;

pub use board::{Grid, Neighbors};
pub use cell::{Cell, CellKind, Coord};
