//! Coordinates and cells.
//!
//! A `Cell` holds a unit count and an owner. Ownership is meaningful only
//! while units are present: a cell with zero units is always unclaimed, and
//! the constructors and deserializer enforce that.

use serde::{Deserialize, Serialize};

use crate::core::CompetitorId;

/// Cell coordinate: `(row, col)`, zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Position class of a cell, derived from its neighbor count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Two neighbors, capacity 1.
    Corner,
    /// Three neighbors, capacity 2.
    Edge,
    /// Four neighbors, capacity 3.
    Interior,
}

impl CellKind {
    /// Class for a cell of the given capacity.
    #[must_use]
    pub const fn from_capacity(capacity: u32) -> Self {
        match capacity {
            0 | 1 => CellKind::Corner,
            2 => CellKind::Edge,
            _ => CellKind::Interior,
        }
    }
}

/// One board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CellParts")]
pub struct Cell {
    units: u32,
    owner: Option<CompetitorId>,
}

#[derive(Deserialize)]
struct CellParts {
    units: u32,
    owner: Option<CompetitorId>,
}

impl TryFrom<CellParts> for Cell {
    type Error = String;

    fn try_from(parts: CellParts) -> Result<Self, Self::Error> {
        match parts.owner {
            Some(owner) => Ok(Cell::owned(owner, parts.units)),
            None if parts.units == 0 => Ok(Cell::empty()),
            None => Err(format!("cell holds {} units without an owner", parts.units)),
        }
    }
}

impl Cell {
    /// An unclaimed cell with no units.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            units: 0,
            owner: None,
        }
    }

    /// A cell holding `units` for `owner`. Zero units yields an empty cell.
    #[must_use]
    pub const fn owned(owner: CompetitorId, units: u32) -> Self {
        if units == 0 {
            Self::empty()
        } else {
            Self {
                units,
                owner: Some(owner),
            }
        }
    }

    /// Units currently held.
    #[must_use]
    pub const fn units(&self) -> u32 {
        self.units
    }

    /// Owner, or `None` when unclaimed.
    #[must_use]
    pub const fn owner(&self) -> Option<CompetitorId> {
        if self.units == 0 {
            None
        } else {
            self.owner
        }
    }

    /// True when the cell holds no units.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.units == 0
    }

    /// True when `competitor` owns this cell with at least one unit.
    #[must_use]
    pub fn is_owned_by(&self, competitor: CompetitorId) -> bool {
        self.owner() == Some(competitor)
    }

    /// True when the cell is owned by someone other than `competitor`.
    #[must_use]
    pub fn is_opponent_of(&self, competitor: CompetitorId) -> bool {
        matches!(self.owner(), Some(owner) if owner != competitor)
    }

    /// Add one unit and hand the cell to `owner`. Saturates at `u32::MAX`.
    pub(crate) fn add_unit(&mut self, owner: CompetitorId) {
        self.units = self.units.saturating_add(1);
        self.owner = Some(owner);
    }

    /// Remove `count` units; the cell is unclaimed once it runs out.
    pub(crate) fn remove_units(&mut self, count: u32) {
        self.units = self.units.saturating_sub(count);
        if self.units == 0 {
            self.owner = None;
        }
    }
}
