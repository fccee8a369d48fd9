//! The board: a fixed-size, row-major collection of cells.
//!
//! Topology is derived purely from position. A cell's capacity is its
//! in-bounds orthogonal neighbor count minus one, so corners hold 1, edges 2
//! and interior cells 3 before they explode.

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

use super::cell::{Cell, CellKind, Coord};
use crate::core::{CompetitorId, GridConfig};
use crate::error::{EngineError, Result};

/// Up to four orthogonal neighbors, stack allocated.
pub type Neighbors = SmallVec<[Coord; 4]>;

/// The board.
///
/// Covers every coordinate of `rows x cols` exactly once. Hosts read it
/// freely; only the cascade resolver and [`Grid::set_cell`] mutate it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridParts")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

#[derive(Deserialize)]
struct GridParts {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl TryFrom<GridParts> for Grid {
    type Error = EngineError;

    fn try_from(parts: GridParts) -> Result<Self> {
        GridConfig::new(parts.rows, parts.cols).validate()?;
        if parts.cells.len() != parts.rows * parts.cols {
            return Err(EngineError::Snapshot(format!(
                "{} x {} grid needs {} cells, got {}",
                parts.rows,
                parts.cols,
                parts.rows * parts.cols,
                parts.cells.len()
            )));
        }
        Ok(Self {
            rows: parts.rows,
            cols: parts.cols,
            cells: parts.cells,
        })
    }
}

impl Grid {
    /// Create an empty grid.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rows: config.rows,
            cols: config.cols,
            cells: vec![Cell::empty(); config.cell_count()],
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Dimensions as a config.
    #[must_use]
    pub fn config(&self) -> GridConfig {
        GridConfig::new(self.rows, self.cols)
    }

    /// True when `coord` lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Convert signed host input into a checked coordinate.
    pub fn coord(&self, row: i64, col: i64) -> Result<Coord> {
        let in_range = |v: i64, limit: usize| usize::try_from(v).ok().filter(|&v| v < limit);
        match (in_range(row, self.rows), in_range(col, self.cols)) {
            (Some(r), Some(c)) => Ok(Coord::new(r, c)),
            _ => Err(EngineError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            }),
        }
    }

    fn check_bounds(&self, coord: Coord) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                row: i64::try_from(coord.row).unwrap_or(i64::MAX),
                col: i64::try_from(coord.col).unwrap_or(i64::MAX),
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.cols + coord.col
    }

    fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index / self.cols, index % self.cols)
    }

    /// Bounds-checked cell lookup.
    pub fn cell_at(&self, coord: Coord) -> Result<&Cell> {
        self.check_bounds(coord)?;
        Ok(&self.cells[self.index(coord)])
    }

    /// Overwrite a cell. For hosts restoring positions and for test setup.
    pub fn set_cell(&mut self, coord: Coord, cell: Cell) -> Result<()> {
        self.check_bounds(coord)?;
        let index = self.index(coord);
        self.cells[index] = cell;
        Ok(())
    }

    pub(crate) fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.index(coord)]
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let index = self.index(coord);
        &mut self.cells[index]
    }

    /// In-bounds orthogonal neighbors, in the order up, left, right, down.
    pub fn neighbors_of(&self, coord: Coord) -> Result<Neighbors> {
        self.check_bounds(coord)?;
        Ok(self.neighbors(coord))
    }

    pub(crate) fn neighbors(&self, coord: Coord) -> Neighbors {
        let mut out = Neighbors::new();
        if coord.row > 0 {
            out.push(Coord::new(coord.row - 1, coord.col));
        }
        if coord.col > 0 {
            out.push(Coord::new(coord.row, coord.col - 1));
        }
        if coord.col + 1 < self.cols {
            out.push(Coord::new(coord.row, coord.col + 1));
        }
        if coord.row + 1 < self.rows {
            out.push(Coord::new(coord.row + 1, coord.col));
        }
        out
    }

    /// Units a cell holds before it explodes.
    pub fn capacity(&self, coord: Coord) -> Result<u32> {
        self.check_bounds(coord)?;
        Ok(self.capacity_unchecked(coord))
    }

    pub(crate) fn capacity_unchecked(&self, coord: Coord) -> u32 {
        let on_row_edge = coord.row == 0 || coord.row + 1 == self.rows;
        let on_col_edge = coord.col == 0 || coord.col + 1 == self.cols;
        3 - u32::from(on_row_edge) - u32::from(on_col_edge)
    }

    /// Position class of a cell.
    pub fn kind(&self, coord: Coord) -> Result<CellKind> {
        Ok(CellKind::from_capacity(self.capacity(coord)?))
    }

    /// Reason a placement would be rejected, if any.
    ///
    /// Legal iff the coordinate is in bounds and the cell is unclaimed or
    /// already owned by `competitor`.
    pub fn check_placement(&self, coord: Coord, competitor: CompetitorId) -> Result<()> {
        let cell = self.cell_at(coord)?;
        match cell.owner() {
            Some(owner) if owner != competitor => Err(EngineError::IllegalOwner {
                coord,
                owner,
                competitor,
            }),
            _ => Ok(()),
        }
    }

    /// True iff `competitor` may place on `coord`.
    #[must_use]
    pub fn validate_placement(&self, coord: Coord, competitor: CompetitorId) -> bool {
        self.check_placement(coord, competitor).is_ok()
    }

    /// Every coordinate `competitor` may place on, in row-major order.
    pub fn legal_placements(&self, competitor: CompetitorId) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter(move |(_, cell)| !cell.is_opponent_of(competitor))
            .map(|(coord, _)| coord)
    }

    /// Iterate over `(coord, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.coord_of(i), cell))
    }

    /// First over-capacity cell in row-major order.
    #[must_use]
    pub fn first_unstable(&self) -> Option<Coord> {
        self.iter()
            .find(|(coord, cell)| cell.units() > self.capacity_unchecked(*coord))
            .map(|(coord, _)| coord)
    }

    /// All over-capacity cells in row-major order.
    #[must_use]
    pub fn unstable_cells(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(coord, cell)| cell.units() > self.capacity_unchecked(*coord))
            .map(|(coord, _)| coord)
            .collect()
    }

    /// True when every cell is within capacity.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.first_unstable().is_none()
    }

    /// Units on the whole board.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.units())).sum()
    }

    /// True when `competitor` owns at least one cell with units.
    #[must_use]
    pub fn owns_any(&self, competitor: CompetitorId) -> bool {
        self.cells.iter().any(|c| c.is_owned_by(competitor))
    }

    /// Units held by `competitor`.
    #[must_use]
    pub fn units_of(&self, competitor: CompetitorId) -> u64 {
        self.cells
            .iter()
            .filter(|c| c.is_owned_by(competitor))
            .map(|c| u64::from(c.units()))
            .sum()
    }

    /// Order-sensitive digest of every `(units, owner)` pair.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
