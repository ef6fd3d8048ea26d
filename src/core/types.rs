//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Reserved label marking the vacancy entry of a tile-type list
pub const EMPTY_LABEL: &str = "empty";

/// Size of the Moore neighborhood
pub const MAX_NEIGHBORS: usize = 8;

/// Relative (col, row) offsets of the neighborhood, in enumeration order.
///
/// Candidate cells are scanned in this order, so it also decides which of
/// two equally desirable vacancies a mover picks.
pub const DIRECTIONS: [(i32, i32); MAX_NEIGHBORS] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Generation counter (simulation time unit)
pub type Generation = u64;

/// Dense cell key: `row * cols + col`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub usize);

impl CellId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index into a palette's occupied tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileTypeId(pub u16);

impl TileTypeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Column/row coordinate of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellPos {
    pub col: usize,
    pub row: usize,
}

impl CellPos {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Position shifted by `(dc, dr)`, or `None` when it falls off the
    /// low edge. Callers still bound-check against the grid size.
    #[inline]
    pub fn offset(self, dc: i32, dr: i32) -> Option<Self> {
        let col = self.col.checked_add_signed(dc as isize)?;
        let row = self.row.checked_add_signed(dr as isize)?;
        Some(Self { col, row })
    }
}
