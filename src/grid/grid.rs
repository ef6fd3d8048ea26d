//! Fixed-size grid of cell occupants

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::error::{Result, SchellingError};
use crate::core::types::{CellId, CellPos, DIRECTIONS};
use crate::grid::occupant::{Occupant, Palette};

/// One generation of cell state.
///
/// Cells are stored row-major; `CellId(row * cols + col)` is the key.
/// There is no wraparound: cells past an edge do not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Occupant>,
}

impl Grid {
    /// Grid with every cell set to `fill`
    pub fn filled(cols: usize, rows: usize, fill: Occupant) -> Self {
        Self {
            cols,
            rows,
            cells: vec![fill; cols * rows],
        }
    }

    /// Sample every cell independently and uniformly from the palette's
    /// weighted bucket.
    pub fn populate<R: Rng + ?Sized>(cols: usize, rows: usize, palette: &Palette, rng: &mut R) -> Result<Self> {
        let bucket = palette.bucket();
        if bucket.is_empty() {
            return Err(SchellingError::InvalidConfig("weighted bucket is empty".into()));
        }

        let cells = (0..cols * rows)
            .map(|_| *bucket.choose(rng).unwrap_or(&Occupant::Vacant))
            .collect();

        Ok(Self { cols, rows, cells })
    }

    /// Wrap row-major cells. Fails unless exactly `cols * rows` are given.
    pub fn from_cells(cols: usize, rows: usize, cells: Vec<Occupant>) -> Result<Self> {
        if cells.len() != cols * rows {
            return Err(SchellingError::LayoutMismatch {
                expected: cols * rows,
                actual: cells.len(),
            });
        }
        Ok(Self { cols, rows, cells })
    }

    pub(crate) fn from_cells_unchecked(cols: usize, rows: usize, cells: Vec<Occupant>) -> Self {
        debug_assert_eq!(cells.len(), cols * rows);
        Self { cols, rows, cells }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cell_id(&self, pos: CellPos) -> Option<CellId> {
        if pos.col < self.cols && pos.row < self.rows {
            Some(CellId(pos.row * self.cols + pos.col))
        } else {
            None
        }
    }

    #[inline]
    pub fn pos(&self, id: CellId) -> CellPos {
        CellPos::new(id.0 % self.cols, id.0 / self.cols)
    }

    #[inline]
    pub fn occupant(&self, id: CellId) -> Occupant {
        self.cells[id.0]
    }

    pub fn occupant_at(&self, pos: CellPos) -> Option<Occupant> {
        self.cell_id(pos).map(|id| self.occupant(id))
    }

    pub fn cells(&self) -> &[Occupant] {
        &self.cells
    }

    /// All cell ids in row-major order
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.cells.len()).map(CellId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, Occupant)> + '_ {
        self.cells.iter().enumerate().map(|(i, o)| (CellId(i), *o))
    }

    /// In-bounds neighbors of `id`, in `DIRECTIONS` order
    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        let pos = self.pos(id);
        DIRECTIONS
            .iter()
            .filter_map(move |&(dc, dr)| pos.offset(dc, dr).and_then(|p| self.cell_id(p)))
    }

    pub fn vacant_count(&self) -> usize {
        self.cells.iter().filter(|o| o.is_vacant()).count()
    }
}
