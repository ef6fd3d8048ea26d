//! One generation step
//!
//! 1. Count neighbors for every cell of the current grid
//! 2. Shuffle all cell ids
//! 3. Walk the shuffled ids, committing each cell's outcome into the next
//!    generation immediately; the first mover to claim a vacancy keeps it
//! 4. Return the finished next generation
//!
//! Decisions only read the current generation, so processing order affects
//! nothing but which of several movers wins a contested vacancy.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{CellId, Generation};
use crate::grid::{count_all, Grid, Occupant, Palette};
use crate::simulation::policy::{choose_target, wants_to_move};

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Generation number produced by this step
    pub generation: Generation,
    /// Tiles that wanted to move
    pub movers: usize,
    /// Tiles that relocated
    pub moved: usize,
    /// Movers whose target was claimed earlier in the same step
    pub blocked: usize,
    /// Movers with no better vacant neighbor
    pub stranded: usize,
}

impl StepReport {
    /// True when no tile relocated
    pub fn is_stable(&self) -> bool {
        self.moved == 0
    }
}

/// Next-generation cells under construction. `None` = not yet written.
struct NextGeneration {
    cells: Vec<Option<Occupant>>,
}

impl NextGeneration {
    fn new(len: usize) -> Self {
        Self { cells: vec![None; len] }
    }

    /// A cell is claimed once a tile has been written there
    fn is_claimed(&self, id: CellId) -> bool {
        matches!(self.cells[id.index()], Some(Occupant::Occupied(_)))
    }

    fn is_written(&self, id: CellId) -> bool {
        self.cells[id.index()].is_some()
    }

    fn write(&mut self, id: CellId, occupant: Occupant) {
        self.cells[id.index()] = Some(occupant);
    }

    fn finish(self, cols: usize, rows: usize) -> Grid {
        debug_assert!(self.cells.iter().all(Option::is_some), "step left a cell unwritten");
        let cells = self
            .cells
            .into_iter()
            .map(|cell| cell.unwrap_or(Occupant::Vacant))
            .collect();
        Grid::from_cells_unchecked(cols, rows, cells)
    }
}

/// Produce the next generation of `current`.
///
/// Every cell of `current` is written exactly once into the result, either
/// in place or, for a successful mover, at its target with a vacancy left
/// behind, so occupancy and the label multiset are preserved.
pub fn step<R: Rng + ?Sized>(current: &Grid, palette: &Palette, rng: &mut R, generation: Generation) -> (Grid, StepReport) {
    let counts = count_all(current);

    let mut order: Vec<CellId> = current.cell_ids().collect();
    order.shuffle(rng);

    let mut next = NextGeneration::new(current.len());
    let mut report = StepReport {
        generation,
        ..StepReport::default()
    };

    for id in order {
        let tile = match current.occupant(id) {
            Occupant::Vacant => {
                // A mover may already have landed here.
                if !next.is_written(id) {
                    next.write(id, Occupant::Vacant);
                }
                continue;
            }
            Occupant::Occupied(tile) => tile,
        };

        let occupant = Occupant::Occupied(tile);
        if !wants_to_move(palette.get(tile), tile, &counts[id.index()]) {
            next.write(id, occupant);
            continue;
        }

        report.movers += 1;
        match choose_target(current, &counts, id, tile) {
            Some(target) if !next.is_claimed(target) => {
                next.write(target, occupant);
                // Origin was occupied this generation, so no mover can target it.
                if !next.is_claimed(id) {
                    next.write(id, Occupant::Vacant);
                }
                report.moved += 1;
            }
            Some(_) => {
                next.write(id, occupant);
                report.blocked += 1;
            }
            None => {
                next.write(id, occupant);
                report.stranded += 1;
            }
        }
    }

    (next.finish(current.cols(), current.rows()), report)
}
