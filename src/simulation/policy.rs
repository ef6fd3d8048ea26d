//! Movement decisions
//!
//! Pure functions over a generation's grid and its neighbor counts.
//! Nothing here mutates state.

use crate::core::config::TileType;
use crate::core::types::{CellId, TileTypeId, MAX_NEIGHBORS};
use crate::grid::{Grid, NeighborCounts};

/// Whether a tile of `own` type, seeing `counts`, wants to relocate.
///
/// A tile with no neighbors at all is satisfied.
pub fn wants_to_move(tile_type: &TileType, own: TileTypeId, counts: &NeighborCounts) -> bool {
    let total = counts.total();
    if total == 0 {
        return false;
    }

    let total = total as f64;
    let percentage_similar = counts.of(own) as f64 / total;
    let percentage_different = counts.different_from(own) as f64 / total;

    percentage_similar <= tile_type.preference
        || percentage_different >= tile_type.dissimilarity_threshold()
}

/// How good a cell with these neighbor counts looks to a tile of type `own`:
/// similar neighbors plus the unfilled share of dissimilar ones.
#[inline]
pub fn desirability(own: TileTypeId, counts: &NeighborCounts) -> i32 {
    counts.of(own) as i32 + (MAX_NEIGHBORS as i32 - counts.different_from(own) as i32)
}

/// Pick the adjacent vacancy a mover at `from` would relocate to.
///
/// Candidates are the currently vacant neighbors, scored on their own
/// counts. The first maximal candidate in direction order wins, and only
/// if it strictly beats the score of the mover's present cell.
pub fn choose_target(grid: &Grid, counts: &[NeighborCounts], from: CellId, own: TileTypeId) -> Option<CellId> {
    let current = desirability(own, &counts[from.index()]);

    let mut best: Option<(CellId, i32)> = None;
    for candidate in grid.neighbors(from) {
        if !grid.occupant(candidate).is_vacant() {
            continue;
        }
        let score = desirability(own, &counts[candidate.index()]);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    best.filter(|&(_, score)| score > current).map(|(cell, _)| cell)
}
