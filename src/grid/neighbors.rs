//! Neighbor label counts
//!
//! Counts are rebuilt from scratch for every cell at the start of each
//! step and thrown away afterwards.

use ahash::AHashMap;

use crate::core::types::{CellId, TileTypeId};
use crate::grid::grid::Grid;
use crate::grid::occupant::Occupant;

/// Multiset of the labels around one cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborCounts {
    vacant: u8,
    occupied: AHashMap<TileTypeId, u8>,
}

impl NeighborCounts {
    pub fn add(&mut self, occupant: Occupant) {
        match occupant {
            Occupant::Vacant => self.vacant += 1,
            Occupant::Occupied(id) => *self.occupied.entry(id).or_insert(0) += 1,
        }
    }

    /// Neighbors of any label, vacancies included
    pub fn total(&self) -> u32 {
        self.vacant as u32 + self.occupied.values().map(|&n| n as u32).sum::<u32>()
    }

    pub fn vacant(&self) -> u32 {
        self.vacant as u32
    }

    /// Neighbors carrying `id`
    pub fn of(&self, id: TileTypeId) -> u32 {
        self.occupied.get(&id).copied().unwrap_or(0) as u32
    }

    /// Occupied neighbors whose label differs from `id`
    pub fn different_from(&self, id: TileTypeId) -> u32 {
        self.occupied
            .iter()
            .filter(|(other, _)| **other != id)
            .map(|(_, &n)| n as u32)
            .sum()
    }

    pub fn count(&self, occupant: Occupant) -> u32 {
        match occupant {
            Occupant::Vacant => self.vacant(),
            Occupant::Occupied(id) => self.of(id),
        }
    }
}

/// Count the labels around a single cell
pub fn count_neighbors(grid: &Grid, id: CellId) -> NeighborCounts {
    let mut counts = NeighborCounts::default();
    for neighbor in grid.neighbors(id) {
        counts.add(grid.occupant(neighbor));
    }
    counts
}

/// Counts for every cell, indexed by `CellId`
pub fn count_all(grid: &Grid) -> Vec<NeighborCounts> {
    grid.cell_ids().map(|id| count_neighbors(grid, id)).collect()
}
