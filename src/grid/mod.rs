//! Grid state: occupants, dimensions and neighbor counting

#[allow(clippy::module_inception)]
pub mod grid;
pub mod neighbors;
pub mod occupant;

pub use grid::Grid;
pub use neighbors::{count_all, count_neighbors, NeighborCounts};
pub use occupant::{Occupant, Palette};
