//! Schelling - residential segregation dynamics on a discrete grid

pub mod core;
pub mod grid;
pub mod simulation;

pub use crate::core::{Result, SchellingError, SimulationConfig, TileType};
pub use crate::simulation::{simulate, SimulationOutput, StepReport, TileSnapshot, World};
