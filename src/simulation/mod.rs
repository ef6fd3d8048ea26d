//! Simulation engine: movement policy, the per-generation step, and the
//! `World` that owns grid state across generations

pub mod output;
pub mod policy;
pub mod step;
pub mod world;

pub use output::{simulate, GridStats, SimulationOutput};
pub use policy::{choose_target, desirability, wants_to_move};
pub use step::{step, StepReport};
pub use world::{TileSnapshot, World};
