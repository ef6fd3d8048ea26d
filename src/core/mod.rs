pub mod config;
pub mod error;
pub mod types;

pub use config::{SimulationConfig, TileType};
pub use error::{Result, SchellingError};
