//! Simulation configuration
//!
//! A run is described by grid dimensions, a seed, and the list of tile
//! types sampled into the grid. Configs are plain serde structs so they
//! can be loaded from TOML files or built in code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SchellingError};
use crate::core::types::EMPTY_LABEL;
use crate::grid::Palette;

/// Behavioral parameters of one tile label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileType {
    /// Label shared by every tile of this type (`"empty"` marks vacancy)
    pub label: String,

    /// Similar-neighbor fraction at or below which the tile wants to move
    #[serde(default)]
    pub preference: f64,

    /// How much dissimilarity is tolerated before the tile wants to move
    ///
    /// Consumed as `1 - dissimilarity_tolerance`: a dissimilar-neighbor
    /// fraction at or above that value triggers a move.
    #[serde(default = "default_dissimilarity_tolerance")]
    pub dissimilarity_tolerance: f64,

    /// Relative frequency in the initial placement draw
    #[serde(default)]
    pub weight: u32,
}

fn default_dissimilarity_tolerance() -> f64 {
    0.5
}

impl TileType {
    pub fn new(label: impl Into<String>, preference: f64, dissimilarity_tolerance: f64, weight: u32) -> Self {
        Self {
            label: label.into(),
            preference,
            dissimilarity_tolerance,
            weight,
        }
    }

    /// The vacancy entry. Only its weight matters.
    pub fn empty(weight: u32) -> Self {
        Self::new(EMPTY_LABEL, 0.0, default_dissimilarity_tolerance(), weight)
    }

    pub fn is_empty_label(&self) -> bool {
        self.label == EMPTY_LABEL
    }

    /// Dissimilar-neighbor fraction at or above which the tile wants to move
    #[inline]
    pub fn dissimilarity_threshold(&self) -> f64 {
        1.0 - self.dissimilarity_tolerance
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub cols: usize,
    pub rows: usize,
    pub seed: u64,

    /// Number of generations the driver advances
    #[serde(default = "default_steps")]
    pub steps: u32,

    /// Stop early once a step relocates no tile
    #[serde(default)]
    pub stop_when_stable: bool,

    pub tile_types: Vec<TileType>,
}

fn default_steps() -> u32 {
    100
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cols: 40,
            rows: 30,
            seed: 12345,
            steps: default_steps(),
            stop_when_stable: false,
            tile_types: vec![
                TileType::empty(2),
                TileType::new("red", 0.3, 0.5, 4),
                TileType::new("blue", 0.3, 0.5, 4),
            ],
        }
    }
}

impl SimulationConfig {
    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check dimensions and the tile-type list.
    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 || self.rows == 0 {
            return Err(SchellingError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.cols, self.rows
            )));
        }
        Palette::new(&self.tile_types).map(|_| ())
    }
}
