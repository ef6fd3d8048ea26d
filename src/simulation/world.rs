//! World - grid state plus the seeded RNG that drives it

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{SimulationConfig, TileType};
use crate::core::error::{Result, SchellingError};
use crate::core::types::Generation;
use crate::grid::{Grid, Occupant, Palette};
use crate::simulation::output::GridStats;
use crate::simulation::step::{step, StepReport};

/// Label and position of one cell, for renderers and exporters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub label: String,
    pub col: usize,
    pub row: usize,
}

/// A running simulation.
///
/// Both the initial placement and every step's processing order come from
/// one `ChaCha8Rng`, so a `(cols, rows, tile_types, seed)` tuple fully
/// determines the sequence of generations.
#[derive(Debug, Clone)]
pub struct World {
    palette: Palette,
    grid: Grid,
    generation: Generation,
    rng: ChaCha8Rng,
}

impl World {
    /// Sample a fresh grid from the tile types' weights
    pub fn new(cols: usize, rows: usize, tile_types: &[TileType], seed: u64) -> Result<Self> {
        check_dimensions(cols, rows)?;
        let palette = Palette::new(tile_types)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::populate(cols, rows, &palette, &mut rng)?;

        let world = Self {
            palette,
            grid,
            generation: 0,
            rng,
        };
        tracing::info!(
            cols,
            rows,
            seed,
            vacant = world.grid.vacant_count(),
            "Constructed world"
        );
        Ok(world)
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Self::new(config.cols, config.rows, &config.tile_types, config.seed)
    }

    /// Place `labels` row-major instead of sampling.
    ///
    /// `"empty"` marks a vacancy; every other label must name a tile type.
    /// The seed still drives step ordering.
    pub fn from_layout<S: AsRef<str>>(
        cols: usize,
        rows: usize,
        tile_types: &[TileType],
        labels: &[S],
        seed: u64,
    ) -> Result<Self> {
        check_dimensions(cols, rows)?;
        let palette = Palette::new(tile_types)?;

        let cells = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                palette
                    .occupant_for(label)
                    .ok_or_else(|| SchellingError::UnknownLabel(label.to_string()))
            })
            .collect::<Result<Vec<Occupant>>>()?;
        let grid = Grid::from_cells(cols, rows, cells)?;

        Ok(Self {
            palette,
            grid,
            generation: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Advance one generation
    pub fn step(&mut self) -> StepReport {
        let generation = self.generation + 1;
        let (next, report) = step(&self.grid, &self.palette, &mut self.rng, generation);
        self.grid = next;
        self.generation = generation;

        tracing::debug!(
            generation,
            movers = report.movers,
            moved = report.moved,
            blocked = report.blocked,
            stranded = report.stranded,
            "Step complete"
        );
        report
    }

    /// Advance `steps` generations
    pub fn run(&mut self, steps: u32) -> Vec<StepReport> {
        (0..steps).map(|_| self.step()).collect()
    }

    /// Advance until a step relocates no tile, or `max_steps` have run.
    ///
    /// The stable step is included in the returned reports.
    pub fn run_until_stable(&mut self, max_steps: u32) -> Vec<StepReport> {
        let mut reports = Vec::new();
        for _ in 0..max_steps {
            let report = self.step();
            reports.push(report);
            if report.is_stable() {
                tracing::info!(generation = report.generation, "World reached equilibrium");
                break;
            }
        }
        reports
    }

    /// Label and position of every cell, row-major
    pub fn snapshot(&self) -> Vec<TileSnapshot> {
        self.grid
            .iter()
            .map(|(id, occupant)| {
                let pos = self.grid.pos(id);
                TileSnapshot {
                    label: self.palette.label(occupant).to_string(),
                    col: pos.col,
                    row: pos.row,
                }
            })
            .collect()
    }

    /// Cell count per label, `empty` included
    pub fn census(&self) -> BTreeMap<String, usize> {
        GridStats::census(&self.grid, &self.palette)
    }

    pub fn stats(&self) -> GridStats {
        GridStats::compute(&self.grid, &self.palette)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }
}

fn check_dimensions(cols: usize, rows: usize) -> Result<()> {
    if cols == 0 || rows == 0 {
        return Err(SchellingError::InvalidConfig(format!(
            "grid must be at least 1x1, got {}x{}",
            cols, rows
        )));
    }
    Ok(())
}
