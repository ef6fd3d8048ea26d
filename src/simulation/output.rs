//! Run statistics and serialization

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{Generation, EMPTY_LABEL};
use crate::grid::{count_all, Grid, Occupant, Palette};
use crate::simulation::policy::wants_to_move;
use crate::simulation::step::StepReport;
use crate::simulation::world::{TileSnapshot, World};

/// Aggregate measures of one generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    /// Cells per label, `empty` included
    pub census: BTreeMap<String, usize>,
    /// Occupied tiles that currently want to move
    pub unsatisfied: usize,
    /// Mean share of same-label tiles among each tile's occupied neighbors.
    /// Tiles without occupied neighbors are left out.
    pub mean_similarity: f64,
}

impl GridStats {
    pub fn compute(grid: &Grid, palette: &Palette) -> Self {
        let counts = count_all(grid);
        let mut unsatisfied = 0;
        let mut similarity_sum = 0.0;
        let mut similarity_samples = 0usize;

        for (id, occupant) in grid.iter() {
            let Occupant::Occupied(tile) = occupant else {
                continue;
            };
            let c = &counts[id.index()];
            if wants_to_move(palette.get(tile), tile, c) {
                unsatisfied += 1;
            }
            let same = c.of(tile);
            let occupied = same + c.different_from(tile);
            if occupied > 0 {
                similarity_sum += same as f64 / occupied as f64;
                similarity_samples += 1;
            }
        }

        let mean_similarity = if similarity_samples > 0 {
            similarity_sum / similarity_samples as f64
        } else {
            0.0
        };

        Self {
            census: Self::census(grid, palette),
            unsatisfied,
            mean_similarity,
        }
    }

    /// Cells per label. Every palette label appears, even at zero.
    pub fn census(grid: &Grid, palette: &Palette) -> BTreeMap<String, usize> {
        let mut census: BTreeMap<String, usize> = BTreeMap::new();
        census.insert(EMPTY_LABEL.to_string(), 0);
        for tile_type in palette.types() {
            census.insert(tile_type.label.clone(), 0);
        }
        for (_, occupant) in grid.iter() {
            *census.entry(palette.label(occupant).to_string()).or_insert(0) += 1;
        }
        census
    }
}

/// Complete record of a run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub config: SimulationConfig,
    pub initial: GridStats,
    pub last: GridStats,
    pub steps: Vec<StepReport>,
    /// Generation of the first step that relocated nothing, if any
    pub converged_at: Option<Generation>,
    pub final_snapshot: Vec<TileSnapshot>,
    pub simulation_time_ms: u64,
}

impl SimulationOutput {
    pub fn new(config: SimulationConfig, initial: GridStats, world: &World, steps: Vec<StepReport>, elapsed: Duration) -> Self {
        let converged_at = steps.iter().find(|r| r.is_stable()).map(|r| r.generation);
        Self {
            config,
            initial,
            last: world.stats(),
            steps,
            converged_at,
            final_snapshot: world.snapshot(),
            simulation_time_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn total_moves(&self) -> usize {
        self.steps.iter().map(|r| r.moved).sum()
    }

    pub fn summary(&self) -> String {
        let converged = match self.converged_at {
            Some(generation) => format!("converged at generation {}", generation),
            None => "did not converge".to_string(),
        };
        format!(
            "Simulated {} generations of a {}x{} grid in {}ms ({})\n\
             {} relocations, unsatisfied tiles {} -> {}, mean similarity {:.3} -> {:.3}",
            self.steps.len(),
            self.config.cols,
            self.config.rows,
            self.simulation_time_ms,
            converged,
            self.total_moves(),
            self.initial.unsatisfied,
            self.last.unsatisfied,
            self.initial.mean_similarity,
            self.last.mean_similarity,
        )
    }
}

/// Build a world from `config` and run it to completion
pub fn simulate(config: &SimulationConfig) -> Result<SimulationOutput> {
    let start = Instant::now();

    config.validate()?;
    let mut world = World::from_config(config)?;
    let initial = world.stats();

    let steps = if config.stop_when_stable {
        world.run_until_stable(config.steps)
    } else {
        world.run(config.steps)
    };

    Ok(SimulationOutput::new(config.clone(), initial, &world, steps, start.elapsed()))
}
