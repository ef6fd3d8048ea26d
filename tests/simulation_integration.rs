//! Integration tests for the Schelling engine
//!
//! These exercise the public API end-to-end:
//! - World construction and config validation
//! - Conflict resolution when movers compete for one vacancy
//! - Neighborhood bounds at edges and corners
//! - Determinism under a fixed seed
//! - Config files and full runs

use std::path::Path;

use schelling::core::types::{CellPos, TileTypeId};
use schelling::grid::{count_neighbors, Occupant};
use schelling::{simulate, SchellingError, SimulationConfig, TileType, World};

fn two_colors(preference: f64, tolerance: f64) -> Vec<TileType> {
    vec![
        TileType::empty(1),
        TileType::new("A", preference, tolerance, 1),
        TileType::new("B", preference, tolerance, 1),
    ]
}

fn labels(world: &World) -> Vec<String> {
    world.snapshot().into_iter().map(|t| t.label).collect()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_construct_without_empty_fails() {
    let types = vec![TileType::new("A", 0.3, 0.5, 1), TileType::new("B", 0.3, 0.5, 1)];
    let err = World::new(5, 5, &types, 1).unwrap_err();
    assert!(matches!(err, SchellingError::InvalidConfig(_)));
}

#[test]
fn test_construct_with_all_zero_weights_fails() {
    let types = vec![TileType::empty(0), TileType::new("A", 0.3, 0.5, 0)];
    assert!(matches!(World::new(5, 5, &types, 1), Err(SchellingError::InvalidConfig(_))));
}

#[test]
fn test_construct_with_out_of_range_preference_fails() {
    let types = vec![TileType::empty(1), TileType::new("A", 1.01, 0.5, 1)];
    assert!(matches!(World::new(5, 5, &types, 1), Err(SchellingError::InvalidConfig(_))));
}

#[test]
fn test_construct_fills_every_cell() {
    let world = World::new(13, 7, &two_colors(0.3, 0.5), 99).unwrap();
    let census = world.census();
    assert_eq!(census.values().sum::<usize>(), 13 * 7);
    assert_eq!(world.snapshot().len(), 13 * 7);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_competing_movers_single_winner() {
    // A E A: both A tiles want the middle cell (it sees two A's)
    let types = two_colors(1.0, 0.0);
    let mut outcomes = std::collections::HashSet::new();

    for seed in 0..32 {
        let mut world = World::from_layout(3, 1, &types, &["A", "empty", "A"], seed).unwrap();
        let report = world.step();

        assert_eq!(report.movers, 2);
        assert_eq!(report.moved, 1);
        assert_eq!(report.blocked, 1);

        let after = labels(&world);
        assert_eq!(after[1], "A");
        assert!(after == ["empty", "A", "A"] || after == ["A", "A", "empty"]);
        outcomes.insert(after);
    }

    // The processing order decides the winner, so both appear across seeds.
    assert_eq!(outcomes.len(), 2);
}

#[test]
fn test_different_labels_see_no_improvement() {
    // A E B: both want to move (nothing similar around them), but the
    // middle cell scores 1 + 7 = 8, no better than their own 0 + 8.
    let types = two_colors(1.0, 0.0);
    let mut world = World::from_layout(3, 1, &types, &["A", "empty", "B"], 4).unwrap();
    let report = world.step();

    assert_eq!(report.movers, 2);
    assert_eq!(report.stranded, 2);
    assert_eq!(report.moved, 0);
    assert_eq!(labels(&world), ["A", "empty", "B"]);
}

#[test]
fn test_single_cell_world_never_moves() {
    let types = two_colors(1.0, 1.0);
    let mut world = World::from_layout(1, 1, &types, &["A"], 0).unwrap();
    let report = world.step();
    assert_eq!(report.movers, 0);
    assert_eq!(labels(&world), ["A"]);
}

#[test]
fn test_no_vacancy_generation_is_unchanged() {
    // Everyone wants to move, nobody can.
    let types = vec![
        TileType::empty(0),
        TileType::new("A", 1.0, 1.0, 1),
        TileType::new("B", 1.0, 1.0, 1),
    ];
    let mut world = World::new(9, 6, &types, 21).unwrap();
    let before = world.grid().clone();
    for _ in 0..5 {
        let report = world.step();
        assert_eq!(report.moved, 0);
        assert_eq!(world.grid(), &before);
    }
}

// ============================================================================
// Neighborhoods
// ============================================================================

#[test]
fn test_edge_neighbor_totals() {
    let world = World::new(6, 4, &two_colors(0.3, 0.5), 5).unwrap();
    let grid = world.grid();

    for id in grid.cell_ids() {
        let pos = grid.pos(id);
        let on_col_edge = pos.col == 0 || pos.col == grid.cols() - 1;
        let on_row_edge = pos.row == 0 || pos.row == grid.rows() - 1;
        let expected = match (on_col_edge, on_row_edge) {
            (true, true) => 3,
            (true, false) | (false, true) => 5,
            (false, false) => 8,
        };
        assert_eq!(count_neighbors(grid, id).total(), expected, "at {:?}", pos);
    }
}

#[test]
fn test_counts_match_layout() {
    let types = two_colors(0.3, 0.5);
    let layout = ["A", "A", "B", "empty", "A", "B", "B", "empty", "A"];
    let world = World::from_layout(3, 3, &types, &layout, 0).unwrap();
    let grid = world.grid();
    let center = grid.cell_id(CellPos::new(1, 1)).unwrap();
    let counts = count_neighbors(grid, center);

    assert_eq!(counts.of(TileTypeId(0)), 3);
    assert_eq!(counts.of(TileTypeId(1)), 3);
    assert_eq!(counts.count(Occupant::Vacant), 2);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_same_history() {
    let types = two_colors(0.4, 0.5);
    let mut a = World::new(20, 15, &types, 777).unwrap();
    let mut b = World::new(20, 15, &types, 777).unwrap();
    assert_eq!(a.snapshot(), b.snapshot());

    for _ in 0..25 {
        assert_eq!(a.step(), b.step());
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn test_different_seed_different_start() {
    let types = two_colors(0.4, 0.5);
    let a = World::new(20, 15, &types, 1).unwrap();
    let b = World::new(20, 15, &types, 2).unwrap();
    assert_ne!(a.snapshot(), b.snapshot());
}

// ============================================================================
// Full runs
// ============================================================================

#[test]
fn test_long_run_conserves_labels() {
    let mut world = World::new(30, 30, &two_colors(0.5, 0.5), 2024).unwrap();
    let census = world.census();
    for report in world.run(40) {
        assert_eq!(report.moved + report.blocked + report.stranded, report.movers);
    }
    assert_eq!(world.census(), census);
}

#[test]
fn test_segregation_increases() {
    let config = SimulationConfig {
        cols: 30,
        rows: 30,
        seed: 31,
        steps: 60,
        stop_when_stable: true,
        tile_types: two_colors(0.4, 0.4),
    };
    let output = simulate(&config).unwrap();
    assert!(output.last.mean_similarity > output.initial.mean_similarity);
    assert_eq!(output.last.census, output.initial.census);
}

#[test]
fn test_bundled_config_loads_and_runs() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/default.toml");
    let mut config = SimulationConfig::load(&path).unwrap();
    config.steps = 5;
    let output = simulate(&config).unwrap();
    assert!(output.steps.len() <= 5);
    assert_eq!(output.final_snapshot.len(), config.cols * config.rows);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let result = SimulationConfig::load(Path::new("/nonexistent/schelling.toml"));
    assert!(matches!(result, Err(SchellingError::Io(_))));
}
