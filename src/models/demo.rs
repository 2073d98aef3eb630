//! Deterministic demo layouts
//!
//! Switching the vehicle context replaces the grid wholesale with a demo
//! layout generated from a seeded pseudo-random sequence. The seed is a
//! stable hash of the vehicle name, so the same vehicle always produces the
//! same layout. No system randomness is involved anywhere on this path.

use super::catalog::CargoKind;
use super::grid::{Bounds, CargoGrid, GRID_COLS, GRID_ROWS, TOTAL_CELLS};

/// Kinds drawn by the demo fill
const DEMO_KINDS: [CargoKind; 4] = [
    CargoKind::Cold,
    CargoKind::Dry,
    CargoKind::Fragile,
    CargoKind::General,
];

/// Indexed linear congruential generator.
///
/// `at(i)` maps an index to a value in [0, 1); the same (seed, index) pair
/// always yields the same value, which keeps demo layouts and environment
/// readouts reproducible.
#[derive(Clone, Copy, Debug)]
pub struct DemoRandom {
    seed: u64,
}

impl DemoRandom {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a stable hash of a name (sum of char codes)
    pub fn from_name(name: &str) -> Self {
        let seed = name.chars().map(|c| c as u64).sum();
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pseudo-random value in [0, 1) for the given draw index
    pub fn at(&self, index: u64) -> f64 {
        let raw = self
            .seed
            .wrapping_mul(index.wrapping_add(1))
            .wrapping_mul(9301)
            .wrapping_add(49297)
            % 233280;
        raw as f64 / 233280.0
    }
}

/// Replace the grid contents with a demo layout for the given vehicle.
///
/// `load_hint` is a load percentage (0-100) supplied by the vehicle context;
/// it sets how many cells get filled. Layouts with more than six cells
/// usually include one pre-merged block.
pub fn demo_fill(grid: &mut CargoGrid, vehicle_name: &str, load_hint: f64) {
    let rng = DemoRandom::from_name(vehicle_name);
    let budget = ((load_hint / 100.0) * TOTAL_CELLS as f64).round() as usize;
    let budget = budget.min(TOTAL_CELLS);

    grid.clear();

    if budget > 6 && rng.at(999) > 0.3 {
        lay_demo_block(grid, &rng);
    }

    for i in 0..budget {
        let index = (rng.at(i as u64) * TOTAL_CELLS as f64) as usize;
        if grid.is_empty_cell(index) {
            let kind_index = (rng.at(i as u64 + 100) * DEMO_KINDS.len() as f64) as usize;
            // Demo targets are always in range, so placement cannot fail
            let _ = grid.place(index, DEMO_KINDS[kind_index]);
        }
    }
}

fn lay_demo_block(grid: &mut CargoGrid, rng: &DemoRandom) {
    let start_row = if rng.at(500) > 0.5 { 0 } else { 1 };
    let start_col = (rng.at(501) * 4.0) as usize;
    let width = 2;
    let height = if rng.at(502) > 0.5 { 2 } else { 1 };

    let bounds = Bounds {
        min_row: start_row,
        max_row: (start_row + height - 1).min(GRID_ROWS - 1),
        min_col: start_col,
        max_col: (start_col + width - 1).min(GRID_COLS - 1),
    };
    if bounds.cell_count() < 2 {
        return;
    }

    let kind = DEMO_KINDS[(rng.at(503) * DEMO_KINDS.len() as f64) as usize];
    let id = format!("merge-demo-{}", rng.seed());
    // The grid was just cleared, so the rectangle is guaranteed empty
    let _ = grid.fuse(id, bounds, kind);
}
