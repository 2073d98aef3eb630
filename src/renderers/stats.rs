//! Aggregate statistics over the cargo grid
//!
//! Recomputed after every mutation: per-kind cell counts, load percentage,
//! total weight, the advisory temperature-conflict flag and the simulated
//! environment readout for the cargo hold.

use serde::Serialize;

use crate::models::{CargoGrid, CargoKind, DemoRandom, TOTAL_CELLS};

/// Per-kind occupied cell counters (merged blocks count every member cell)
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub cold: usize,
    pub hot: usize,
    pub dry: usize,
    pub fragile: usize,
    pub hazmat: usize,
    pub general: usize,
}

impl KindCounts {
    pub fn get(&self, kind: CargoKind) -> usize {
        match kind {
            CargoKind::Cold => self.cold,
            CargoKind::Hot => self.hot,
            CargoKind::Dry => self.dry,
            CargoKind::Fragile => self.fragile,
            CargoKind::Hazmat => self.hazmat,
            CargoKind::General => self.general,
        }
    }

    fn bump(&mut self, kind: CargoKind) {
        match kind {
            CargoKind::Cold => self.cold += 1,
            CargoKind::Hot => self.hot += 1,
            CargoKind::Dry => self.dry += 1,
            CargoKind::Fragile => self.fragile += 1,
            CargoKind::Hazmat => self.hazmat += 1,
            CargoKind::General => self.general += 1,
        }
    }
}

/// Simulated cargo-hold environment readout.
///
/// These values are display estimates, not measured data. They are derived
/// deterministically from the occupancy fingerprint, so they stay stable
/// between model mutations and always fall inside the band of the dominant
/// extreme cargo kind (hot, then cold, then hazmat, else neutral).
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct EnvReadout {
    pub temp_c: f64,
    pub humidity_pct: f64,
    pub pressure_bar: f64,
}

/// Derived read-only analytics for one grid state
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LoadStats {
    pub total_cells: usize,
    pub occupied_cells: usize,

    /// `occupied_cells / total_cells`, rounded to a whole percent
    pub load_percent: u8,

    /// Sum of unit weight factors over occupied cells (tons)
    pub total_weight: f64,

    pub counts: KindCounts,

    /// Advisory flag: cold and hot cargo present at the same time. Never
    /// blocks placement.
    pub temp_conflict: bool,

    pub readout: EnvReadout,
}

/// Compute aggregate statistics for the current grid state
pub fn compute_stats(grid: &CargoGrid) -> LoadStats {
    let mut counts = KindCounts::default();
    let mut total_weight = 0.0;

    for slot in grid.slots() {
        if let Some(kind) = slot.kind() {
            counts.bump(kind);
            total_weight += kind.spec().weight_factor as f64;
        }
    }

    let occupied_cells = grid.occupied_cell_count();
    let load_percent =
        ((occupied_cells as f64 / TOTAL_CELLS as f64) * 100.0).round() as u8;
    let temp_conflict = counts.cold > 0 && counts.hot > 0;

    LoadStats {
        total_cells: TOTAL_CELLS,
        occupied_cells,
        load_percent,
        total_weight,
        counts,
        temp_conflict,
        readout: env_readout(grid, &counts),
    }
}

fn env_readout(grid: &CargoGrid, counts: &KindCounts) -> EnvReadout {
    let rng = DemoRandom::with_seed(grid.fingerprint());

    let temp_c = if counts.hot > 0 {
        65.0 + rng.at(0) * 10.0
    } else if counts.cold > 0 {
        2.0 + rng.at(1) * 2.0
    } else if counts.hazmat > 0 {
        15.0
    } else {
        18.0
    };

    EnvReadout {
        temp_c,
        humidity_pct: 48.0 + rng.at(2) * 6.0,
        pressure_bar: 1.0 + rng.at(3) * 0.04,
    }
}
