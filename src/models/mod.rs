//! Models module for the cargo layout constructor
//!
//! This module contains the data model for the cell-grid cargo layout:
//! the grid aggregate, the cargo catalog, the detail-view manifests and the
//! deterministic demo fill.

pub mod catalog;
pub mod contents;
pub mod demo;
pub mod grid;

// Re-export commonly used types
pub use catalog::{CargoKind, CargoSpec, TempZone};
pub use contents::{detail_for, manifest_for, CargoDetail, CargoManifest};
pub use demo::{demo_fill, DemoRandom};
pub use grid::{
    cell_label, Bounds, CargoGrid, CellIndex, CellSlot, GridError, MergeGroup, Removal, GRID_COLS,
    GRID_ROWS, TOTAL_CELLS,
};
