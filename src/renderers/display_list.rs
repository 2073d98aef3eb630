//! Display list for the cargo grid
//!
//! This module defines the output structure projected from the grid model to
//! the host page. The display list contains all pre-calculated spans, labels
//! and styling hints needed for JavaScript to render DOM elements without
//! inspecting the model itself. Building it never mutates anything.

use serde::Serialize;

use crate::models::{cell_label, CargoGrid, CargoKind, CellIndex, CellSlot, GRID_COLS, GRID_ROWS};

/// Zone letters stamped on the grid, one zone per two columns
pub const ZONE_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Top-level display list for one render pass
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GridDisplayList {
    pub rows: usize,
    pub cols: usize,

    /// Visual blocks in row-major order; merged groups contribute a single
    /// spanning block at their anchor, member cells are suppressed
    pub blocks: Vec<RenderBlock>,
}

/// One visual element: a single cell or a merged block anchor
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RenderBlock {
    /// Linear index of the anchor cell
    pub index: CellIndex,

    /// Stable human-readable identifier ("BX-01", ...)
    pub cell_id: String,

    /// Grid placement (0-based) and span
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,

    /// Trailer zone letter for this column
    pub zone: char,

    /// Whether the host should draw a heavier zone border on the left edge
    pub zone_boundary: bool,

    /// Cargo styling, `None` for an empty cell
    pub cargo: Option<RenderCargo>,

    /// Tooltip text
    pub title: String,
}

/// Styling payload for an occupied block
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RenderCargo {
    pub kind: CargoKind,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub temp_label: &'static str,

    /// Estimated weight label: base weight for the kind times block size
    pub weight_kg: u32,

    pub merged: bool,
    pub group_id: Option<String>,
    pub size: usize,
}

/// Project the grid model into a display list
pub fn build_display_list(grid: &CargoGrid) -> GridDisplayList {
    let mut blocks = Vec::new();

    for (index, slot) in grid.slots().iter().enumerate() {
        let row = index / GRID_COLS;
        let col = index % GRID_COLS;
        let zone = ZONE_LABELS[col / 2];
        let zone_boundary = col > 0 && col % 2 == 0;
        let cell_id = cell_label(index);

        let block = match slot {
            CellSlot::Empty => RenderBlock {
                title: format!("{}: Empty cell | Click to add cargo", cell_id),
                index,
                cell_id,
                row,
                col,
                row_span: 1,
                col_span: 1,
                zone,
                zone_boundary,
                cargo: None,
            },
            CellSlot::Occupied(kind) => {
                let spec = kind.spec();
                let weight_kg = spec.base_weight_kg;
                RenderBlock {
                    title: format!(
                        "{}: {} | {} | {} kg",
                        cell_id, spec.label, spec.temp_label, weight_kg
                    ),
                    index,
                    cell_id,
                    row,
                    col,
                    row_span: 1,
                    col_span: 1,
                    zone,
                    zone_boundary,
                    cargo: Some(RenderCargo {
                        kind: *kind,
                        label: spec.label,
                        color: spec.color,
                        icon: spec.icon,
                        temp_label: spec.temp_label,
                        weight_kg,
                        merged: false,
                        group_id: None,
                        size: 1,
                    }),
                }
            }
            CellSlot::MergedMember { kind, group_id } => {
                // Group lookup cannot fail for a live member; skip defensively
                let Some(group) = grid.group(group_id) else {
                    continue;
                };
                if group.anchor() != index {
                    // Covered by the anchor's span
                    continue;
                }
                let spec = kind.spec();
                let weight_kg = spec.base_weight_kg * group.size as u32;
                RenderBlock {
                    title: format!(
                        "{}: {} ({} cells, {} kg) | Ctrl+click to split",
                        cell_id, spec.label, group.size, weight_kg
                    ),
                    index,
                    cell_id,
                    row,
                    col,
                    row_span: group.bounds.row_span(),
                    col_span: group.bounds.col_span(),
                    zone,
                    zone_boundary,
                    cargo: Some(RenderCargo {
                        kind: *kind,
                        label: spec.label,
                        color: spec.color,
                        icon: spec.icon,
                        temp_label: spec.temp_label,
                        weight_kg,
                        merged: true,
                        group_id: Some(group_id.clone()),
                        size: group.size,
                    }),
                }
            }
        };
        blocks.push(block);
    }

    GridDisplayList {
        rows: GRID_ROWS,
        cols: GRID_COLS,
        blocks,
    }
}
