//! Interaction controller
//!
//! Maps pointer gestures (clicks with modifier keys, palette drag-and-drop)
//! onto grid mutations and reports the side effects the host page must
//! apply: toast messages, the detail dialog, the pending merge anchor.
//! Every successful mutation persists the layout; rejected operations only
//! ask the host to re-render.

use serde::Serialize;

use crate::models::{
    demo_fill, detail_for, CargoDetail, CargoGrid, CargoKind, CellIndex, GridError, Removal,
    TOTAL_CELLS,
};
use crate::renderers::{build_display_list, compute_stats, GridDisplayList, LoadStats};
use crate::storage::{self, LayoutStore, GRID_KEY, GROUPS_KEY};

/// Severity of a user-facing toast message
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Danger,
}

/// One toast notification for the host to show
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub text: String,
}

impl Toast {
    fn info(text: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            text: text.into(),
        }
    }

    fn danger(text: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Danger,
            text: text.into(),
        }
    }
}

/// Effects of one dispatched gesture
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct GestureOutcome {
    /// Whether the model changed (the host should re-render and refresh stats
    /// either way, to clear stale hover and anchor highlighting)
    pub mutated: bool,

    pub toasts: Vec<Toast>,

    /// Detail dialog to open, for a plain click on an occupied cell
    pub detail: Option<CargoDetail>,

    /// Merge anchor still pending after this gesture, for host highlighting
    pub anchor: Option<CellIndex>,
}

/// Merge gesture state. Only one anchor may be pending at a time; starting
/// a new merge while one is pending is only reachable by re-clicking the
/// anchor, which cancels it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MergeGesture {
    Idle,
    AnchorPending(CellIndex),
}

/// The editor: grid model, transient gesture state, selected palette kind
/// and the persistence seam. Owned by the host component, no globals.
pub struct LayoutEditor {
    grid: CargoGrid,
    gesture: MergeGesture,
    selected: CargoKind,
    store: Box<dyn LayoutStore>,
}

impl LayoutEditor {
    /// Mount the editor, adopting a persisted layout when a valid one exists
    pub fn mount(store: Box<dyn LayoutStore>, merge_tag: u64) -> Self {
        let grid = storage::restore(
            store.get(GRID_KEY).as_deref(),
            store.get(GROUPS_KEY).as_deref(),
            merge_tag,
        )
        .unwrap_or_else(|| CargoGrid::new(merge_tag));

        Self {
            grid,
            gesture: MergeGesture::Idle,
            selected: CargoKind::Cold,
            store,
        }
    }

    pub fn grid(&self) -> &CargoGrid {
        &self.grid
    }

    /// Currently selected palette kind
    pub fn selected_kind(&self) -> CargoKind {
        self.selected
    }

    pub fn select_kind(&mut self, kind: CargoKind) {
        self.selected = kind;
    }

    /// Pending merge anchor, if a merge gesture is in progress
    pub fn pending_anchor(&self) -> Option<CellIndex> {
        match self.gesture {
            MergeGesture::Idle => None,
            MergeGesture::AnchorPending(index) => Some(index),
        }
    }

    pub fn render(&self) -> GridDisplayList {
        build_display_list(&self.grid)
    }

    pub fn stats(&self) -> LoadStats {
        compute_stats(&self.grid)
    }

    pub fn detail(&self, index: CellIndex) -> Option<CargoDetail> {
        detail_for(&self.grid, index)
    }

    /// Dispatch a click on cell `index` with the given modifier state
    pub fn click_cell(&mut self, index: CellIndex, shift: bool, ctrl: bool) -> GestureOutcome {
        let mut out = GestureOutcome::default();

        if index >= TOTAL_CELLS {
            out.toasts.push(Toast::danger("Error: outside the grid"));
            out.anchor = self.pending_anchor();
            return out;
        }

        // Ctrl (or Cmd) click on a merge member splits the group; on any
        // other cell it falls through to the plain-click path
        if ctrl {
            if let Some(group_id) = self.grid.group_id_at(index).map(str::to_owned) {
                self.split_group(&group_id, &mut out);
                out.anchor = self.pending_anchor();
                return out;
            }
        }

        if shift {
            self.shift_click(index, &mut out);
            out.anchor = self.pending_anchor();
            return out;
        }

        // Plain click cancels any pending merge first
        if self.gesture != MergeGesture::Idle {
            self.gesture = MergeGesture::Idle;
            out.toasts.push(Toast::info("Merge cancelled"));
        }

        if self.grid.kind_at(index).is_some() {
            out.detail = detail_for(&self.grid, index);
        } else {
            self.mutate(&mut out, |grid, selected| grid.place(index, selected).map(|_| None));
        }

        out.anchor = self.pending_anchor();
        out
    }

    fn shift_click(&mut self, index: CellIndex, out: &mut GestureOutcome) {
        match self.gesture {
            MergeGesture::Idle => {
                if self.grid.is_empty_cell(index) {
                    self.gesture = MergeGesture::AnchorPending(index);
                    out.toasts.push(Toast::info("Now Shift+click the end cell"));
                } else {
                    out.toasts
                        .push(Toast::info("Pick an empty cell to start merging"));
                }
            }
            MergeGesture::AnchorPending(anchor) if anchor == index => {
                self.gesture = MergeGesture::Idle;
                out.toasts.push(Toast::info("Merge cancelled"));
            }
            MergeGesture::AnchorPending(anchor) => {
                // The anchor is cleared regardless of the outcome
                self.gesture = MergeGesture::Idle;
                self.mutate(out, |grid, selected| {
                    grid.merge(anchor, index, selected)
                        .map(|group| Some(Toast::info(format!("Merged {} cells", group.size))))
                });
            }
        }
    }

    /// Drop a dragged palette token onto a cell. Dropping on an occupied
    /// cell is a silent no-op; hover styling is the host's concern.
    pub fn drop_cargo(&mut self, index: CellIndex, kind: CargoKind) -> GestureOutcome {
        let mut out = GestureOutcome::default();
        if index < TOTAL_CELLS && self.grid.is_empty_cell(index) {
            self.mutate(&mut out, |grid, _| grid.place(index, kind).map(|_| None));
        }
        out.anchor = self.pending_anchor();
        out
    }

    /// Unload cargo from a cell (the detail dialog's remove action).
    /// A merge member unloads its entire block.
    pub fn remove_cargo(&mut self, index: CellIndex) -> GestureOutcome {
        let mut out = GestureOutcome::default();
        if index >= TOTAL_CELLS {
            out.toasts.push(Toast::danger("Error: outside the grid"));
            return out;
        }

        self.mutate(&mut out, |grid, _| {
            grid.remove(index).map(|removal| match removal {
                Removal::Nothing => None,
                Removal::Single(_) => Some(Toast::info("Cargo unloaded from cell")),
                Removal::Group(_) => Some(Toast::info("Merged cargo unloaded")),
            })
        });
        out.anchor = self.pending_anchor();
        out
    }

    /// Clear the whole grid
    pub fn clear(&mut self) -> GestureOutcome {
        let mut out = GestureOutcome::default();
        self.gesture = MergeGesture::Idle;
        self.mutate(&mut out, |grid, _| {
            grid.clear();
            Ok(Some(Toast::info("Cargo cleared")))
        });
        out
    }

    /// Replace the layout with the deterministic demo fill for a vehicle.
    /// Demo layouts are not persisted; the next real mutation is.
    pub fn load_demo(&mut self, vehicle_name: &str, load_hint: Option<f64>) -> GestureOutcome {
        let mut out = GestureOutcome::default();
        self.gesture = MergeGesture::Idle;

        let conflict_before = self.stats().temp_conflict;
        demo_fill(&mut self.grid, vehicle_name, load_hint.unwrap_or(60.0));
        out.mutated = true;
        self.warn_on_new_conflict(conflict_before, &mut out);
        out
    }

    fn split_group(&mut self, group_id: &str, out: &mut GestureOutcome) {
        let conflict_before = self.stats().temp_conflict;
        if self.grid.split(group_id).is_some() {
            out.mutated = true;
            out.toasts.push(Toast::info("Cells split"));
            self.warn_on_new_conflict(conflict_before, out);
            storage::persist(self.store.as_mut(), &self.grid);
        }
        // Stale id: defensive no-op, nothing to report
    }

    /// Run a grid mutation, translating errors into toasts and persisting
    /// on success. The closure returns an optional success toast.
    fn mutate<F>(&mut self, out: &mut GestureOutcome, op: F)
    where
        F: FnOnce(&mut CargoGrid, CargoKind) -> Result<Option<Toast>, GridError>,
    {
        let conflict_before = self.stats().temp_conflict;
        match op(&mut self.grid, self.selected) {
            Ok(toast) => {
                out.mutated = true;
                if let Some(toast) = toast {
                    out.toasts.push(toast);
                }
                self.warn_on_new_conflict(conflict_before, out);
                storage::persist(self.store.as_mut(), &self.grid);
            }
            Err(error) => out.toasts.push(toast_for_error(&error)),
        }
    }

    fn warn_on_new_conflict(&self, conflict_before: bool, out: &mut GestureOutcome) {
        if !conflict_before && self.stats().temp_conflict {
            out.toasts.push(Toast::danger(
                "Warning: cold and hot cargo cannot be carried together!",
            ));
        }
    }
}

fn toast_for_error(error: &GridError) -> Toast {
    match error {
        GridError::OutOfBounds(_) => Toast::danger("Error: outside the grid"),
        GridError::CellOccupied(_) => Toast::info("Cell already holds cargo"),
        GridError::RectOutOfBounds => Toast::danger("Merge would leave the trailer bounds"),
        GridError::MergeConflict(_) => Toast::info("Cannot merge: some cells are occupied"),
        GridError::DegenerateMerge => Toast::info("Select at least 2 cells"),
    }
}
