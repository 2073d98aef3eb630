//! Core data structures for the cargo layout constructor
//!
//! This module defines the cell-grid aggregate: a fixed 3×8 trailer grid of
//! cell slots plus the merge groups that fuse rectangular blocks of cells
//! into one logical cargo slot. All placement invariants are enforced here;
//! the controller and renderer operate purely through this type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::catalog::CargoKind;

/// Number of grid rows (trailer length axis)
pub const GRID_ROWS: usize = 3;

/// Number of grid columns (trailer width axis)
pub const GRID_COLS: usize = 8;

/// Total cell count
pub const TOTAL_CELLS: usize = GRID_ROWS * GRID_COLS;

/// Linear slot index in row-major order
pub type CellIndex = usize;

/// Human-readable cell identifier derived from the linear index ("BX-01", "BX-02", ...)
pub fn cell_label(index: CellIndex) -> String {
    format!("BX-{:02}", index + 1)
}

/// State of one grid position
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum CellSlot {
    /// No cargo assigned
    Empty,

    /// A single-cell cargo assignment
    Occupied(CargoKind),

    /// Cell belongs to a rectangular merge group; only the group's anchor
    /// cell is rendered, the rest keep the back-reference
    MergedMember { kind: CargoKind, group_id: String },
}

impl CellSlot {
    /// Cargo kind held by this slot, if any
    pub fn kind(&self) -> Option<CargoKind> {
        match self {
            CellSlot::Empty => None,
            CellSlot::Occupied(kind) => Some(*kind),
            CellSlot::MergedMember { kind, .. } => Some(*kind),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellSlot::Empty)
    }
}

/// Rectangular extent of a merge group, inclusive on both axes
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    #[serde(rename = "minRow")]
    pub min_row: usize,
    #[serde(rename = "maxRow")]
    pub max_row: usize,
    #[serde(rename = "minCol")]
    pub min_col: usize,
    #[serde(rename = "maxCol")]
    pub max_col: usize,
}

impl Bounds {
    /// Minimal axis-aligned rectangle spanning two linear indices
    pub fn spanning(a: CellIndex, b: CellIndex) -> Bounds {
        let (ar, ac) = (a / GRID_COLS, a % GRID_COLS);
        let (br, bc) = (b / GRID_COLS, b % GRID_COLS);
        Bounds {
            min_row: ar.min(br),
            max_row: ar.max(br),
            min_col: ac.min(bc),
            max_col: ac.max(bc),
        }
    }

    pub fn row_span(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn col_span(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn cell_count(&self) -> usize {
        self.row_span() * self.col_span()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }

    /// Whether the rectangle lies fully inside the fixed grid
    pub fn in_grid(&self) -> bool {
        self.min_row <= self.max_row
            && self.min_col <= self.max_col
            && self.max_row < GRID_ROWS
            && self.max_col < GRID_COLS
    }

    /// Member indices in row-major order; the first is the anchor (top-left)
    pub fn indices(&self) -> Vec<CellIndex> {
        let mut cells = Vec::with_capacity(self.cell_count());
        for row in self.min_row..=self.max_row {
            for col in self.min_col..=self.max_col {
                cells.push(row * GRID_COLS + col);
            }
        }
        cells
    }
}

/// A fused rectangular block of cells acting as one logical cargo slot
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MergeGroup {
    /// Generation-time unique identifier
    pub id: String,

    /// Member slot indices, row-major; exactly the rectangle of `bounds`
    pub cells: Vec<CellIndex>,

    /// Cargo kind assigned to the whole block
    pub kind: CargoKind,

    /// Member count, always >= 2
    pub size: usize,

    /// Rectangle extent used for visual spanning
    pub bounds: Bounds,
}

impl MergeGroup {
    /// Top-left member cell, the one rendered for the whole block
    pub fn anchor(&self) -> CellIndex {
        self.bounds.min_row * GRID_COLS + self.bounds.min_col
    }
}

/// Placement and merge failures; all recoverable, reported to the user as messages
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("cell index {0} is outside the grid")]
    OutOfBounds(CellIndex),

    #[error("cell {0} already holds cargo")]
    CellOccupied(CellIndex),

    #[error("merge rectangle would leave the trailer bounds")]
    RectOutOfBounds,

    #[error("merge rectangle covers occupied cell {0}")]
    MergeConflict(CellIndex),

    #[error("a merge needs at least two cells")]
    DegenerateMerge,
}

/// Outcome of removing cargo from a cell
#[derive(Clone, Debug, PartialEq)]
pub enum Removal {
    /// The cell was already empty
    Nothing,

    /// A single-cell assignment was cleared
    Single(CargoKind),

    /// The cell was a merge member; the whole group was removed
    Group(MergeGroup),
}

/// The cargo grid aggregate: sole owner of cell-slot and merge-group state
#[derive(Clone, Debug)]
pub struct CargoGrid {
    slots: Vec<CellSlot>,
    groups: BTreeMap<String, MergeGroup>,
    /// Session tag mixed into generated merge ids (wall clock on the host,
    /// fixed in tests)
    merge_tag: u64,
    next_merge_seq: u64,
}

impl CargoGrid {
    /// Create an all-empty grid
    pub fn new(merge_tag: u64) -> Self {
        Self {
            slots: vec![CellSlot::Empty; TOTAL_CELLS],
            groups: BTreeMap::new(),
            merge_tag,
            next_merge_seq: 0,
        }
    }

    /// Rebuild a grid from persisted parts, validating every invariant.
    ///
    /// Returns `None` when the parts are inconsistent in any way: wrong slot
    /// count, a member referencing a missing group, a group whose rectangle
    /// is not exactly its members, overlap between groups, a group smaller
    /// than two cells, or a rectangle outside the grid. Corrupt state is
    /// never partially adopted.
    pub fn from_parts(
        slots: Vec<CellSlot>,
        groups: BTreeMap<String, MergeGroup>,
        merge_tag: u64,
    ) -> Option<Self> {
        if slots.len() != TOTAL_CELLS {
            return None;
        }

        let mut claimed = vec![false; TOTAL_CELLS];
        for (id, group) in &groups {
            if *id != group.id || !group.bounds.in_grid() || group.size < 2 {
                return None;
            }
            let expected = group.bounds.indices();
            if group.cells != expected || group.size != expected.len() {
                return None;
            }
            for &idx in &expected {
                if claimed[idx] {
                    return None;
                }
                claimed[idx] = true;
                match &slots[idx] {
                    CellSlot::MergedMember { kind, group_id }
                        if *group_id == group.id && *kind == group.kind => {}
                    _ => return None,
                }
            }
        }

        // Every member slot must have been claimed by its group above
        for (idx, slot) in slots.iter().enumerate() {
            if matches!(slot, CellSlot::MergedMember { .. }) && !claimed[idx] {
                return None;
            }
        }

        Some(Self {
            slots,
            groups,
            merge_tag,
            next_merge_seq: 0,
        })
    }

    pub fn slots(&self) -> &[CellSlot] {
        &self.slots
    }

    pub fn groups(&self) -> &BTreeMap<String, MergeGroup> {
        &self.groups
    }

    pub fn slot(&self, index: CellIndex) -> Option<&CellSlot> {
        self.slots.get(index)
    }

    /// Cargo kind at a cell, if any
    pub fn kind_at(&self, index: CellIndex) -> Option<CargoKind> {
        self.slots.get(index).and_then(|slot| slot.kind())
    }

    /// Merge-group id a cell belongs to, if it is a member
    pub fn group_id_at(&self, index: CellIndex) -> Option<&str> {
        match self.slots.get(index) {
            Some(CellSlot::MergedMember { group_id, .. }) => Some(group_id),
            _ => None,
        }
    }

    pub fn group(&self, id: &str) -> Option<&MergeGroup> {
        self.groups.get(id)
    }

    /// Group a cell belongs to, if any
    pub fn group_for_cell(&self, index: CellIndex) -> Option<&MergeGroup> {
        self.group_id_at(index).and_then(|id| self.groups.get(id))
    }

    pub fn is_empty_cell(&self, index: CellIndex) -> bool {
        matches!(self.slots.get(index), Some(CellSlot::Empty))
    }

    /// Count of cells holding any cargo (merged blocks count their full size)
    pub fn occupied_cell_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    /// Whether any cell holds the given kind
    pub fn has_kind(&self, kind: CargoKind) -> bool {
        self.slots.iter().any(|slot| slot.kind() == Some(kind))
    }

    fn check_index(&self, index: CellIndex) -> Result<(), GridError> {
        if index < TOTAL_CELLS {
            Ok(())
        } else {
            Err(GridError::OutOfBounds(index))
        }
    }

    /// Place a single-cell cargo assignment into an empty slot
    pub fn place(&mut self, index: CellIndex, kind: CargoKind) -> Result<(), GridError> {
        self.check_index(index)?;
        if !self.slots[index].is_empty() {
            return Err(GridError::CellOccupied(index));
        }
        self.slots[index] = CellSlot::Occupied(kind);
        Ok(())
    }

    /// Remove cargo from a cell. A merge member drags its entire group out;
    /// partial removal of a merged block is not supported.
    pub fn remove(&mut self, index: CellIndex) -> Result<Removal, GridError> {
        self.check_index(index)?;
        match self.slots[index].clone() {
            CellSlot::Empty => Ok(Removal::Nothing),
            CellSlot::Occupied(kind) => {
                self.slots[index] = CellSlot::Empty;
                Ok(Removal::Single(kind))
            }
            CellSlot::MergedMember { group_id, .. } => match self.split(&group_id) {
                Some(group) => Ok(Removal::Group(group)),
                // Member without a live group is unreachable by construction
                None => Ok(Removal::Nothing),
            },
        }
    }

    /// Fuse the minimal rectangle spanning `anchor` and `target` into one
    /// merge group of the given kind. Every covered cell must be empty and
    /// the rectangle must hold at least two cells.
    pub fn merge(
        &mut self,
        anchor: CellIndex,
        target: CellIndex,
        kind: CargoKind,
    ) -> Result<MergeGroup, GridError> {
        self.check_index(anchor)?;
        self.check_index(target)?;
        let bounds = Bounds::spanning(anchor, target);
        let id = self.next_merge_id();
        self.fuse(id, bounds, kind)
    }

    /// Fuse a rectangle under a caller-supplied id (demo layouts use fixed ids)
    pub(crate) fn fuse(
        &mut self,
        id: String,
        bounds: Bounds,
        kind: CargoKind,
    ) -> Result<MergeGroup, GridError> {
        if !bounds.in_grid() {
            return Err(GridError::RectOutOfBounds);
        }

        let cells = bounds.indices();
        for &idx in &cells {
            if !self.slots[idx].is_empty() {
                return Err(GridError::MergeConflict(idx));
            }
        }
        if cells.len() < 2 {
            return Err(GridError::DegenerateMerge);
        }

        let group = MergeGroup {
            id: id.clone(),
            size: cells.len(),
            cells: cells.clone(),
            kind,
            bounds,
        };
        for &idx in &cells {
            self.slots[idx] = CellSlot::MergedMember {
                kind,
                group_id: id.clone(),
            };
        }
        self.groups.insert(id, group.clone());
        Ok(group)
    }

    /// Dissolve a merge group, reverting every member cell to empty.
    /// A stale or unknown id is a defensive no-op.
    pub fn split(&mut self, id: &str) -> Option<MergeGroup> {
        let group = self.groups.remove(id)?;
        for &idx in &group.cells {
            self.slots[idx] = CellSlot::Empty;
        }
        Some(group)
    }

    /// Reset every cell to empty and discard all merge groups
    pub fn clear(&mut self) {
        self.slots.fill(CellSlot::Empty);
        self.groups.clear();
    }

    fn next_merge_id(&mut self) -> String {
        let id = format!("merge-{}", self.merge_tag.wrapping_add(self.next_merge_seq));
        self.next_merge_seq += 1;
        id
    }

    /// Deterministic fingerprint of the occupancy state, used to seed the
    /// environment readout so it stays stable between mutations
    pub fn fingerprint(&self) -> u64 {
        let mut hash: u64 = 17;
        for slot in &self.slots {
            let code = match slot {
                CellSlot::Empty => 0,
                CellSlot::Occupied(kind) => 1 + *kind as u64,
                CellSlot::MergedMember { kind, .. } => 11 + *kind as u64,
            };
            hash = hash.wrapping_mul(31).wrapping_add(code);
        }
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_into_empty_cell() {
        let mut grid = CargoGrid::new(0);
        grid.place(0, CargoKind::Cold).unwrap();
        assert_eq!(grid.kind_at(0), Some(CargoKind::Cold));
        assert_eq!(grid.occupied_cell_count(), 1);
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut grid = CargoGrid::new(0);
        grid.place(3, CargoKind::Dry).unwrap();
        assert_eq!(
            grid.place(3, CargoKind::Cold),
            Err(GridError::CellOccupied(3))
        );
        // Original assignment untouched
        assert_eq!(grid.kind_at(3), Some(CargoKind::Dry));
    }

    #[test]
    fn test_place_rejects_out_of_bounds() {
        let mut grid = CargoGrid::new(0);
        assert_eq!(
            grid.place(TOTAL_CELLS, CargoKind::Cold),
            Err(GridError::OutOfBounds(TOTAL_CELLS))
        );
    }

    #[test]
    fn test_merge_builds_full_rectangle() {
        let mut grid = CargoGrid::new(0);
        // Indices 0 and 9 span rows 0-1, cols 0-1
        let group = grid.merge(0, 9, CargoKind::Dry).unwrap();
        assert_eq!(group.cells, vec![0, 1, 8, 9]);
        assert_eq!(group.size, 4);
        assert_eq!(group.anchor(), 0);
        for idx in [0, 1, 8, 9] {
            assert_eq!(grid.group_id_at(idx), Some(group.id.as_str()));
        }
    }

    #[test]
    fn test_merge_rejects_occupied_interior() {
        let mut grid = CargoGrid::new(0);
        grid.place(1, CargoKind::Hazmat).unwrap();
        assert_eq!(
            grid.merge(0, 9, CargoKind::Dry),
            Err(GridError::MergeConflict(1))
        );
        // Nothing changed
        assert_eq!(grid.kind_at(1), Some(CargoKind::Hazmat));
        assert!(grid.groups().is_empty());
        assert!(grid.is_empty_cell(0));
    }

    #[test]
    fn test_merge_rejects_single_cell() {
        let mut grid = CargoGrid::new(0);
        assert_eq!(
            grid.merge(5, 5, CargoKind::Cold),
            Err(GridError::DegenerateMerge)
        );
    }

    #[test]
    fn test_merge_ids_are_unique() {
        let mut grid = CargoGrid::new(1700000000000);
        let a = grid.merge(0, 1, CargoKind::Cold).unwrap();
        let b = grid.merge(2, 3, CargoKind::Cold).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_split_reverts_all_members() {
        let mut grid = CargoGrid::new(0);
        let group = grid.merge(0, 9, CargoKind::Dry).unwrap();
        let removed = grid.split(&group.id).unwrap();
        assert_eq!(removed.cells, vec![0, 1, 8, 9]);
        for idx in [0, 1, 8, 9] {
            assert!(grid.is_empty_cell(idx));
        }
        assert!(grid.group(&group.id).is_none());
    }

    #[test]
    fn test_split_unknown_id_is_noop() {
        let mut grid = CargoGrid::new(0);
        grid.place(0, CargoKind::Cold).unwrap();
        assert!(grid.split("merge-stale").is_none());
        assert_eq!(grid.kind_at(0), Some(CargoKind::Cold));
    }

    #[test]
    fn test_remove_member_drops_whole_group() {
        let mut grid = CargoGrid::new(0);
        let group = grid.merge(0, 9, CargoKind::Fragile).unwrap();
        // Remove through a non-anchor member
        match grid.remove(9).unwrap() {
            Removal::Group(g) => assert_eq!(g.id, group.id),
            other => panic!("expected group removal, got {:?}", other),
        }
        assert_eq!(grid.occupied_cell_count(), 0);
        assert!(grid.groups().is_empty());
    }

    #[test]
    fn test_remove_empty_cell_is_nothing() {
        let mut grid = CargoGrid::new(0);
        assert_eq!(grid.remove(7).unwrap(), Removal::Nothing);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut grid = CargoGrid::new(0);
        grid.place(2, CargoKind::General).unwrap();
        grid.merge(0, 9, CargoKind::Cold).unwrap();
        grid.clear();
        let first = (grid.slots().to_vec(), grid.groups().clone());
        grid.clear();
        assert_eq!(grid.slots().to_vec(), first.0);
        assert_eq!(grid.groups().clone(), first.1);
        assert_eq!(grid.occupied_cell_count(), 0);
    }

    #[test]
    fn test_fingerprint_stable_until_mutation() {
        let mut grid = CargoGrid::new(0);
        grid.place(0, CargoKind::Cold).unwrap();
        let a = grid.fingerprint();
        let b = grid.fingerprint();
        assert_eq!(a, b);
        grid.place(1, CargoKind::Hot).unwrap();
        assert_ne!(grid.fingerprint(), a);
    }

    #[test]
    fn test_from_parts_rejects_member_without_group() {
        let mut slots = vec![CellSlot::Empty; TOTAL_CELLS];
        slots[0] = CellSlot::MergedMember {
            kind: CargoKind::Cold,
            group_id: "merge-ghost".into(),
        };
        assert!(CargoGrid::from_parts(slots, BTreeMap::new(), 0).is_none());
    }

    #[test]
    fn test_cell_label_format() {
        assert_eq!(cell_label(0), "BX-01");
        assert_eq!(cell_label(23), "BX-24");
    }
}
