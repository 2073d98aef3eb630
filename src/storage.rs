//! Layout persistence
//!
//! The grid is serialized to two independent key-value entries after every
//! mutation: the slot array (`null` for empty, a bare kind string for a
//! single cell, a `{type, mergeId}` object for a merge member) and the
//! merge-group map. Writes are best-effort and never interrupt the user;
//! loads are all-or-nothing, any corrupt or inconsistent snapshot is
//! discarded entirely in favor of an empty grid.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::models::{CargoGrid, CargoKind, CellSlot, MergeGroup};

/// Key-value entry holding the slot array
pub const GRID_KEY: &str = "cargodeck_grid";

/// Key-value entry holding the merge-group map
pub const GROUPS_KEY: &str = "cargodeck_merge_groups";

/// Failures on the storage seam
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("layout serialization failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage write failed: {0}")]
    Backend(String),
}

/// Key-value store seam. The WASM layer backs this with localStorage;
/// tests use [`MemoryStore`].
pub trait LayoutStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for native tests and headless hosts
#[derive(Default, Clone, Debug)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persisted form of one slot; absent (`null`) means empty
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum StoredCell {
    /// Merge member: `{"type": "...", "mergeId": "..."}`
    Member {
        #[serde(rename = "type")]
        kind: CargoKind,
        #[serde(rename = "mergeId")]
        merge_id: String,
    },

    /// Single occupied cell: a bare kind string
    Single(CargoKind),
}

/// Persisted form of one merge group
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StoredGroup {
    pub cells: Vec<usize>,
    #[serde(rename = "type")]
    pub kind: CargoKind,
    pub size: usize,
    pub bounds: crate::models::Bounds,
}

/// Serialize the grid into its two persisted JSON entries
pub fn snapshot(grid: &CargoGrid) -> Result<(String, String), StoreError> {
    let slots: Vec<Option<StoredCell>> = grid
        .slots()
        .iter()
        .map(|slot| match slot {
            CellSlot::Empty => None,
            CellSlot::Occupied(kind) => Some(StoredCell::Single(*kind)),
            CellSlot::MergedMember { kind, group_id } => Some(StoredCell::Member {
                kind: *kind,
                merge_id: group_id.clone(),
            }),
        })
        .collect();

    let groups: BTreeMap<&str, StoredGroup> = grid
        .groups()
        .iter()
        .map(|(id, group)| {
            (
                id.as_str(),
                StoredGroup {
                    cells: group.cells.clone(),
                    kind: group.kind,
                    size: group.size,
                    bounds: group.bounds,
                },
            )
        })
        .collect();

    Ok((serde_json::to_string(&slots)?, serde_json::to_string(&groups)?))
}

/// Write both layout entries to the store, logging and swallowing failures.
/// The in-memory model stays authoritative either way.
pub fn persist(store: &mut dyn LayoutStore, grid: &CargoGrid) {
    match snapshot(grid) {
        Ok((slots_json, groups_json)) => {
            if let Err(e) = store.set(GRID_KEY, &slots_json) {
                log::warn!("failed to persist cargo grid: {}", e);
            }
            if let Err(e) = store.set(GROUPS_KEY, &groups_json) {
                log::warn!("failed to persist merge groups: {}", e);
            }
        }
        Err(e) => log::warn!("failed to serialize cargo layout: {}", e),
    }
}

/// Rebuild a grid from persisted JSON entries.
///
/// Returns `None` when nothing usable is stored: a missing grid entry, a
/// grid array of the wrong length, a non-object group map, or any
/// inconsistency between slots and groups. Partial state is never adopted.
pub fn restore(
    grid_json: Option<&str>,
    groups_json: Option<&str>,
    merge_tag: u64,
) -> Option<CargoGrid> {
    let grid_json = grid_json?;

    let stored_slots: Vec<Option<StoredCell>> = match serde_json::from_str(grid_json) {
        Ok(slots) => slots,
        Err(e) => {
            log::warn!("discarding persisted cargo grid: {}", e);
            return None;
        }
    };

    let stored_groups: BTreeMap<String, StoredGroup> = match groups_json {
        Some(json) => match serde_json::from_str(json) {
            Ok(groups) => groups,
            Err(e) => {
                log::warn!("discarding persisted merge groups: {}", e);
                return None;
            }
        },
        None => BTreeMap::new(),
    };

    let slots: Vec<CellSlot> = stored_slots
        .into_iter()
        .map(|stored| match stored {
            None => CellSlot::Empty,
            Some(StoredCell::Single(kind)) => CellSlot::Occupied(kind),
            Some(StoredCell::Member { kind, merge_id }) => CellSlot::MergedMember {
                kind,
                group_id: merge_id,
            },
        })
        .collect();

    let groups: BTreeMap<String, MergeGroup> = stored_groups
        .into_iter()
        .map(|(id, group)| {
            (
                id.clone(),
                MergeGroup {
                    id,
                    cells: group.cells,
                    kind: group.kind,
                    size: group.size,
                    bounds: group.bounds,
                },
            )
        })
        .collect();

    match CargoGrid::from_parts(slots, groups, merge_tag) {
        Some(grid) => {
            log::info!(
                "restored persisted cargo layout ({} occupied cells, {} merge groups)",
                grid.occupied_cell_count(),
                grid.groups().len()
            );
            Some(grid)
        }
        None => {
            log::warn!("discarding inconsistent persisted cargo layout");
            None
        }
    }
}
