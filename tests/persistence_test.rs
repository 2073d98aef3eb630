// Persistence round-trip and corrupt-snapshot handling through the public
// storage surface and the editor mount path.

use cargodeck_wasm::controller::LayoutEditor;
use cargodeck_wasm::models::{CargoGrid, CargoKind, TOTAL_CELLS};
use cargodeck_wasm::storage::{persist, restore, snapshot, LayoutStore, MemoryStore, GRID_KEY, GROUPS_KEY};

fn loaded_grid() -> CargoGrid {
    let mut grid = CargoGrid::new(1700000000000);
    grid.place(4, CargoKind::Fragile).unwrap();
    grid.place(23, CargoKind::Hot).unwrap();
    grid.merge(16, 9, CargoKind::Cold).unwrap(); // rows 1-2, cols 0-1
    grid
}

#[test]
fn test_round_trip_with_merge_group() {
    let grid = loaded_grid();
    let (slots_json, groups_json) = snapshot(&grid).unwrap();
    let restored = restore(Some(&slots_json), Some(&groups_json), 1).unwrap();

    assert_eq!(restored.slots(), grid.slots());
    assert_eq!(restored.groups().len(), 1);
    let (original, roundtripped) = (
        grid.groups().values().next().unwrap(),
        restored.groups().values().next().unwrap(),
    );
    assert_eq!(original.bounds, roundtripped.bounds);
    assert_eq!(original.cells, roundtripped.cells);
}

#[test]
fn test_editor_mounts_from_persisted_store() {
    let mut store = MemoryStore::new();
    persist(&mut store, &loaded_grid());

    let editor = LayoutEditor::mount(Box::new(store), 2);
    assert_eq!(editor.grid().kind_at(4), Some(CargoKind::Fragile));
    assert_eq!(editor.grid().occupied_cell_count(), 2 + 4);
    assert_eq!(editor.grid().groups().len(), 1);
}

#[test]
fn test_editor_mounts_empty_on_wrong_length() {
    let mut store = MemoryStore::new();
    store
        .set(GRID_KEY, &serde_json::json!(["cold", null, null]).to_string())
        .unwrap();

    let editor = LayoutEditor::mount(Box::new(store), 0);
    assert_eq!(editor.grid().occupied_cell_count(), 0);
}

#[test]
fn test_editor_mounts_empty_on_unparseable_json() {
    let mut store = MemoryStore::new();
    store.set(GRID_KEY, "not json at all").unwrap();

    let editor = LayoutEditor::mount(Box::new(store), 0);
    assert_eq!(editor.grid().occupied_cell_count(), 0);
}

#[test]
fn test_editor_mounts_empty_on_cross_inconsistency() {
    // A grid that references a merge group the group map does not contain
    let mut slots = vec![serde_json::Value::Null; TOTAL_CELLS];
    slots[0] = serde_json::json!({"type": "dry", "mergeId": "merge-1"});
    slots[1] = serde_json::json!({"type": "dry", "mergeId": "merge-1"});

    let mut store = MemoryStore::new();
    store
        .set(GRID_KEY, &serde_json::Value::Array(slots).to_string())
        .unwrap();
    store.set(GROUPS_KEY, "{}").unwrap();

    let editor = LayoutEditor::mount(Box::new(store), 0);
    // Nothing partially adopted
    assert_eq!(editor.grid().occupied_cell_count(), 0);
    assert!(editor.grid().groups().is_empty());
}

#[test]
fn test_unknown_kind_string_discards_snapshot() {
    let mut slots = vec![serde_json::Value::Null; TOTAL_CELLS];
    slots[3] = serde_json::json!("plasma");

    let mut store = MemoryStore::new();
    store
        .set(GRID_KEY, &serde_json::Value::Array(slots).to_string())
        .unwrap();

    let editor = LayoutEditor::mount(Box::new(store), 0);
    assert_eq!(editor.grid().occupied_cell_count(), 0);
}
