//! JavaScript-facing editor handle
//!
//! The host page constructs one `CargoLayoutEditor` when the cargo
//! constructor mounts and calls its methods from event handlers. All state
//! lives inside the handle; persistence goes through localStorage.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{parse_kind, serialize};
use crate::controller::LayoutEditor;
use crate::models::CellIndex;
use crate::storage::{LayoutStore, StoreError};

/// Key-value store backed by `window.localStorage`. When localStorage is
/// unavailable (sandboxed frames, disabled cookies) every write fails and
/// is logged; the in-memory model remains authoritative.
struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageStore {
    fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable, cargo layout will not persist");
        }
        Self { storage }
    }
}

impl LayoutStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match &self.storage {
            Some(storage) => storage
                .set_item(key, value)
                .map_err(|e| StoreError::Backend(format!("{:?}", e))),
            None => Err(StoreError::Backend("localStorage unavailable".into())),
        }
    }
}

/// WASM handle for the cargo layout constructor
#[wasm_bindgen]
pub struct CargoLayoutEditor {
    inner: LayoutEditor,
}

#[wasm_bindgen]
impl CargoLayoutEditor {
    /// Mount the editor, restoring any persisted layout from localStorage
    #[wasm_bindgen(constructor)]
    pub fn new() -> CargoLayoutEditor {
        let merge_tag = js_sys::Date::now() as u64;
        let inner = LayoutEditor::mount(Box::new(LocalStorageStore::open()), merge_tag);
        log::info!("cargo layout editor mounted");
        CargoLayoutEditor { inner }
    }

    /// Dispatch a click on a cell. Returns the gesture outcome: toasts to
    /// show, an optional detail record, the pending merge anchor.
    #[wasm_bindgen(js_name = clickCell)]
    pub fn click_cell(
        &mut self,
        index: usize,
        shift: bool,
        ctrl: bool,
    ) -> Result<JsValue, JsValue> {
        let outcome = self.inner.click_cell(index, shift, ctrl);
        serialize(&outcome, "clickCell outcome serialization failed")
    }

    /// Drop a dragged palette token onto a cell
    #[wasm_bindgen(js_name = dropCargo)]
    pub fn drop_cargo(&mut self, index: usize, kind: &str) -> Result<JsValue, JsValue> {
        let kind = parse_kind(kind)?;
        let outcome = self.inner.drop_cargo(index, kind);
        serialize(&outcome, "dropCargo outcome serialization failed")
    }

    /// Select the palette kind used by subsequent placements and merges
    #[wasm_bindgen(js_name = selectCargoKind)]
    pub fn select_cargo_kind(&mut self, kind: &str) -> Result<(), JsValue> {
        self.inner.select_kind(parse_kind(kind)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = selectedCargoKind)]
    pub fn selected_cargo_kind(&self) -> String {
        self.inner.selected_kind().key().to_string()
    }

    /// Unload cargo from a cell (detail dialog action)
    #[wasm_bindgen(js_name = removeCargo)]
    pub fn remove_cargo(&mut self, index: usize) -> Result<JsValue, JsValue> {
        let outcome = self.inner.remove_cargo(index);
        serialize(&outcome, "removeCargo outcome serialization failed")
    }

    /// Clear the whole grid
    #[wasm_bindgen(js_name = clearGrid)]
    pub fn clear_grid(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.inner.clear();
        serialize(&outcome, "clearGrid outcome serialization failed")
    }

    /// Replace the layout with the deterministic demo fill for a vehicle
    #[wasm_bindgen(js_name = loadDemoLayout)]
    pub fn load_demo_layout(
        &mut self,
        vehicle_name: &str,
        load_hint: Option<f64>,
    ) -> Result<JsValue, JsValue> {
        let outcome = self.inner.load_demo(vehicle_name, load_hint);
        serialize(&outcome, "loadDemoLayout outcome serialization failed")
    }

    /// Project the current grid into a display list
    pub fn render(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.render(), "display list serialization failed")
    }

    /// Aggregate statistics for the current grid
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.stats(), "stats serialization failed")
    }

    /// Detail record for an occupied cell, or `null` when empty
    #[wasm_bindgen(js_name = cellManifest)]
    pub fn cell_manifest(&self, index: usize) -> Result<JsValue, JsValue> {
        serialize(&self.inner.detail(index), "manifest serialization failed")
    }

    /// Pending merge anchor cell for host highlighting, if any
    #[wasm_bindgen(js_name = mergePending)]
    pub fn merge_pending(&self) -> Option<CellIndex> {
        self.inner.pending_anchor()
    }
}

impl Default for CargoLayoutEditor {
    fn default() -> Self {
        Self::new()
    }
}
