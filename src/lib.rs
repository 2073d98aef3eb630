//! Cargo Layout Constructor WASM Module
//!
//! This is the WASM module for the fleet dashboard's cargo constructor.
//! It provides the cell-grid cargo layout editor: placement, rectangular
//! cell merging, rendering projection, statistics and persistence.

pub mod api;
pub mod controller;
pub mod models;
pub mod renderers;
pub mod storage;

// Re-export commonly used types
pub use api::CargoLayoutEditor;
pub use controller::{GestureOutcome, LayoutEditor, Toast, ToastLevel};
pub use models::*;
pub use renderers::{build_display_list, compute_stats, GridDisplayList, LoadStats};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Cargo layout constructor WASM module initialized");
}
