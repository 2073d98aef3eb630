//! Cargo layout constructor WASM API
//!
//! This module provides the JavaScript-facing API: the editor handle owned
//! by the host page and shared helpers for serialization and validation.

pub mod editor;
pub mod helpers;

pub use editor::CargoLayoutEditor;
