//! Shared helpers for WASM API operations
//!
//! Common patterns for serialization, error conversion and validation
//! across the JavaScript-facing API.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::CargoKind;

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Convert a validation error to a JsValue
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    log::error!("{}", msg);
    JsValue::from_str(&msg)
}

/// Parse a palette kind key coming from the host
pub fn parse_kind(key: &str) -> Result<CargoKind, JsValue> {
    CargoKind::from_key(key)
        .ok_or_else(|| validation_error(format!("Unknown cargo kind: '{}'", key)))
}
