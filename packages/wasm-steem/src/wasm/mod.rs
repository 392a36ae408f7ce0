//! WASM bindings for wasm-steem
//!
//! This module contains thin wrappers with #[wasm_bindgen] that delegate
//! to the core Rust implementations.

pub mod builder;
pub mod decoder;
pub mod keys;
pub mod transaction;

// Re-export WASM types
pub use builder::BuilderNamespace;
pub use decoder::DecoderNamespace;
pub use keys::WasmPrivateKey;
pub use transaction::WasmTransaction;

use crate::chain::Chain;
use crate::types::Time;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Chain for an optional hex id passed from JS; Steem mainnet when absent
pub(crate) fn chain_or_default(chain_id: Option<String>) -> Chain {
    chain_id.map(Chain::new).unwrap_or_default()
}

/// Wall clock as seen by the JS host
pub(crate) fn js_now() -> Result<Time, JsValue> {
    let seconds = (js_sys::Date::now() / 1000.0) as i64;
    Time::from_unix(seconds).ok_or_else(|| JsValue::from_str("Host clock out of range"))
}

/// Serialize to a plain JS object (maps become objects, not `Map`)
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
