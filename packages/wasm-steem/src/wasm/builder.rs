//! WASM bindings for transaction building
//!
//! BuilderNamespace provides the entry point for assembling Steem transactions:
//! buildTransaction(operations, context)

use crate::builder::{build_from_context, types::BuildContext};
use crate::error::WasmSteemError;
use crate::operations::Operation;
use crate::wasm::js_now;
use crate::wasm::transaction::WasmTransaction;
use wasm_bindgen::prelude::*;

/// Namespace for building operations
#[wasm_bindgen]
pub struct BuilderNamespace;

#[wasm_bindgen]
impl BuilderNamespace {
    /// Assemble an unsigned transaction on top of the current head block
    ///
    /// # Arguments
    /// * `operations` - Array of `[name, body]` operations
    /// * `context` - `{ headBlock, expiration? }`; `headBlock` is `{ number, id }` or a
    ///   `get_dynamic_global_properties` result, `expiration` is `YYYY-MM-DDTHH:MM:SS`
    ///   (UTC) and defaults to now + 30s
    ///
    /// # Example Context
    /// ```json
    /// {
    ///   "headBlock": { "number": 10, "id": "0000000af6e3ab1b8b3fd6de8f6e76d4ca3d7b4b1d0c1a72d0b2bd9c1f9dcd14" },
    ///   "expiration": "2016-04-06T08:29:57"
    /// }
    /// ```
    #[wasm_bindgen(js_name = buildTransaction)]
    pub fn build_transaction_wasm(
        operations: JsValue,
        context: JsValue,
    ) -> Result<WasmTransaction, JsValue> {
        let operations: Vec<Operation> = serde_wasm_bindgen::from_value(operations)
            .map_err(|e| JsValue::from_str(&format!("Invalid operations: {}", e)))?;

        let context: BuildContext = serde_wasm_bindgen::from_value(context)
            .map_err(|e| JsValue::from_str(&format!("Invalid context: {}", e)))?;

        let tx = build_from_context(operations, &context, js_now()?)
            .map_err(WasmSteemError::from)?;

        Ok(WasmTransaction::from_inner(tx))
    }
}
