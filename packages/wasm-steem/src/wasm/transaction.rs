//! WASM bindings for Transaction
//!
//! Thin wrapper around core Transaction with #[wasm_bindgen]

use crate::error::WasmSteemError;
use crate::operations::Operation;
use crate::transaction::Transaction;
use crate::wasm::{chain_or_default, to_js};
use wasm_bindgen::prelude::*;

/// WASM-exposed transaction wrapper
#[wasm_bindgen]
pub struct WasmTransaction {
    inner: Transaction,
}

#[wasm_bindgen]
impl WasmTransaction {
    /// Parse the node JSON form of a transaction
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WasmTransaction, JsValue> {
        let inner: Transaction = serde_json::from_str(json).map_err(WasmSteemError::from)?;
        Ok(WasmTransaction { inner })
    }

    /// Node JSON form, as accepted by `broadcast_transaction_synchronous`
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Same as `toJson` but as a JS object
    #[wasm_bindgen(js_name = toObject)]
    pub fn to_object(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner)
    }

    /// Append an operation given as `[name, body]`
    #[wasm_bindgen(js_name = pushOperation)]
    pub fn push_operation(&mut self, operation: JsValue) -> Result<(), JsValue> {
        let operation: Operation = serde_wasm_bindgen::from_value(operation)
            .map_err(|e| JsValue::from_str(&format!("Invalid operation: {}", e)))?;
        self.inner.push_operation(operation);
        Ok(())
    }

    /// Transaction id (hex, 20 bytes)
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> Result<String, JsValue> {
        Ok(self.inner.id().map_err(WasmSteemError::from)?)
    }

    #[wasm_bindgen(getter)]
    pub fn expiration(&self) -> Option<String> {
        self.inner.expiration.map(|time| time.to_string())
    }

    #[wasm_bindgen(getter, js_name = refBlockNum)]
    pub fn ref_block_num(&self) -> u16 {
        self.inner.ref_block_num
    }

    #[wasm_bindgen(getter, js_name = refBlockPrefix)]
    pub fn ref_block_prefix(&self) -> u32 {
        self.inner.ref_block_prefix
    }

    /// Check if transaction is signed
    #[wasm_bindgen(getter, js_name = isSigned)]
    pub fn is_signed(&self) -> bool {
        self.inner.is_signed()
    }

    /// Hex signatures, in signing order
    #[wasm_bindgen(getter)]
    pub fn signatures(&self) -> Vec<String> {
        self.inner.signatures.clone()
    }

    /// Serialize to canonical bytes
    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Result<Vec<u8>, JsValue> {
        Ok(self.inner.to_bytes().map_err(WasmSteemError::from)?)
    }

    /// Serialize to hex string
    #[wasm_bindgen(js_name = toHex)]
    pub fn to_hex(&self) -> Result<String, JsValue> {
        let bytes = self.inner.to_bytes().map_err(WasmSteemError::from)?;
        Ok(hex::encode(bytes))
    }

    /// Digest that signatures commit to
    ///
    /// # Arguments
    /// * `chain_id` - Hex chain id; Steem mainnet when omitted
    #[wasm_bindgen]
    pub fn digest(&self, chain_id: Option<String>) -> Result<Vec<u8>, JsValue> {
        let digest = self.inner.digest(&chain_or_default(chain_id))?;
        Ok(digest.to_vec())
    }

    /// Sign with each 32-byte private key, appending signatures in key order
    #[wasm_bindgen]
    pub fn sign(
        &mut self,
        keys: Vec<js_sys::Uint8Array>,
        chain_id: Option<String>,
    ) -> Result<(), JsValue> {
        let keys: Vec<Vec<u8>> = keys.iter().map(|key| key.to_vec()).collect();
        self.inner
            .sign(&keys, &chain_or_default(chain_id))
            .map_err(|e| e.into())
    }

    /// Append a signature produced elsewhere (hex, 65 bytes)
    #[wasm_bindgen(js_name = addSignature)]
    pub fn add_signature(&mut self, signature: &str) -> Result<(), JsValue> {
        let bytes = hex::decode(signature)
            .map_err(|e| JsValue::from_str(&format!("Invalid signature hex: {}", e)))?;
        if bytes.len() != 65 {
            return Err(JsValue::from_str("Signature must be 65 bytes"));
        }
        self.inner.append_signature(signature.to_lowercase());
        Ok(())
    }
}

// Non-WASM methods for internal use
impl WasmTransaction {
    /// Create from core Transaction (for builder)
    pub fn from_inner(inner: Transaction) -> Self {
        WasmTransaction { inner }
    }
}
