//! WASM bindings for wallet keys

use crate::error::WasmSteemError;
use crate::keys::PrivateKey;
use wasm_bindgen::prelude::*;

/// WASM wrapper for a secp256k1 private key
#[wasm_bindgen]
pub struct WasmPrivateKey {
    inner: PrivateKey,
}

#[wasm_bindgen]
impl WasmPrivateKey {
    /// Import a wallet import format string
    #[wasm_bindgen(js_name = fromWif)]
    pub fn from_wif(wif: &str) -> Result<WasmPrivateKey, JsValue> {
        let inner = PrivateKey::from_wif(wif).map_err(WasmSteemError::from)?;
        Ok(WasmPrivateKey { inner })
    }

    /// Create from a raw 32-byte secret
    #[wasm_bindgen(js_name = fromBytes)]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmPrivateKey, JsValue> {
        let inner = PrivateKey::from_bytes(bytes).map_err(WasmSteemError::from)?;
        Ok(WasmPrivateKey { inner })
    }

    #[wasm_bindgen(js_name = toWif)]
    pub fn to_wif(&self) -> String {
        self.inner.to_wif()
    }

    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.to_bytes().to_vec()
    }

    /// `STM`-prefixed public key
    #[wasm_bindgen(getter, js_name = publicKey)]
    pub fn public_key(&self) -> String {
        self.inner.public_key().to_string()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_wif_roundtrip() {
        let key =
            WasmPrivateKey::from_wif("5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf")
                .unwrap();
        assert_eq!(
            key.public_key(),
            "STM5p78kHbL33Rn3JWkTWRE2B9uz6gy4r1KbfAKLNQGE3ovMBS5bu"
        );
        assert!(WasmPrivateKey::from_bytes(&[0u8; 32]).is_err());
    }
}
