//! WASM bindings for decoding node responses
//!
//! DecoderNamespace takes raw JSON text as returned by a node and hands back
//! normalized plain JS objects.

use crate::api::{Account, Content, DynamicGlobalProperties};
use crate::error::{DecodeError, WasmSteemError};
use crate::metadata::{ContentMetadata, Profile};
use crate::wasm::to_js;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Namespace for decoding operations
#[wasm_bindgen]
pub struct DecoderNamespace;

/// Shape-tagged view of content metadata for JS callers
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum ContentMetadataView<'a> {
    Flag {
        value: bool,
    },
    Structured {
        tags: &'a [String],
        users: &'a [String],
        image: &'a [String],
    },
    Empty,
}

impl<'a> From<&'a ContentMetadata> for ContentMetadataView<'a> {
    fn from(meta: &'a ContentMetadata) -> Self {
        match meta {
            ContentMetadata::Flag(value) => ContentMetadataView::Flag { value: *value },
            ContentMetadata::Structured(meta) => ContentMetadataView::Structured {
                tags: meta.tags.as_slice(),
                users: meta.users.as_slice(),
                image: meta.image.as_slice(),
            },
            ContentMetadata::Empty => ContentMetadataView::Empty,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountView<'a> {
    #[serde(flatten)]
    account: &'a Account,
    profile: &'a Profile,
    metadata_warning: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentView<'a> {
    #[serde(flatten)]
    content: &'a Content,
    metadata: ContentMetadataView<'a>,
    is_story: bool,
}

fn decode<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, WasmSteemError> {
    serde_json::from_str(json).map_err(|e| DecodeError::from(e).into())
}

#[wasm_bindgen]
impl DecoderNamespace {
    /// Decode a `json_metadata` field value given as JSON text (a string literal)
    #[wasm_bindgen(js_name = decodeContentMetadata)]
    pub fn decode_content_metadata(raw: &str) -> Result<JsValue, JsValue> {
        let meta = ContentMetadata::from_wire(raw).map_err(WasmSteemError::from)?;
        to_js(&ContentMetadataView::from(&meta))
    }

    /// Decode a `get_content` result
    #[wasm_bindgen(js_name = decodeContent)]
    pub fn decode_content(json: &str) -> Result<JsValue, JsValue> {
        let content: Content = decode(json)?;
        to_js(&ContentView {
            content: &content,
            metadata: ContentMetadataView::from(&content.json_metadata),
            is_story: content.is_story(),
        })
    }

    /// Decode one account from a `get_accounts` result
    ///
    /// A malformed profile never fails the decode; it is reported in
    /// `metadataWarning` instead.
    #[wasm_bindgen(js_name = decodeAccount)]
    pub fn decode_account(json: &str) -> Result<JsValue, JsValue> {
        let account: Account = decode(json)?;
        to_js(&AccountView {
            account: &account,
            profile: &account.json_metadata.profile,
            metadata_warning: account
                .json_metadata
                .warning
                .as_ref()
                .map(|warning| warning.to_string()),
        })
    }

    /// Decode a `get_dynamic_global_properties` result
    #[wasm_bindgen(js_name = decodeDynamicGlobalProperties)]
    pub fn decode_dynamic_global_properties(json: &str) -> Result<JsValue, JsValue> {
        let props: DynamicGlobalProperties = decode(json)?;
        to_js(&props)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_account_with_broken_profile_decodes() {
        let result =
            DecoderNamespace::decode_account(r#"{"name": "bob", "json_metadata": "{oops"}"#);
        assert!(result.is_ok());
    }

    #[wasm_bindgen_test]
    fn test_content_metadata_error() {
        assert!(DecoderNamespace::decode_content_metadata("\"{oops\"").is_err());
        assert!(DecoderNamespace::decode_content_metadata("\"true\"").is_ok());
    }
}
