//! Error types for wasm-steem

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Failures while producing the canonical binary form of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Operation has no binary codec (only possible for `Operation::Unknown`)
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    /// Transaction has no expiration yet
    #[error("Transaction expiration is not set")]
    MissingExpiration,
    /// Timestamp does not fit into 32-bit unsigned epoch seconds
    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(String),
    /// Asset cannot be represented on the wire
    #[error("Invalid asset: {0}")]
    InvalidAsset(String),
}

/// Failures while deriving the TAPOS reference of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("Invalid block id: {0}")]
    InvalidBlockId(String),
    /// Default expiration falls outside the representable time range
    #[error("Invalid expiration: {0}")]
    InvalidExpiration(String),
}

/// Failures while digesting or signing a transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error("Invalid chain id: {0}")]
    InvalidChainId(String),
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

/// Failures while decoding the node's JSON wire format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Scalar field had an unexpected JSON shape or content
    #[error("Malformed scalar: {0}")]
    MalformedScalar(String),
    /// Embedded metadata document could not be parsed
    #[error("Metadata decode error: {0}")]
    MetadataDecodeError(String),
    /// Enclosing document is not valid JSON for the target type
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::InvalidJson(err.to_string())
    }
}

/// Main error type for wasm-steem operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WasmSteemError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Signing(#[from] SigningError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl From<serde_json::Error> for WasmSteemError {
    fn from(err: serde_json::Error) -> Self {
        WasmSteemError::Decode(err.into())
    }
}

// REQUIRED: Converts to JS Error with stack trace
impl From<WasmSteemError> for JsValue {
    fn from(err: WasmSteemError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
