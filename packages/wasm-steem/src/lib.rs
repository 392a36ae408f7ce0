//! wasm-steem: WASM module for Steem transaction operations
//!
//! This crate provides:
//! - Canonical binary encoding of transactions and operations
//! - Transaction assembly from a head block (TAPOS) and operations
//! - Chain-scoped digests and canonical compact secp256k1 signatures
//! - Decoding of node responses, including embedded `json_metadata` documents
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//! - **Core layer** (`src/*.rs`): Pure Rust logic, no WASM dependencies
//! - **WASM layer** (`src/wasm/*.rs`): Thin wrappers with `#[wasm_bindgen]`

pub mod api;
pub mod builder;
pub mod chain;
pub mod encoding;
pub mod error;
pub mod keys;
pub mod metadata;
pub mod operations;
pub mod signer;
pub mod transaction;
pub mod types;
pub mod wasm;

#[cfg(test)]
mod test_utils;

// Re-export main types for convenience
pub use builder::{build_transaction, types::HeadBlock};
pub use chain::Chain;
pub use error::{AssemblyError, DecodeError, EncodeError, SigningError, WasmSteemError};
pub use keys::{PrivateKey, PublicKey};
pub use metadata::{best_effort, AccountMetadata, ContentMetadata, Profile};
pub use operations::{Operation, OperationType};
pub use signer::{digest, recover_public_key, sign};
pub use transaction::{Extension, Transaction};
pub use types::{Asset, Id, Int, StringSlice, Time, UInt32};
