//! Inputs for transaction assembly
//!
//! Mirrors the node's `get_dynamic_global_properties` naming so a response can
//! be fed in directly as a `BuildContext` head block

use crate::types::{Time, UInt32};
use serde::{Deserialize, Serialize};

/// Snapshot of the chain head a transaction is bound to (TAPOS reference)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadBlock {
    /// `head_block_number`
    #[serde(alias = "head_block_number", alias = "headBlockNumber")]
    pub number: UInt32,
    /// `head_block_id`, hex
    #[serde(alias = "head_block_id", alias = "headBlockId")]
    pub id: String,
}

impl HeadBlock {
    pub fn new(number: u32, id: impl Into<String>) -> Self {
        HeadBlock {
            number: UInt32::from(number),
            id: id.into(),
        }
    }
}

/// Everything assembly needs besides the operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildContext {
    pub head_block: HeadBlock,
    /// Explicit expiration; `now + 30s` when absent
    #[serde(default)]
    pub expiration: Option<Time>,
}
