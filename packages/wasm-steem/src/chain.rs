//! Chain identity used to scope transaction digests

use crate::error::SigningError;
use serde::{Deserialize, Serialize};

const STEEM_CHAIN_ID: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// A chain identified by its hex chain id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub id: String,
}

impl Chain {
    /// Any other chain (testnets, forks); the id is only validated when digesting
    pub fn new(id: impl Into<String>) -> Self {
        Chain { id: id.into() }
    }

    /// Steem mainnet
    pub fn steem() -> Self {
        Chain::new(STEEM_CHAIN_ID)
    }

    /// Decoded chain id bytes that prefix every digest
    pub fn id_bytes(&self) -> Result<Vec<u8>, SigningError> {
        hex::decode(&self.id)
            .map_err(|e| SigningError::InvalidChainId(format!("{}: {}", self.id, e)))
    }
}

impl Default for Chain {
    fn default() -> Self {
        Chain::steem()
    }
}
