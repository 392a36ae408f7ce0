//! `network_broadcast_api` calls

use super::{call_decode, ApiError, Transport};
use crate::transaction::Transaction;
use crate::types::UInt32;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Result of a synchronous broadcast: where the transaction landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub id: String,
    pub block_num: UInt32,
    pub trx_num: UInt32,
    pub expired: bool,
}

pub struct NetworkBroadcastApi<T> {
    transport: T,
}

impl<T: Transport> NetworkBroadcastApi<T> {
    pub fn new(transport: T) -> Self {
        NetworkBroadcastApi { transport }
    }

    /// Submit a signed transaction and wait until it is included in a block
    ///
    /// The transaction must encode locally; otherwise the node is never called.
    pub fn broadcast_transaction_synchronous(
        &self,
        tx: &Transaction,
    ) -> Result<BroadcastResponse, ApiError<T::Error>> {
        tx.to_bytes().map_err(|e| ApiError::Request(e.to_string()))?;
        let tx = serde_json::to_value(tx).map_err(|e| ApiError::Request(e.to_string()))?;
        call_decode(
            &self.transport,
            "broadcast_transaction_synchronous",
            json!([tx]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::chain::Chain;
    use crate::test_utils::{scalar_key, vote_transaction};

    #[test]
    fn test_broadcast_sends_signed_json() {
        let transport = MockTransport::default().with(
            "broadcast_transaction_synchronous",
            json!({
                "id": "8a5fc9f37e4ac4e5a8de24ec3c0a3d1d35a0f9ab",
                "block_num": 12345,
                "trx_num": 3,
                "expired": false
            }),
        );
        let api = NetworkBroadcastApi::new(&transport);

        let mut tx = vote_transaction();
        tx.sign(&[scalar_key(1)], &Chain::steem()).unwrap();
        let response = api.broadcast_transaction_synchronous(&tx).unwrap();

        assert_eq!(response.block_num.value(), 12345);
        assert_eq!(response.trx_num.value(), 3);
        assert!(!response.expired);

        let calls = transport.calls.borrow();
        let (method, params) = &calls[0];
        assert_eq!(method, "broadcast_transaction_synchronous");
        assert_eq!(params[0]["signatures"][0], json!(tx.signatures[0]));
        assert_eq!(params[0]["operations"][0][0], json!("vote"));
    }

    #[test]
    fn test_broadcast_rejects_unencodable_transaction() {
        let transport = MockTransport::default();
        let api = NetworkBroadcastApi::new(&transport);

        let mut tx = vote_transaction();
        tx.expiration = None;
        let err = api.broadcast_transaction_synchronous(&tx).unwrap_err();

        assert!(matches!(err, ApiError::Request(_)));
        assert_eq!(
            err.to_string(),
            "Invalid request: Transaction expiration is not set"
        );
        assert!(transport.calls.borrow().is_empty());
    }
}
