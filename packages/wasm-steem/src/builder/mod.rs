//! Transaction assembly
//!
//! Binds operations to a recent head block (TAPOS) and fills in the
//! expiration, producing a transaction that is ready to sign.

pub mod types;

use crate::error::AssemblyError;
use crate::operations::Operation;
use crate::transaction::Transaction;
use crate::types::Time;
use types::{BuildContext, HeadBlock};

/// Expiration applied when the caller does not supply one
pub const DEFAULT_EXPIRATION_SECS: i64 = 30;

/// Assemble a transaction referencing `head`
///
/// # Arguments
/// * `head` - Head block the transaction is bound to
/// * `operations` - Operations, kept in the given order
/// * `expiration` - Explicit expiration; `now + 30s` when `None`
/// * `now` - Current time, supplied by the caller
pub fn build_transaction(
    head: &HeadBlock,
    operations: Vec<Operation>,
    expiration: Option<Time>,
    now: Time,
) -> Result<Transaction, AssemblyError> {
    let mut tx = Transaction::new(
        ref_block_num(head.number.value()),
        ref_block_prefix(&head.id)?,
    );
    tx.expiration = expiration;
    tx.operations = operations;

    let default = now
        .checked_add_seconds(DEFAULT_EXPIRATION_SECS)
        .ok_or_else(|| AssemblyError::InvalidExpiration(now.to_string()))?;
    tx.set_default_expiration(default);

    Ok(tx)
}

/// Assemble from a [`BuildContext`], as handed in by JS callers
pub fn build_from_context(
    operations: Vec<Operation>,
    context: &BuildContext,
    now: Time,
) -> Result<Transaction, AssemblyError> {
    build_transaction(&context.head_block, operations, context.expiration, now)
}

/// Low 16 bits of the head block number
pub fn ref_block_num(head_block_number: u32) -> u16 {
    (head_block_number & 0xFFFF) as u16
}

/// Bytes 4..8 of the head block id as a little-endian u32
pub fn ref_block_prefix(head_block_id: &str) -> Result<u32, AssemblyError> {
    let bytes = hex::decode(head_block_id)
        .map_err(|e| AssemblyError::InvalidBlockId(format!("{}: {}", head_block_id, e)))?;
    let prefix: [u8; 4] = bytes
        .get(4..8)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| {
            AssemblyError::InvalidBlockId(format!("{}: shorter than 8 bytes", head_block_id))
        })?;
    Ok(u32::from_le_bytes(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::VoteOperation;
    use rstest::rstest;

    const HEAD_BLOCK_ID: &str =
        "0000000af6e3ab1b8b3fd6de8f6e76d4ca3d7b4b1d0c1a72d0b2bd9c1f9dcd14";

    fn vote() -> Operation {
        Operation::Vote(VoteOperation {
            voter: "foobara".to_string(),
            author: "foobarc".to_string(),
            permlink: "foobard".to_string(),
            weight: 1000,
        })
    }

    fn now() -> Time {
        Time::parse("2016-04-06T08:29:27").unwrap()
    }

    #[test]
    fn test_tapos_from_head_block() {
        let head = HeadBlock::new(10, HEAD_BLOCK_ID);
        let tx = build_transaction(&head, vec![vote()], None, now()).unwrap();
        assert_eq!(tx.ref_block_num, 10);
        assert_eq!(tx.ref_block_prefix, 464249846);
    }

    #[rstest]
    #[case(10, 10)]
    #[case(65535, 65535)]
    #[case(65536, 0)]
    #[case(3_367_158, 24_822)]
    fn test_ref_block_num_wraps(#[case] number: u32, #[case] expected: u16) {
        assert_eq!(ref_block_num(number), expected);
    }

    #[rstest]
    #[case("zz")]
    #[case("0000000af6e3ab")]
    #[case("")]
    fn test_invalid_block_id(#[case] id: &str) {
        let head = HeadBlock::new(10, id);
        assert!(matches!(
            build_transaction(&head, vec![vote()], None, now()),
            Err(AssemblyError::InvalidBlockId(_))
        ));
    }

    #[test]
    fn test_default_expiration() {
        let head = HeadBlock::new(10, HEAD_BLOCK_ID);
        let tx = build_transaction(&head, vec![vote()], None, now()).unwrap();
        assert_eq!(tx.expiration.unwrap().to_string(), "2016-04-06T08:29:57");
    }

    #[test]
    fn test_explicit_expiration_wins() {
        let head = HeadBlock::new(10, HEAD_BLOCK_ID);
        let explicit = Time::parse("2020-01-01T00:00:00").unwrap();
        let tx = build_transaction(&head, vec![vote()], Some(explicit), now()).unwrap();
        assert_eq!(tx.expiration, Some(explicit));
    }

    #[test]
    fn test_operations_keep_caller_order() {
        let head = HeadBlock::new(10, HEAD_BLOCK_ID);
        let mut second = vote();
        if let Operation::Vote(v) = &mut second {
            v.weight = -10000;
        }
        let tx = build_transaction(&head, vec![vote(), second.clone()], None, now()).unwrap();
        assert_eq!(tx.operations, vec![vote(), second]);
        assert!(tx.signatures.is_empty());
    }

    #[test]
    fn test_assembled_vote_encodes() {
        let head = HeadBlock::new(34294, "00000000f68585ab");
        // bytes 4..8 = f6 85 85 ab
        let expiration = Time::parse("2016-04-06T08:29:27").unwrap();
        let tx = build_transaction(&head, vec![vote()], Some(expiration), now()).unwrap();
        assert_eq!(tx.ref_block_prefix, 0xab8585f6);
        assert_eq!(
            hex::encode(&tx.to_bytes().unwrap()[..6]),
            "f685f68585ab"
        );
    }

    #[test]
    fn test_build_from_context() {
        let context: BuildContext = serde_json::from_value(serde_json::json!({
            "headBlock": {"head_block_number": 10, "head_block_id": HEAD_BLOCK_ID}
        }))
        .unwrap();
        let tx = build_from_context(vec![vote()], &context, now()).unwrap();
        assert_eq!(tx.ref_block_num, 10);
        assert_eq!(tx.ref_block_prefix, 464249846);
        assert_eq!(tx.expiration.unwrap().to_string(), "2016-04-06T08:29:57");

        let context: BuildContext = serde_json::from_value(serde_json::json!({
            "headBlock": {"number": "10", "id": HEAD_BLOCK_ID},
            "expiration": "2020-01-01T00:00:00"
        }))
        .unwrap();
        let tx = build_from_context(vec![vote()], &context, now()).unwrap();
        assert_eq!(tx.expiration.unwrap().to_string(), "2020-01-01T00:00:00");
    }
}
