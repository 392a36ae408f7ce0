//! Shared fixtures for unit tests

use crate::operations::{Operation, VoteOperation};
use crate::transaction::Transaction;
use crate::types::Time;

/// Vote transaction with a known canonical encoding
///
/// Bytes: `f68585abf4dce7c80457010007666f6f6261726107666f6f6261726307666f6f62617264e80300`
pub fn vote_transaction() -> Transaction {
    let mut tx = Transaction::new(34294, 3707022213);
    tx.expiration = Some(Time::parse("2016-04-06T08:29:27").unwrap());
    tx.push_operation(Operation::Vote(VoteOperation {
        voter: "foobara".to_string(),
        author: "foobarc".to_string(),
        permlink: "foobard".to_string(),
        weight: 1000,
    }));
    tx
}

/// Private key with scalar value `n`
pub fn scalar_key(n: u8) -> [u8; 32] {
    let mut key = [0u8; 32];
    key[31] = n;
    key
}
