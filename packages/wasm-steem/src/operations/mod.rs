//! Steem operations and the chain's operation registry
//!
//! The registry below is the `steem::protocol::operation` static variant in
//! declaration order. Its position, not the operation name, is what goes on
//! the wire, so entries must never be reordered or removed.
//!
//! `Operation` is the closed set of operations this crate can encode. Each
//! variant is tied to its registry entry by the exhaustive match in
//! [`Operation::op_type`]; operations read from the chain that have no codec
//! here decode into [`Operation::Unknown`] and are rejected by the encoder.

pub mod types;

use crate::encoding::{Encode, Encoder};
use crate::error::EncodeError;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

pub use types::{
    AccountWitnessVoteOperation, CommentOperation, CustomJsonOperation, DeleteCommentOperation,
    FollowOperation, TransferOperation, TransferToVestingOperation, VoteOperation,
    WithdrawVestingOperation,
};

macro_rules! operation_registry {
    ( $( $variant:ident = $code:literal => $name:literal ),* $(,)? ) => {
        /// Operation discriminants as registered on chain
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum OperationType {
            $( $variant ),*
        }

        impl OperationType {
            /// Every registered operation, in registry order
            pub const ALL: &'static [OperationType] = &[ $( OperationType::$variant ),* ];

            /// Discriminant written before the operation payload
            pub fn code(self) -> u16 {
                match self {
                    $( OperationType::$variant => $code ),*
                }
            }

            /// Name used in the JSON wire format
            pub fn name(self) -> &'static str {
                match self {
                    $( OperationType::$variant => $name ),*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some(OperationType::$variant), )*
                    _ => None,
                }
            }

            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some(OperationType::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

operation_registry! {
    Vote = 0 => "vote",
    Comment = 1 => "comment",
    Transfer = 2 => "transfer",
    TransferToVesting = 3 => "transfer_to_vesting",
    WithdrawVesting = 4 => "withdraw_vesting",
    LimitOrderCreate = 5 => "limit_order_create",
    LimitOrderCancel = 6 => "limit_order_cancel",
    FeedPublish = 7 => "feed_publish",
    Convert = 8 => "convert",
    AccountCreate = 9 => "account_create",
    AccountUpdate = 10 => "account_update",
    WitnessUpdate = 11 => "witness_update",
    AccountWitnessVote = 12 => "account_witness_vote",
    AccountWitnessProxy = 13 => "account_witness_proxy",
    Pow = 14 => "pow",
    Custom = 15 => "custom",
    ReportOverProduction = 16 => "report_over_production",
    DeleteComment = 17 => "delete_comment",
    CustomJson = 18 => "custom_json",
    CommentOptions = 19 => "comment_options",
    SetWithdrawVestingRoute = 20 => "set_withdraw_vesting_route",
    LimitOrderCreate2 = 21 => "limit_order_create2",
    ChallengeAuthority = 22 => "challenge_authority",
    ProveAuthority = 23 => "prove_authority",
    RequestAccountRecovery = 24 => "request_account_recovery",
    RecoverAccount = 25 => "recover_account",
    ChangeRecoveryAccount = 26 => "change_recovery_account",
    EscrowTransfer = 27 => "escrow_transfer",
    EscrowDispute = 28 => "escrow_dispute",
    EscrowRelease = 29 => "escrow_release",
    Pow2 = 30 => "pow2",
    EscrowApprove = 31 => "escrow_approve",
    TransferToSavings = 32 => "transfer_to_savings",
    TransferFromSavings = 33 => "transfer_from_savings",
    CancelTransferFromSavings = 34 => "cancel_transfer_from_savings",
    CustomBinary = 35 => "custom_binary",
    DeclineVotingRights = 36 => "decline_voting_rights",
    ResetAccount = 37 => "reset_account",
    SetResetAccount = 38 => "set_reset_account",
    ClaimRewardBalance = 39 => "claim_reward_balance",
    DelegateVestingShares = 40 => "delegate_vesting_shares",
    AccountCreateWithDelegation = 41 => "account_create_with_delegation",
}

/// A single transaction operation
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Vote(VoteOperation),
    Comment(CommentOperation),
    Transfer(TransferOperation),
    TransferToVesting(TransferToVestingOperation),
    WithdrawVesting(WithdrawVestingOperation),
    AccountWitnessVote(AccountWitnessVoteOperation),
    DeleteComment(DeleteCommentOperation),
    CustomJson(CustomJsonOperation),
    /// Follow-plugin operation, broadcast as `custom_json` with id `follow`
    Follow(FollowOperation),
    /// Operation decoded from the chain without a local codec
    Unknown { name: String, value: Value },
}

impl Operation {
    /// Registry entry this operation is serialized under
    pub fn op_type(&self) -> Option<OperationType> {
        match self {
            Operation::Vote(_) => Some(OperationType::Vote),
            Operation::Comment(_) => Some(OperationType::Comment),
            Operation::Transfer(_) => Some(OperationType::Transfer),
            Operation::TransferToVesting(_) => Some(OperationType::TransferToVesting),
            Operation::WithdrawVesting(_) => Some(OperationType::WithdrawVesting),
            Operation::AccountWitnessVote(_) => Some(OperationType::AccountWitnessVote),
            Operation::DeleteComment(_) => Some(OperationType::DeleteComment),
            Operation::CustomJson(_) => Some(OperationType::CustomJson),
            Operation::Follow(_) => Some(OperationType::CustomJson),
            Operation::Unknown { name, .. } => OperationType::from_name(name),
        }
    }

    /// Wire name of the operation
    pub fn name(&self) -> &str {
        match self {
            Operation::Unknown { name, .. } => name.as_str(),
            _ => self.op_type().map(OperationType::name).unwrap_or_default(),
        }
    }

    fn body(&self) -> Result<Value, serde_json::Error> {
        match self {
            Operation::Vote(op) => serde_json::to_value(op),
            Operation::Comment(op) => serde_json::to_value(op),
            Operation::Transfer(op) => serde_json::to_value(op),
            Operation::TransferToVesting(op) => serde_json::to_value(op),
            Operation::WithdrawVesting(op) => serde_json::to_value(op),
            Operation::AccountWitnessVote(op) => serde_json::to_value(op),
            Operation::DeleteComment(op) => serde_json::to_value(op),
            Operation::CustomJson(op) => serde_json::to_value(op),
            Operation::Follow(op) => serde_json::to_value(op.to_custom_json()),
            Operation::Unknown { value, .. } => Ok(value.clone()),
        }
    }

    fn from_parts(name: String, body: Value) -> Result<Self, serde_json::Error> {
        let op = match OperationType::from_name(&name) {
            Some(OperationType::Vote) => Operation::Vote(serde_json::from_value(body)?),
            Some(OperationType::Comment) => Operation::Comment(serde_json::from_value(body)?),
            Some(OperationType::Transfer) => Operation::Transfer(serde_json::from_value(body)?),
            Some(OperationType::TransferToVesting) => {
                Operation::TransferToVesting(serde_json::from_value(body)?)
            }
            Some(OperationType::WithdrawVesting) => {
                Operation::WithdrawVesting(serde_json::from_value(body)?)
            }
            Some(OperationType::AccountWitnessVote) => {
                Operation::AccountWitnessVote(serde_json::from_value(body)?)
            }
            Some(OperationType::DeleteComment) => {
                Operation::DeleteComment(serde_json::from_value(body)?)
            }
            Some(OperationType::CustomJson) => {
                Operation::CustomJson(serde_json::from_value(body)?)
            }
            _ => Operation::Unknown { name, value: body },
        };
        Ok(op)
    }
}

macro_rules! impl_from_payload {
    ( $( $payload:ident => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$payload> for Operation {
                fn from(op: $payload) -> Self {
                    Operation::$variant(op)
                }
            }
        )*
    };
}

impl_from_payload! {
    VoteOperation => Vote,
    CommentOperation => Comment,
    TransferOperation => Transfer,
    TransferToVestingOperation => TransferToVesting,
    WithdrawVestingOperation => WithdrawVesting,
    AccountWitnessVoteOperation => AccountWitnessVote,
    DeleteCommentOperation => DeleteComment,
    CustomJsonOperation => CustomJson,
    FollowOperation => Follow,
}

impl Encode for Operation {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        let op_type = self
            .op_type()
            .ok_or_else(|| EncodeError::UnsupportedOperation(self.name().to_string()))?;
        enc.write_uvarint(op_type.code() as u64);
        match self {
            Operation::Vote(op) => op.encode(enc),
            Operation::Comment(op) => op.encode(enc),
            Operation::Transfer(op) => op.encode(enc),
            Operation::TransferToVesting(op) => op.encode(enc),
            Operation::WithdrawVesting(op) => op.encode(enc),
            Operation::AccountWitnessVote(op) => op.encode(enc),
            Operation::DeleteComment(op) => op.encode(enc),
            Operation::CustomJson(op) => op.encode(enc),
            Operation::Follow(op) => op.to_custom_json().encode(enc),
            Operation::Unknown { name, .. } => {
                Err(EncodeError::UnsupportedOperation(name.clone()))
            }
        }
    }
}

/// `["vote", {...}]`, the condenser API form
impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = self.body().map_err(serde::ser::Error::custom)?;
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(self.name())?;
        tuple.serialize_element(&body)?;
        tuple.end()
    }
}

/// Accepts `["vote", {...}]` and the appbase `{"type": "vote_operation", "value": {...}}`
impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OperationVisitor;

        impl<'de> Visitor<'de> for OperationVisitor {
            type Value = Operation;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an operation as [name, body] or {type, value}")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Operation, A::Error> {
                let name: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let body: Value = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                Operation::from_parts(name, body).map_err(de::Error::custom)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Operation, A::Error> {
                let mut name: Option<String> = None;
                let mut body: Option<Value> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "type" => name = Some(map.next_value()?),
                        "value" => body = Some(map.next_value()?),
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                let name = name.ok_or_else(|| de::Error::missing_field("type"))?;
                let body = body.ok_or_else(|| de::Error::missing_field("value"))?;
                let name = name
                    .strip_suffix("_operation")
                    .map(str::to_string)
                    .unwrap_or(name);
                Operation::from_parts(name, body).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(OperationVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_to_vec;
    use serde_json::json;

    fn vote() -> Operation {
        Operation::Vote(VoteOperation {
            voter: "foobara".to_string(),
            author: "foobarc".to_string(),
            permlink: "foobard".to_string(),
            weight: 1000,
        })
    }

    #[test]
    fn test_registry_codes_follow_declaration_order() {
        for (index, op_type) in OperationType::ALL.iter().enumerate() {
            assert_eq!(op_type.code() as usize, index, "{}", op_type.name());
            assert_eq!(OperationType::from_code(op_type.code()), Some(*op_type));
            assert_eq!(OperationType::from_name(op_type.name()), Some(*op_type));
        }
        assert_eq!(OperationType::ALL.len(), 42);
        assert_eq!(OperationType::CustomJson.code(), 18);
        assert_eq!(OperationType::from_name("fill_order"), None);
    }

    #[test]
    fn test_vote_encoding() {
        assert_eq!(
            hex::encode(encode_to_vec(&vote()).unwrap()),
            "0007666f6f6261726107666f6f6261726307666f6f62617264e803"
        );
    }

    #[test]
    fn test_unknown_operation_is_unsupported() {
        let op = Operation::Unknown {
            name: "pow2".to_string(),
            value: json!({}),
        };
        assert_eq!(
            encode_to_vec(&op),
            Err(EncodeError::UnsupportedOperation("pow2".to_string()))
        );

        let op = Operation::Unknown {
            name: "not_an_operation".to_string(),
            value: json!({}),
        };
        assert!(matches!(
            encode_to_vec(&op),
            Err(EncodeError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_json_pair_roundtrip() {
        let json = serde_json::to_value(vote()).unwrap();
        assert_eq!(
            json,
            json!(["vote", {"voter": "foobara", "author": "foobarc", "permlink": "foobard", "weight": 1000}])
        );
        let back: Operation = serde_json::from_value(json).unwrap();
        assert_eq!(back, vote());
    }

    #[test]
    fn test_appbase_object_form() {
        let op: Operation = serde_json::from_value(json!({
            "type": "vote_operation",
            "value": {"voter": "foobara", "author": "foobarc", "permlink": "foobard", "weight": 1000}
        }))
        .unwrap();
        assert_eq!(op, vote());
    }

    #[test]
    fn test_unregistered_codec_decodes_as_unknown() {
        let op: Operation = serde_json::from_value(json!([
            "claim_reward_balance",
            {"account": "alice", "reward_steem": "0.000 STEEM"}
        ]))
        .unwrap();
        assert_eq!(op.name(), "claim_reward_balance");
        assert_eq!(op.op_type(), Some(OperationType::ClaimRewardBalance));
        assert!(matches!(op, Operation::Unknown { .. }));

        // serializes back unchanged
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!(["claim_reward_balance", {"account": "alice", "reward_steem": "0.000 STEEM"}])
        );
    }

    #[test]
    fn test_malformed_known_body_is_error() {
        let result: Result<Operation, _> =
            serde_json::from_value(json!(["vote", {"voter": "alice"}]));
        assert!(result.is_err());

        let result: Result<Operation, _> = serde_json::from_value(json!(["vote"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_follow_travels_as_custom_json() {
        let follow = Operation::Follow(FollowOperation {
            follower: "alice".to_string(),
            following: "bob".to_string(),
            what: vec!["blog".to_string()],
            ..Default::default()
        });
        assert_eq!(follow.op_type(), Some(OperationType::CustomJson));
        assert_eq!(follow.name(), "custom_json");

        let json = serde_json::to_value(&follow).unwrap();
        assert_eq!(json[0], "custom_json");
        assert_eq!(json[1]["id"], "follow");

        // 18, no active auths, posting auth "alice", id "follow", then the json document
        assert_eq!(
            hex::encode(encode_to_vec(&follow).unwrap()),
            concat!(
                "12000105616c69636506666f6c6c6f7741",
                "5b22666f6c6c6f77222c7b22666f6c6c6f776572223a22616c696365222c22666f6c6c6f77",
                "696e67223a22626f62222c2277686174223a5b22626c6f67225d7d5d"
            )
        );
    }
}
