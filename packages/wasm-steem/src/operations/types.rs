//! Operation payloads
//!
//! Field order in each `Encode` impl is the field order of the chain's
//! `FC_REFLECT` declaration and must match it exactly.

use crate::encoding::{Encode, Encoder};
use crate::error::EncodeError;
use crate::types::Asset;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Content
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteOperation {
    pub voter: String,
    pub author: String,
    pub permlink: String,
    /// Vote strength in basis points, -10000..=10000
    pub weight: i16,
}

impl Encode for VoteOperation {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.encode(&self.voter)?;
        enc.encode(&self.author)?;
        enc.encode(&self.permlink)?;
        enc.encode(&self.weight)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommentOperation {
    pub parent_author: String,
    pub parent_permlink: String,
    pub author: String,
    pub permlink: String,
    pub title: String,
    pub body: String,
    pub json_metadata: String,
}

impl Encode for CommentOperation {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.encode(&self.parent_author)?;
        enc.encode(&self.parent_permlink)?;
        enc.encode(&self.author)?;
        enc.encode(&self.permlink)?;
        enc.encode(&self.title)?;
        enc.encode(&self.body)?;
        enc.encode(&self.json_metadata)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteCommentOperation {
    pub author: String,
    pub permlink: String,
}

impl Encode for DeleteCommentOperation {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.encode(&self.author)?;
        enc.encode(&self.permlink)
    }
}

// =============================================================================
// Balances
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
    pub from: String,
    pub to: String,
    pub amount: Asset,
    #[serde(default)]
    pub memo: String,
}

impl Encode for TransferOperation {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.encode(&self.from)?;
        enc.encode(&self.to)?;
        enc.encode(&self.amount)?;
        enc.encode(&self.memo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferToVestingOperation {
    pub from: String,
    /// Empty means the vesting shares go to `from`
    #[serde(default)]
    pub to: String,
    pub amount: Asset,
}

impl Encode for TransferToVestingOperation {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.encode(&self.from)?;
        enc.encode(&self.to)?;
        enc.encode(&self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawVestingOperation {
    pub account: String,
    pub vesting_shares: Asset,
}

impl Encode for WithdrawVestingOperation {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.encode(&self.account)?;
        enc.encode(&self.vesting_shares)
    }
}

// =============================================================================
// Witnesses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountWitnessVoteOperation {
    pub account: String,
    pub witness: String,
    pub approve: bool,
}

impl Encode for AccountWitnessVoteOperation {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.encode(&self.account)?;
        enc.encode(&self.witness)?;
        enc.encode(&self.approve)
    }
}

// =============================================================================
// Plugins
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomJsonOperation {
    #[serde(default)]
    pub required_auths: Vec<String>,
    #[serde(default)]
    pub required_posting_auths: Vec<String>,
    pub id: String,
    /// JSON document serialized as a string
    pub json: String,
}

impl Encode for CustomJsonOperation {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.encode_seq(&self.required_auths)?;
        enc.encode_seq(&self.required_posting_auths)?;
        enc.encode(&self.id)?;
        enc.encode(&self.json)
    }
}

/// Follow-plugin payload covering both `follow` and `reblog`
///
/// With `author`/`permlink` set it is a reblog by `account`; otherwise a
/// follow of `following` by `follower` (`what` empty unfollows, `["ignore"]` mutes).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FollowOperation {
    #[serde(default)]
    pub follower: String,
    #[serde(default)]
    pub following: String,
    #[serde(default)]
    pub what: Vec<String>,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub permlink: String,
}

impl FollowOperation {
    fn is_reblog(&self) -> bool {
        !self.author.is_empty() || !self.permlink.is_empty()
    }

    /// The `custom_json` operation this payload is broadcast as
    pub fn to_custom_json(&self) -> CustomJsonOperation {
        let mut body = Map::new();
        let (plugin_op, signer) = if self.is_reblog() {
            body.insert("account".into(), Value::from(self.account.as_str()));
            body.insert("author".into(), Value::from(self.author.as_str()));
            body.insert("permlink".into(), Value::from(self.permlink.as_str()));
            ("reblog", &self.account)
        } else {
            body.insert("follower".into(), Value::from(self.follower.as_str()));
            body.insert("following".into(), Value::from(self.following.as_str()));
            body.insert("what".into(), Value::from(self.what.clone()));
            ("follow", &self.follower)
        };

        CustomJsonOperation {
            required_auths: Vec::new(),
            required_posting_auths: vec![signer.clone()],
            id: "follow".to_string(),
            json: Value::Array(vec![Value::from(plugin_op), Value::Object(body)]).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_to_vec;

    #[test]
    fn test_transfer_encoding() {
        let op = TransferOperation {
            from: "alice".to_string(),
            to: "bob".to_string(),
            amount: "1.000 STEEM".parse().unwrap(),
            memo: "hi".to_string(),
        };
        assert_eq!(
            hex::encode(encode_to_vec(&op).unwrap()),
            "05616c69636503626f62e80300000000000003535445454d00000268 69".replace(' ', "")
        );
    }

    #[test]
    fn test_comment_encoding() {
        let op = CommentOperation {
            parent_author: String::new(),
            parent_permlink: "steem".to_string(),
            author: "alice".to_string(),
            permlink: "hello".to_string(),
            title: "Hi".to_string(),
            body: "Body".to_string(),
            json_metadata: "{}".to_string(),
        };
        assert_eq!(
            hex::encode(encode_to_vec(&op).unwrap()),
            "0005737465656d05616c6963650568656c6c6f02486904426f6479027b7d"
        );
    }

    #[test]
    fn test_delete_comment_encoding() {
        let op = DeleteCommentOperation {
            author: "alice".to_string(),
            permlink: "hello".to_string(),
        };
        assert_eq!(
            hex::encode(encode_to_vec(&op).unwrap()),
            "05616c6963650568656c6c6f"
        );
    }

    #[test]
    fn test_transfer_to_vesting_encoding() {
        let op = TransferToVestingOperation {
            from: "alice".to_string(),
            to: String::new(),
            amount: "1.000 STEEM".parse().unwrap(),
        };
        assert_eq!(
            hex::encode(encode_to_vec(&op).unwrap()),
            "05616c69636500e80300000000000003535445454d0000"
        );
    }

    #[test]
    fn test_withdraw_vesting_encoding() {
        let op = WithdrawVestingOperation {
            account: "alice".to_string(),
            vesting_shares: "1.000000 VESTS".parse().unwrap(),
        };
        assert_eq!(
            hex::encode(encode_to_vec(&op).unwrap()),
            "05616c69636540420f00000000000656455354530000"
        );
    }

    #[test]
    fn test_witness_vote_encoding() {
        let op = AccountWitnessVoteOperation {
            account: "a".to_string(),
            witness: "w".to_string(),
            approve: true,
        };
        assert_eq!(hex::encode(encode_to_vec(&op).unwrap()), "0161017701");
    }

    #[test]
    fn test_custom_json_keeps_auth_order() {
        let op = CustomJsonOperation {
            required_auths: vec![],
            required_posting_auths: vec!["b".to_string(), "a".to_string()],
            id: "x".to_string(),
            json: "{}".to_string(),
        };
        assert_eq!(
            hex::encode(encode_to_vec(&op).unwrap()),
            "000201620161017802 7b7d".replace(' ', "")
        );
    }

    #[test]
    fn test_follow_json_document() {
        let follow = FollowOperation {
            follower: "alice".to_string(),
            following: "bob".to_string(),
            what: vec!["blog".to_string()],
            ..Default::default()
        };
        let custom = follow.to_custom_json();
        assert_eq!(custom.id, "follow");
        assert_eq!(custom.required_posting_auths, vec!["alice".to_string()]);
        assert!(custom.required_auths.is_empty());
        assert_eq!(
            custom.json,
            r#"["follow",{"follower":"alice","following":"bob","what":["blog"]}]"#
        );
    }

    #[test]
    fn test_reblog_json_document() {
        let reblog = FollowOperation {
            account: "carol".to_string(),
            author: "dave".to_string(),
            permlink: "post".to_string(),
            ..Default::default()
        };
        let custom = reblog.to_custom_json();
        assert_eq!(custom.required_posting_auths, vec!["carol".to_string()]);
        assert_eq!(
            custom.json,
            r#"["reblog",{"account":"carol","author":"dave","permlink":"post"}]"#
        );
    }

    #[test]
    fn test_transfer_memo_defaults_empty() {
        let op: TransferOperation = serde_json::from_str(
            r#"{"from":"alice","to":"bob","amount":"0.001 SBD"}"#,
        )
        .unwrap();
        assert!(op.memo.is_empty());
        assert_eq!(op.amount.symbol, "SBD");
    }
}
