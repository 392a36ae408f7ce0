//! `database_api` records and calls

use super::{call_decode, ApiError, Transport};
use crate::builder::types::HeadBlock;
use crate::metadata::{AccountMetadata, ContentMetadata};
use crate::transaction::Transaction;
use crate::types::{Asset, Id, Int, Time, UInt32};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// =============================================================================
// Records
// =============================================================================

/// `get_dynamic_global_properties` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicGlobalProperties {
    #[serde(default)]
    pub id: Id,
    pub head_block_number: UInt32,
    pub head_block_id: String,
    pub time: Time,
    #[serde(default)]
    pub current_witness: String,
    #[serde(default)]
    pub last_irreversible_block_num: UInt32,
    #[serde(default)]
    pub total_pow: Int,
    #[serde(default)]
    pub num_pow_witnesses: Int,
    #[serde(default)]
    pub current_reserve_ratio: Int,
    #[serde(default)]
    pub maximum_block_size: Int,
    #[serde(default)]
    pub average_block_size: Int,
    #[serde(default)]
    pub current_aslot: Int,
    #[serde(default)]
    pub sbd_interest_rate: Int,
    #[serde(default)]
    pub max_virtual_bandwidth: Option<String>,
    pub current_supply: Option<Asset>,
    pub current_sbd_supply: Option<Asset>,
    pub virtual_supply: Option<Asset>,
    pub total_vesting_fund_steem: Option<Asset>,
    pub total_vesting_shares: Option<Asset>,
    pub total_reward_fund_steem: Option<Asset>,
    pub confidential_supply: Option<Asset>,
    pub confidential_sbd_supply: Option<Asset>,
}

impl DynamicGlobalProperties {
    /// TAPOS reference for assembling a transaction on top of this head
    pub fn head_block(&self) -> HeadBlock {
        HeadBlock {
            number: self.head_block_number,
            id: self.head_block_id.clone(),
        }
    }
}

/// A signed block; `number` is not on the wire and comes from the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(skip)]
    pub number: u32,
    pub timestamp: Time,
    pub witness: String,
    #[serde(default)]
    pub witness_signature: String,
    #[serde(default)]
    pub transaction_merkle_root: String,
    pub previous: String,
    #[serde(default)]
    pub extensions: Vec<Value>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// A vote as listed in `Content::active_votes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteState {
    pub voter: String,
    #[serde(default)]
    pub weight: Int,
    #[serde(default)]
    pub rshares: Int,
    #[serde(default)]
    pub percent: Int,
    pub time: Option<Time>,
}

/// A post or comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub id: Id,
    pub author: String,
    pub permlink: String,
    #[serde(default)]
    pub parent_author: String,
    #[serde(default)]
    pub parent_permlink: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub root_title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub json_metadata: ContentMetadata,
    #[serde(default)]
    pub url: String,
    pub created: Option<Time>,
    pub active: Option<Time>,
    pub last_update: Option<Time>,
    pub cashout_time: Option<Time>,
    #[serde(default)]
    pub depth: Int,
    #[serde(default)]
    pub children: Int,
    #[serde(default)]
    pub net_rshares: Int,
    #[serde(default)]
    pub abs_rshares: Int,
    #[serde(default)]
    pub total_vote_weight: Int,
    pub pending_payout_value: Option<Asset>,
    pub total_pending_payout_value: Option<Asset>,
    pub total_payout_value: Option<Asset>,
    #[serde(default)]
    pub active_votes: Vec<VoteState>,
}

impl Content {
    /// Top-level post rather than a reply
    pub fn is_story(&self) -> bool {
        self.parent_author.is_empty()
    }
}

/// An account; `json_metadata` is decoded best effort into a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub memo_key: String,
    #[serde(default)]
    pub json_metadata: AccountMetadata,
    #[serde(default)]
    pub proxy: String,
    #[serde(default)]
    pub recovery_account: String,
    pub created: Option<Time>,
    pub last_owner_update: Option<Time>,
    pub last_account_update: Option<Time>,
    pub last_vote_time: Option<Time>,
    pub last_post: Option<Time>,
    pub last_root_post: Option<Time>,
    #[serde(default)]
    pub mined: bool,
    #[serde(default)]
    pub can_vote: bool,
    #[serde(default)]
    pub voting_power: UInt32,
    #[serde(default)]
    pub comment_count: UInt32,
    #[serde(default)]
    pub lifetime_vote_count: UInt32,
    #[serde(default)]
    pub post_count: UInt32,
    pub balance: Option<Asset>,
    pub savings_balance: Option<Asset>,
    pub sbd_balance: Option<Asset>,
    pub savings_sbd_balance: Option<Asset>,
    pub reward_sbd_balance: Option<Asset>,
    pub reward_steem_balance: Option<Asset>,
    pub reward_vesting_balance: Option<Asset>,
    pub vesting_shares: Option<Asset>,
    pub delegated_vesting_shares: Option<Asset>,
    pub received_vesting_shares: Option<Asset>,
    #[serde(default)]
    pub witnesses_voted_for: UInt32,
    #[serde(default)]
    pub reputation: Int,
}

// =============================================================================
// Calls
// =============================================================================

/// Read-side calls against the node's database API
pub struct DatabaseApi<T> {
    transport: T,
}

impl<T: Transport> DatabaseApi<T> {
    pub fn new(transport: T) -> Self {
        DatabaseApi { transport }
    }

    pub fn get_dynamic_global_properties(
        &self,
    ) -> Result<DynamicGlobalProperties, ApiError<T::Error>> {
        call_decode(&self.transport, "get_dynamic_global_properties", json!([]))
    }

    /// `None` when the node does not have the block yet
    pub fn get_block(&self, number: u32) -> Result<Option<Block>, ApiError<T::Error>> {
        let block: Option<Block> = call_decode(&self.transport, "get_block", json!([number]))?;
        Ok(block.map(|mut block| {
            block.number = number;
            block
        }))
    }

    pub fn get_content(
        &self,
        author: &str,
        permlink: &str,
    ) -> Result<Content, ApiError<T::Error>> {
        call_decode(
            &self.transport,
            "get_content",
            json!([author, permlink]),
        )
    }

    pub fn get_accounts(&self, names: &[&str]) -> Result<Vec<Account>, ApiError<T::Error>> {
        call_decode(&self.transport, "get_accounts", json!([names]))
    }
}
