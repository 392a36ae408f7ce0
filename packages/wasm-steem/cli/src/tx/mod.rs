use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;
use serde_json::Value;
use std::path::{Path, PathBuf};
use wasm_steem::api::DynamicGlobalProperties;
use wasm_steem::operations::VoteOperation;
use wasm_steem::{build_transaction, Chain, Time, Transaction};

use crate::chain::ChainArg;
use crate::input::read_input;
use crate::key::key_from_env;

#[derive(Subcommand)]
pub enum TxCommand {
    /// Build and sign a vote with the key in STEEM_WIF, printing the transaction JSON
    Vote {
        /// Author of the post being voted on
        author: String,
        /// Permlink of the post being voted on
        permlink: String,
        /// Voting account
        voter: String,
        /// get_dynamic_global_properties response (use '-' to read from stdin)
        #[arg(long)]
        props: PathBuf,
        /// Vote weight in basis points (-10000..=10000)
        #[arg(long, default_value_t = 10000, allow_negative_numbers = true)]
        weight: i16,
        /// Chain: `steem` or a hex chain id
        #[arg(long, default_value = "steem")]
        chain: ChainArg,
    },
    /// Print the signing digest of a transaction JSON file
    Digest {
        /// Path to the transaction JSON (use '-' to read from stdin)
        path: PathBuf,
        /// Chain: `steem` or a hex chain id
        #[arg(long, default_value = "steem")]
        chain: ChainArg,
    },
    /// Print the canonical bytes of a transaction JSON file as hex
    Encode {
        /// Path to the transaction JSON (use '-' to read from stdin)
        path: PathBuf,
    },
}

pub fn handle_command(command: TxCommand) -> Result<()> {
    match command {
        TxCommand::Vote {
            author,
            permlink,
            voter,
            props,
            weight,
            chain,
        } => {
            let props = read_input(&props, "dynamic global properties")?;
            let vote = VoteOperation {
                voter,
                author,
                permlink,
                weight,
            };
            let mut tx = assemble(&props, vote, Time::from(Utc::now()))?;
            let key = key_from_env()?;
            tx.sign(&[key.to_bytes()], &chain.into())
                .context("Failed to sign transaction")?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
            Ok(())
        }
        TxCommand::Digest { path, chain } => {
            let tx = load_transaction(&path)?;
            let chain: Chain = chain.into();
            let digest = tx.digest(&chain).context("Failed to digest transaction")?;
            println!("{}", hex::encode(digest));
            Ok(())
        }
        TxCommand::Encode { path } => {
            let tx = load_transaction(&path)?;
            let bytes = tx.to_bytes().context("Failed to encode transaction")?;
            println!("{}", hex::encode(bytes));
            Ok(())
        }
    }
}

/// Accepts a bare result object or a full JSON-RPC response
fn parse_properties(text: &str) -> Result<DynamicGlobalProperties> {
    let mut value: Value =
        serde_json::from_str(text).context("Dynamic global properties are not valid JSON")?;
    if let Some(result) = value.get_mut("result") {
        value = result.take();
    }
    serde_json::from_value(value).context("Failed to decode dynamic global properties")
}

fn assemble(props: &str, vote: VoteOperation, now: Time) -> Result<Transaction> {
    let props = parse_properties(props)?;
    build_transaction(&props.head_block(), vec![vote.into()], None, now)
        .context("Failed to assemble transaction")
}

fn load_transaction(path: &Path) -> Result<Transaction> {
    let text = read_input(path, "transaction")?;
    serde_json::from_str(&text).context("Failed to decode transaction JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_steem::PrivateKey;

    const PROPS: &str = r#"{
        "head_block_number": 34294,
        "head_block_id": "00000000f68585ab0000000000000000000000000000000000000000",
        "time": "2016-04-06T08:28:57",
        "current_witness": "initminer"
    }"#;

    fn vote() -> VoteOperation {
        VoteOperation {
            voter: "foobara".to_string(),
            author: "foobarc".to_string(),
            permlink: "foobard".to_string(),
            weight: 1000,
        }
    }

    #[test]
    fn test_assemble_vote() {
        let now = Time::parse("2016-04-06T08:28:57").unwrap();
        let tx = assemble(PROPS, vote(), now).unwrap();
        assert_eq!(tx.ref_block_num, 34294);
        assert_eq!(tx.ref_block_prefix, 0xab8585f6);
        assert_eq!(tx.expiration.unwrap().to_string(), "2016-04-06T08:29:27");
        assert!(tx.signatures.is_empty());
    }

    #[test]
    fn test_rpc_envelope_accepted() {
        let envelope = format!(r#"{{"jsonrpc": "2.0", "id": 1, "result": {}}}"#, PROPS);
        let props = parse_properties(&envelope).unwrap();
        assert_eq!(props.head_block_number.value(), 34294);
    }

    #[test]
    fn test_signed_vote_recovers_signer() {
        let now = Time::parse("2016-04-06T08:28:57").unwrap();
        let mut tx = assemble(PROPS, vote(), now).unwrap();
        let key = PrivateKey::from_wif("5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf")
            .unwrap();
        let chain = Chain::steem();
        tx.sign(&[key.to_bytes()], &chain).unwrap();

        let digest = tx.digest(&chain).unwrap();
        let signer = wasm_steem::recover_public_key(&digest, &tx.signatures[0]).unwrap();
        assert_eq!(signer, key.public_key());
    }

    #[test]
    fn test_bad_properties() {
        let now = Time::parse("2016-04-06T08:28:57").unwrap();
        assert!(assemble("{", vote(), now).is_err());
        assert!(assemble(r#"{"head_block_number": 1}"#, vote(), now).is_err());
    }
}
