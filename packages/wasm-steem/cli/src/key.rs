use anyhow::{Context, Result};
use clap::Subcommand;
use wasm_steem::PrivateKey;

/// Environment variable holding the signing key
pub const WIF_ENV: &str = "STEEM_WIF";

#[derive(Subcommand)]
pub enum KeyCommand {
    /// Print the STM public key of the private key in STEEM_WIF
    Public,
}

/// Private key from the STEEM_WIF environment variable
pub fn key_from_env() -> Result<PrivateKey> {
    let wif = std::env::var(WIF_ENV).with_context(|| format!("{} is not set", WIF_ENV))?;
    PrivateKey::from_wif(wif.trim()).with_context(|| format!("{} is not a valid WIF", WIF_ENV))
}

pub fn handle_command(command: KeyCommand) -> Result<()> {
    match command {
        KeyCommand::Public => {
            let key = key_from_env()?;
            println!("{}", key.public_key());
            Ok(())
        }
    }
}
