use anyhow::Result;
use clap::{Parser, Subcommand};

mod chain;
mod input;
mod key;
mod tx;

#[derive(Parser)]
#[command(name = "wasm-steem-cli")]
#[command(about = "Build, inspect and sign Steem transactions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction operations
    Tx {
        #[command(subcommand)]
        command: tx::TxCommand,
    },
    /// Key operations (the private key is read from STEEM_WIF)
    Key {
        #[command(subcommand)]
        command: key::KeyCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tx { command } => tx::handle_command(command),
        Commands::Key { command } => key::handle_command(command),
    }
}
