//! Chain argument type for CLI commands

use std::str::FromStr;
use wasm_steem::Chain;

/// CLI argument type for chain selection: `steem` or a hex chain id
#[derive(Debug, Clone)]
pub struct ChainArg(Chain);

impl FromStr for ChainArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("steem") {
            return Ok(ChainArg(Chain::steem()));
        }
        let chain = Chain::new(s);
        chain.id_bytes().map_err(|e| e.to_string())?;
        Ok(ChainArg(chain))
    }
}

impl From<ChainArg> for Chain {
    fn from(arg: ChainArg) -> Self {
        arg.0
    }
}
