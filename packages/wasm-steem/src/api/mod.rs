//! Typed access to node RPC methods over a caller-supplied transport
//!
//! The crate does no I/O of its own. A `Transport` issues one JSON-RPC call
//! and returns the `result` member; the API structs only shape parameters
//! and decode results.

pub mod database;
pub mod network_broadcast;

use crate::error::DecodeError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use database::{Account, Block, Content, DatabaseApi, DynamicGlobalProperties, VoteState};
pub use network_broadcast::{BroadcastResponse, NetworkBroadcastApi};

/// One blocking request/response exchange with a node
pub trait Transport {
    type Error;

    fn call(&self, method: &str, params: Value) -> Result<Value, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn call(&self, method: &str, params: Value) -> Result<Value, Self::Error> {
        (**self).call(method, params)
    }
}

#[derive(Debug, Error)]
pub enum ApiError<E> {
    #[error("Transport error: {0}")]
    Transport(E),
    /// Outgoing parameters could not be built; nothing was sent
    #[error("Invalid request: {0}")]
    Request(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

fn call_decode<T, R>(transport: &T, method: &str, params: Value) -> Result<R, ApiError<T::Error>>
where
    T: Transport,
    R: DeserializeOwned,
{
    let result = transport
        .call(method, params)
        .map_err(ApiError::Transport)?;
    serde_json::from_value(result).map_err(|e| ApiError::Decode(e.into()))
}
