//! Core transaction type for Steem

use crate::chain::Chain;
use crate::encoding::{encode_to_vec, Encode, Encoder};
use crate::error::{EncodeError, WasmSteemError};
use crate::operations::Operation;
use crate::signer;
use crate::types::Time;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// A Steem transaction, signed or not
///
/// Field order here is the canonical encoding order. `signatures` is not
/// part of the signed payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Time>,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
    #[serde(default)]
    pub signatures: Vec<String>,
}

impl Transaction {
    /// Create an empty transaction bound to a reference block
    pub fn new(ref_block_num: u16, ref_block_prefix: u32) -> Self {
        Transaction {
            ref_block_num,
            ref_block_prefix,
            ..Default::default()
        }
    }

    /// Append an operation; operations keep the order they were pushed in
    pub fn push_operation(&mut self, operation: impl Into<Operation>) {
        self.operations.push(operation.into());
    }

    /// Set the expiration only if none has been set yet, returning the effective value
    pub fn set_default_expiration(&mut self, default: Time) -> Time {
        *self.expiration.get_or_insert(default)
    }

    /// Append one hex-encoded signature
    pub fn append_signature(&mut self, signature: String) {
        self.signatures.push(signature);
    }

    /// Canonical bytes of the signed payload
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        encode_to_vec(self)
    }

    /// Transaction id: the first 20 bytes of SHA-256 over the canonical bytes, hex
    pub fn id(&self) -> Result<String, EncodeError> {
        let hash = Sha256::digest(self.to_bytes()?);
        Ok(hex::encode(&hash[..20]))
    }

    /// Chain-scoped digest that signatures commit to
    pub fn digest(&self, chain: &Chain) -> Result<[u8; 32], WasmSteemError> {
        signer::digest(self, chain)
    }

    /// Sign with every key, appending signatures in key order
    pub fn sign<K: AsRef<[u8]>>(
        &mut self,
        keys: &[K],
        chain: &Chain,
    ) -> Result<(), WasmSteemError> {
        signer::sign(self, chain, keys)
    }

    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }
}

impl Encode for Transaction {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        let expiration = self.expiration.ok_or(EncodeError::MissingExpiration)?;
        enc.write_u16(self.ref_block_num);
        enc.write_u32(self.ref_block_prefix);
        enc.encode(&expiration)?;
        enc.encode_seq(&self.operations)?;
        enc.encode_seq(&self.extensions)
    }
}

/// `future_extensions` entry; the chain defines only the void record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Void,
}

impl Extension {
    pub fn tag(self) -> u64 {
        match self {
            Extension::Void => 0,
        }
    }
}

impl Encode for Extension {
    fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.write_uvarint(self.tag());
        Ok(())
    }
}

/// `[0, {}]`
impl Serialize for Extension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.tag())?;
        tuple.serialize_element(&serde_json::Map::new())?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Extension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExtensionVisitor;

        impl<'de> Visitor<'de> for ExtensionVisitor {
            type Value = Extension;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an extension as [tag, body]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Extension, A::Error> {
                let tag: u64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let _body: Option<de::IgnoredAny> = seq.next_element()?;
                match tag {
                    0 => Ok(Extension::Void),
                    other => Err(de::Error::custom(format!(
                        "Unknown extension tag: {}",
                        other
                    ))),
                }
            }
        }

        deserializer.deserialize_seq(ExtensionVisitor)
    }
}
