//! Wallet key formats: WIF private keys and `STM` public keys

use crate::error::SigningError;
use crate::signer;
use k256::ecdsa::{SigningKey, VerifyingKey};
use ripemd::{Digest, Ripemd160};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// WIF version byte for secp256k1 secrets
const WIF_VERSION: u8 = 0x80;
/// Trailing WIF byte marking a compressed public key
const WIF_COMPRESSED_FLAG: u8 = 0x01;
/// Address prefix for public keys on Steem mainnet
pub const PUBLIC_KEY_PREFIX: &str = "STM";
const CHECKSUM_LEN: usize = 4;

/// A secp256k1 private key (always paired with the compressed public key)
#[derive(Debug, Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Create from a raw 32-byte secret
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigningError> {
        Ok(PrivateKey {
            signing_key: signer::signing_key_from_bytes(bytes)?,
        })
    }

    /// Decode a Base58Check wallet import format string
    pub fn from_wif(wif: &str) -> Result<Self, SigningError> {
        let decoded = bs58::decode(wif)
            .with_check(None)
            .into_vec()
            .map_err(|e| SigningError::InvalidPrivateKey(format!("Invalid WIF: {}", e)))?;

        let (version, rest) = decoded
            .split_first()
            .ok_or_else(|| SigningError::InvalidPrivateKey("Invalid WIF: empty".to_string()))?;
        if *version != WIF_VERSION {
            return Err(SigningError::InvalidPrivateKey(format!(
                "Invalid WIF version byte: {:#04x}",
                version
            )));
        }

        let secret = match rest {
            [secret @ .., WIF_COMPRESSED_FLAG] if secret.len() == 32 => secret,
            secret if secret.len() == 32 => secret,
            _ => {
                return Err(SigningError::InvalidPrivateKey(
                    "Invalid WIF length".to_string(),
                ))
            }
        };

        Self::from_bytes(secret)
    }

    /// Encode as uncompressed-flag WIF, the form wallets display
    pub fn to_wif(&self) -> String {
        let mut data = Vec::with_capacity(33);
        data.push(WIF_VERSION);
        data.extend_from_slice(&self.to_bytes());
        bs58::encode(&data).with_check().into_string()
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(*self.signing_key.verifying_key())
    }
}

impl FromStr for PrivateKey {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrivateKey::from_wif(s.trim())
    }
}

/// A compressed secp256k1 public key, printed as `STM...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Create from SEC1 bytes (compressed or uncompressed)
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, SigningError> {
        VerifyingKey::from_sec1_bytes(bytes)
            .map(PublicKey)
            .map_err(|e| SigningError::InvalidPublicKey(e.to_string()))
    }

    /// 33-byte compressed SEC1 encoding
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.0
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        PublicKey(key)
    }
}

fn ripemd160_checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = Ripemd160::digest(data);
    let mut checksum = [0u8; CHECKSUM_LEN];
    checksum.copy_from_slice(&hash[..CHECKSUM_LEN]);
    checksum
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut data = self.to_bytes();
        let checksum = ripemd160_checksum(&data);
        data.extend_from_slice(&checksum);
        write!(f, "{}{}", PUBLIC_KEY_PREFIX, bs58::encode(data).into_string())
    }
}

impl FromStr for PublicKey {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let encoded = s.strip_prefix(PUBLIC_KEY_PREFIX).ok_or_else(|| {
            SigningError::InvalidPublicKey(format!("Missing {} prefix", PUBLIC_KEY_PREFIX))
        })?;
        let decoded = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| SigningError::InvalidPublicKey(e.to_string()))?;
        if decoded.len() != 33 + CHECKSUM_LEN {
            return Err(SigningError::InvalidPublicKey(format!(
                "Expected {} bytes, got {}",
                33 + CHECKSUM_LEN,
                decoded.len()
            )));
        }

        let (key, checksum) = decoded.split_at(33);
        if ripemd160_checksum(key) != checksum {
            return Err(SigningError::InvalidPublicKey(
                "Checksum mismatch".to_string(),
            ));
        }
        PublicKey::from_sec1_bytes(key)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}
