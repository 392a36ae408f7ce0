//! Transaction digest and compact recoverable signatures
//!
//! Signatures are RFC 6979 deterministic ECDSA over secp256k1, low-S, and must
//! additionally pass the chain's canonical check on `r` and `s`. They are
//! serialized as 65 bytes: a header byte (`31 + recovery_id`, compressed key),
//! then `r` and `s`, hex-encoded.

use crate::chain::Chain;
use crate::error::{SigningError, WasmSteemError};
use crate::keys::PublicKey;
use crate::transaction::Transaction;
use k256::ecdsa::signature::hazmat::{PrehashSigner, RandomizedPrehashSigner};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

/// Compressed-key offset added to the recovery id in the header byte
const COMPACT_HEADER_BASE: u8 = 27 + 4;
/// Upper bound on re-signing attempts with extra entropy
const MAX_CANONICAL_ATTEMPTS: u32 = 256;

/// SHA-256 of the chain id bytes followed by the canonical transaction bytes
pub fn digest(tx: &Transaction, chain: &Chain) -> Result<[u8; 32], WasmSteemError> {
    let mut hasher = Sha256::new();
    hasher.update(chain.id_bytes()?);
    hasher.update(tx.to_bytes()?);
    Ok(hasher.finalize().into())
}

/// Sign `tx` with each key in order and append the signatures
///
/// Either every key signs or the signature list is left untouched.
pub fn sign<K: AsRef<[u8]>>(
    tx: &mut Transaction,
    chain: &Chain,
    keys: &[K],
) -> Result<(), WasmSteemError> {
    if keys.is_empty() {
        return Ok(());
    }

    let digest = digest(tx, chain)?;
    let signatures = keys
        .iter()
        .map(|key| {
            let signing_key = signing_key_from_bytes(key.as_ref())?;
            sign_digest(&signing_key, &digest).map(hex::encode)
        })
        .collect::<Result<Vec<_>, SigningError>>()?;

    for signature in signatures {
        tx.append_signature(signature);
    }
    Ok(())
}

pub(crate) fn signing_key_from_bytes(bytes: &[u8]) -> Result<SigningKey, SigningError> {
    if bytes.len() != 32 {
        return Err(SigningError::InvalidPrivateKey(format!(
            "Private key must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    SigningKey::from_slice(bytes).map_err(|e| SigningError::InvalidPrivateKey(e.to_string()))
}

/// Produce a canonical 65-byte compact signature over a 32-byte digest
pub fn sign_digest(signing_key: &SigningKey, digest: &[u8; 32]) -> Result<[u8; 65], SigningError> {
    let (signature, recovery_id): (Signature, RecoveryId) = signing_key
        .sign_prehash(digest)
        .map_err(|e| SigningError::SigningFailed(e.to_string()))?;
    let compact = compact_bytes(&signature, recovery_id);
    if is_canonical(&compact) {
        return Ok(compact);
    }

    let verifying_key = signing_key.verifying_key();
    for attempt in 1..=MAX_CANONICAL_ATTEMPTS {
        let mut entropy = RetryEntropy::new(digest, attempt);
        let signature: Signature = signing_key
            .sign_prehash_with_rng(&mut entropy, digest)
            .map_err(|e| SigningError::SigningFailed(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);
        let recovery_id = RecoveryId::trial_recovery_from_prehash(verifying_key, digest, &signature)
            .map_err(|e| SigningError::SigningFailed(e.to_string()))?;

        let compact = compact_bytes(&signature, recovery_id);
        if is_canonical(&compact) {
            return Ok(compact);
        }
    }

    Err(SigningError::SigningFailed(format!(
        "No canonical signature after {} attempts",
        MAX_CANONICAL_ATTEMPTS
    )))
}

fn compact_bytes(signature: &Signature, recovery_id: RecoveryId) -> [u8; 65] {
    let mut compact = [0u8; 65];
    compact[0] = COMPACT_HEADER_BASE + recovery_id.to_byte();
    compact[1..].copy_from_slice(&signature.to_bytes());
    compact
}

/// Neither `r` nor `s` may be negative or carry a redundant leading zero
pub fn is_canonical(compact: &[u8; 65]) -> bool {
    let r = &compact[1..33];
    let s = &compact[33..65];
    let half_ok = |half: &[u8]| half[0] & 0x80 == 0 && !(half[0] == 0 && half[1] & 0x80 == 0);
    half_ok(r) && half_ok(s)
}

/// Recover the signer's public key from a hex compact signature
pub fn recover_public_key(digest: &[u8; 32], signature_hex: &str) -> Result<PublicKey, SigningError> {
    let bytes = hex::decode(signature_hex)
        .map_err(|e| SigningError::SigningFailed(format!("Invalid signature hex: {}", e)))?;
    if bytes.len() != 65 {
        return Err(SigningError::SigningFailed(
            "Signature must be 65 bytes".to_string(),
        ));
    }

    // 27..=30 uncompressed, 31..=34 compressed
    let header = bytes[0];
    let recovery_id = match header {
        31..=34 => header - 31,
        27..=30 => header - 27,
        _ => {
            return Err(SigningError::SigningFailed(format!(
                "Invalid signature header: {}",
                header
            )))
        }
    };

    let signature = Signature::from_slice(&bytes[1..])
        .map_err(|e| SigningError::SigningFailed(format!("Invalid signature: {}", e)))?;
    let recovery_id = RecoveryId::from_byte(recovery_id)
        .ok_or_else(|| SigningError::SigningFailed("Invalid recovery id".to_string()))?;
    let verifying_key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
        .map_err(|e| SigningError::SigningFailed(format!("Recovery failed: {}", e)))?;

    Ok(PublicKey::from(verifying_key))
}

/// Deterministic extra entropy for the canonical retry loop
///
/// Emits SHA-256(digest || attempt || block) so retries are reproducible.
struct RetryEntropy {
    digest: [u8; 32],
    attempt: u32,
    block: u32,
}

impl RetryEntropy {
    fn new(digest: &[u8; 32], attempt: u32) -> Self {
        RetryEntropy {
            digest: *digest,
            attempt,
            block: 0,
        }
    }
}

impl RngCore for RetryEntropy {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(32) {
            let block = Sha256::new()
                .chain_update(self.digest)
                .chain_update(self.attempt.to_le_bytes())
                .chain_update(self.block.to_le_bytes())
                .finalize();
            self.block = self.block.wrapping_add(1);
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for RetryEntropy {}
