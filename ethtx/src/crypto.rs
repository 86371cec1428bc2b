//! Cryptographic operations for transaction signing.
//!
//! This module provides:
//! - Keccak256 hashing (Ethereum's hash function)
//! - Recoverable ECDSA signing with secp256k1
//! - Signature normalization (low-S, EIP-155 v value)
//! - Address derivation and EIP-55 checksum formatting
//!
//! # Security
//!
//! - Signing uses RFC 6979 deterministic nonces (SHA-256)
//! - Key material is only held as `SigningKey` for the duration of a call

use alloc::string::String;

use ethtx_common::{EthAddress, EthTxError, Hash256, PrivateKey};
use k256::{
    ecdsa::SigningKey,
    elliptic_curve::sec1::ToEncodedPoint,
    PublicKey,
};
use tiny_keccak::{Hasher as KeccakHasher, Keccak};

use crate::bignum::BigNum;

/// Order of the secp256k1 group.
pub const SECP256K1_N: Hash256 = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

// =============================================================================
// Keccak256
// =============================================================================

/// Keccak256 hash function as used by Ethereum.
pub fn keccak256(data: &[u8]) -> Hash256 {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Streaming Keccak256 hasher.
pub struct Keccak256Hasher {
    inner: Keccak,
}

impl Keccak256Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self {
            inner: Keccak::v256(),
        }
    }

    /// Updates the hasher with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalizes and returns the hash.
    pub fn finalize(self) -> Hash256 {
        let mut output = [0u8; 32];
        self.inner.finalize(&mut output);
        output
    }
}

impl Default for Keccak256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Keys and Addresses
// =============================================================================

/// Builds a signing key from a private key.
pub fn signing_key(key: &PrivateKey) -> Result<SigningKey, EthTxError> {
    SigningKey::from_slice(key.as_bytes()).map_err(|_| EthTxError::InvalidPrivateKey)
}

/// Get Ethereum address from public key.
///
/// Address = keccak256(pubkey[1..])[12..32]
/// (Skip the 0x04 prefix of uncompressed key, take last 20 bytes of hash)
pub fn public_key_to_address(pubkey: &PublicKey) -> EthAddress {
    let encoded = pubkey.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Derives the account address controlled by `key`.
pub fn address_from_private_key(key: &PrivateKey) -> Result<EthAddress, EthTxError> {
    let signing_key = signing_key(key)?;
    let pubkey: PublicKey = signing_key.verifying_key().into();
    Ok(public_key_to_address(&pubkey))
}

/// Format address with EIP-55 checksum.
pub fn checksum_address(address: &EthAddress) -> String {
    let hex_lower = hex::encode(address);
    let hash = keccak256(hex_lower.as_bytes());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (i, c) in hex_lower.chars().enumerate() {
        let hash_byte = hash[i / 2];
        let nibble = if i % 2 == 0 {
            hash_byte >> 4
        } else {
            hash_byte & 0x0F
        };

        if c.is_ascii_alphabetic() && nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

// =============================================================================
// Signing
// =============================================================================

/// Raw recoverable signature over a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// Recovery id (0 or 1).
    pub recovery_id: u8,
    /// R component.
    pub r: [u8; 32],
    /// S component.
    pub s: [u8; 32],
}

/// Signs a 32-byte digest with a deterministic nonce.
pub fn sign_digest(key: &PrivateKey, digest: &Hash256) -> Result<RecoverableSignature, EthTxError> {
    let signing_key = signing_key(key)?;
    let (sig, recid) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|_| EthTxError::SigningFailed)?;

    let rs = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&rs[..32]);
    s.copy_from_slice(&rs[32..]);

    Ok(RecoverableSignature {
        recovery_id: recid.is_y_odd() as u8,
        r,
        s,
    })
}

/// Normalizes a signature to low-S form.
///
/// If `2*s >= N`, `s` becomes `N - s` and the recovery id is flipped.
pub fn normalize_low_s(sig: RecoverableSignature) -> Result<RecoverableSignature, EthTxError> {
    let n = BigNum::from_be_bytes(&SECP256K1_N);
    let s = BigNum::from_be_bytes(&sig.s);

    if !s.mul(&BigNum::from_u64(2)).gte(&n) {
        return Ok(sig);
    }

    let low_s = n
        .checked_sub(&s)
        .and_then(|low| low.to_be_bytes32())
        .ok_or(EthTxError::SigningFailed)?;

    Ok(RecoverableSignature {
        recovery_id: sig.recovery_id ^ 1,
        r: sig.r,
        s: low_s,
    })
}

/// Compute the EIP-155 v value: `v = recovery_id + chain_id * 2 + 35`.
pub fn compute_v(recovery_id: u8, chain_id: u64) -> Result<u64, EthTxError> {
    chain_id
        .checked_mul(2)
        .and_then(|x| x.checked_add(35))
        .and_then(|x| x.checked_add(recovery_id as u64))
        .ok_or(EthTxError::SigningFailed)
}
