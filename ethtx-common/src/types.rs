//! Core types for the ethtx toolkit.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::EthTxError;

/// Ethereum address (20 bytes).
pub type EthAddress = [u8; 20];

/// Keccak256 hash (32 bytes).
pub type Hash256 = [u8; 32];

/// Function selector (4 bytes).
pub type Selector = [u8; 4];

/// Strips an optional `0x` prefix.
#[inline]
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// Decodes hex with an optional `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, EthTxError> {
    Ok(hex::decode(strip_hex_prefix(s))?)
}

/// Parses a 20-byte address from hex with an optional `0x` prefix.
pub fn parse_address(s: &str) -> Result<EthAddress, EthTxError> {
    let bytes = decode_hex(s).map_err(|_| EthTxError::InvalidAddress)?;
    bytes.try_into().map_err(|_| EthTxError::InvalidAddress)
}

// =============================================================================
// Private Key
// =============================================================================

/// A secp256k1 private key.
///
/// Accepted as `0x`-prefixed hex, bare hex or raw bytes. The bytes are
/// wiped when the key is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(*bytes)
    }

    /// Creates a key from a slice, which must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EthTxError> {
        let key: [u8; 32] = bytes.try_into().map_err(|_| EthTxError::InvalidPrivateKey)?;
        Ok(Self(key))
    }

    /// Parses a key from hex, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, EthTxError> {
        let mut bytes = decode_hex(s).map_err(|_| EthTxError::InvalidPrivateKey)?;
        let key = Self::from_slice(&bytes);
        bytes.zeroize();
        key
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl core::str::FromStr for PrivateKey {
    type Err = EthTxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// =============================================================================
// Signature
// =============================================================================

/// ECDSA signature components of a signed transaction.
///
/// `v` follows EIP-155: `v = chain_id * 2 + 35 + recovery_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signature {
    /// Recovery identifier with the chain id folded in.
    pub v: u64,
    /// R component (32 bytes, big-endian).
    pub r: [u8; 32],
    /// S component (32 bytes, big-endian, low-S normalized).
    pub s: [u8; 32],
}

impl Signature {
    /// Returns the recovery id (0 or 1) for the given chain.
    pub fn recovery_id(&self, chain_id: u64) -> Option<u8> {
        let base = chain_id.checked_mul(2)?.checked_add(35)?;
        match self.v.checked_sub(base)? {
            id @ (0 | 1) => Some(id as u8),
            _ => None,
        }
    }
}

// =============================================================================
// Call Request
// =============================================================================

/// Read-only contract call, in the shape expected by `eth_call`.
///
/// This is never a broadcastable transaction: it carries no nonce, gas or
/// signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallRequest {
    /// Contract address as hex.
    pub to: String,
    /// Caller address as hex, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// `0x`-prefixed call data.
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_parse_address() {
        let addr = parse_address("0xde9F276DDff83727fB627D2C0728b5bAeA469373").unwrap();
        assert_eq!(addr[0], 0xde);
        assert_eq!(addr[19], 0x73);

        let bare = parse_address("de9F276DDff83727fB627D2C0728b5bAeA469373").unwrap();
        assert_eq!(addr, bare);
    }

    #[test]
    fn test_parse_address_rejects_bad_input() {
        assert_eq!(parse_address("0x1234"), Err(EthTxError::InvalidAddress));
        assert_eq!(
            parse_address("0xzz9F276DDff83727fB627D2C0728b5bAeA469373"),
            Err(EthTxError::InvalidAddress)
        );
    }

    #[test]
    fn test_private_key_hex() {
        let key = PrivateKey::from_hex(
            "0xa5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5",
        )
        .unwrap();
        assert_eq!(key.as_bytes(), &[0xa5; 32]);

        let bare: PrivateKey = "a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5"
            .parse()
            .unwrap();
        assert_eq!(key, bare);

        assert!(PrivateKey::from_hex("0xa5a5").is_err());
        assert_eq!(format!("{:?}", key), "PrivateKey(..)");
    }

    #[test]
    fn test_recovery_id() {
        let sig = Signature { v: 38, r: [0; 32], s: [0; 32] };
        assert_eq!(sig.recovery_id(1), Some(1));
        assert_eq!(sig.recovery_id(3), None);
    }

    #[test]
    fn test_call_request_json() {
        let req = CallRequest {
            to: "0x01".to_string(),
            from: None,
            data: "0xa9059cbb".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"to": "0x01", "data": "0xa9059cbb"}));
    }
}
