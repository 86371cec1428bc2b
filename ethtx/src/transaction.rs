//! Legacy Ethereum transactions with EIP-155 replay protection.
//!
//! A transaction is the positional 9-tuple
//! `[nonce, gasPrice, gasLimit, to, value, data, v, r, s]`.
//!
//! Before signing, `v` holds the chain id and `r`, `s` are empty, which is
//! exactly the EIP-155 signing pre-image. After signing,
//! `v = recovery_id + chain_id * 2 + 35`.
//!
//! The signing pre-image is derived as a separate list of RLP items, so
//! hashing never touches the stored signature.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use ethtx_common::{chain, decode_hex, parse_address, EthTxError, Hash256, PrivateKey, Signature, Unit};

use crate::bignum::ToBigNum;
use crate::crypto::{compute_v, keccak256, normalize_low_s, sign_digest};
use crate::rlp::{self, RlpItem};

/// Keccak256 digest of an encoded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash(Hash256);

impl TxHash {
    /// Returns the raw digest.
    pub fn digest(&self) -> Hash256 {
        self.0
    }

    /// Returns the digest as 64 lowercase hex characters.
    pub fn hex_digest(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.hex_digest())
    }
}

/// A legacy transaction, signed or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    nonce: u64,
    gas_price: Vec<u8>,
    gas_limit: Vec<u8>,
    to: Vec<u8>,
    value: Vec<u8>,
    data: Vec<u8>,
    chain: u64,
    signature: Option<Signature>,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new(chain::MAINNET)
    }
}

impl Transaction {
    /// Creates an empty transaction for the network `chain`.
    ///
    /// Receiver, value, gas price, gas limit and nonce must be set before
    /// the transaction is useful.
    pub fn new(chain: u64) -> Self {
        Self {
            nonce: 0,
            gas_price: Vec::new(),
            gas_limit: Vec::new(),
            to: Vec::new(),
            value: Vec::new(),
            data: Vec::new(),
            chain,
            signature: None,
        }
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets the receiver from hex, with or without `0x`.
    pub fn set_receiver(&mut self, address: &str) -> Result<(), EthTxError> {
        self.to = parse_address(address)?.to_vec();
        Ok(())
    }

    /// Sets the value to transfer, scaled by `unit`.
    pub fn set_value<V: ToBigNum>(&mut self, value: V, unit: Unit) -> Result<(), EthTxError> {
        self.value = scaled_bytes(value, unit)?;
        Ok(())
    }

    /// Sets the gas price, scaled by `unit`.
    pub fn set_gas_price<V: ToBigNum>(&mut self, value: V, unit: Unit) -> Result<(), EthTxError> {
        self.gas_price = scaled_bytes(value, unit)?;
        Ok(())
    }

    /// Sets the gas limit, scaled by `unit`.
    pub fn set_gas_limit<V: ToBigNum>(&mut self, value: V, unit: Unit) -> Result<(), EthTxError> {
        self.gas_limit = scaled_bytes(value, unit)?;
        Ok(())
    }

    /// Sets the transaction nonce.
    pub fn set_nonce(&mut self, nonce: u64) {
        self.nonce = nonce;
    }

    /// Sets the call data from raw bytes.
    pub fn set_data(&mut self, data: &[u8]) {
        self.data = data.to_vec();
    }

    /// Sets the call data from hex, with or without `0x`.
    ///
    /// Odd-length input is accepted and read as if it had one leading
    /// zero nibble.
    pub fn set_data_hex(&mut self, data: &str) -> Result<(), EthTxError> {
        let digits = ethtx_common::strip_hex_prefix(data);
        self.data = if digits.len() % 2 == 1 {
            decode_hex(&format!("0{}", digits))?
        } else {
            decode_hex(digits)?
        };
        Ok(())
    }

    /// Sets the network id used for replay protection.
    pub fn set_chain(&mut self, chain: u64) {
        self.chain = chain;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Transaction nonce.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Gas price as minimal big-endian bytes.
    pub fn gas_price(&self) -> &[u8] {
        &self.gas_price
    }

    /// Gas limit as minimal big-endian bytes.
    pub fn gas_limit(&self) -> &[u8] {
        &self.gas_limit
    }

    /// Receiver address bytes (empty until set).
    pub fn to(&self) -> &[u8] {
        &self.to
    }

    /// Value as minimal big-endian bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Call data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Network id.
    pub fn chain(&self) -> u64 {
        self.chain
    }

    /// Signature, once `sign` succeeded.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Returns true once the transaction carries a signature.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Current `v` slot: the signature's v, or the chain id before signing.
    pub fn v(&self) -> u64 {
        self.signature.map_or(self.chain, |sig| sig.v)
    }

    // =========================================================================
    // Encoding and Hashing
    // =========================================================================

    /// The six payload fields shared by every form of the transaction.
    fn payload_items(&self) -> Vec<RlpItem<'_>> {
        vec![
            RlpItem::Uint(self.nonce),
            RlpItem::String(&self.gas_price),
            RlpItem::String(&self.gas_limit),
            RlpItem::String(&self.to),
            RlpItem::String(&self.value),
            RlpItem::String(&self.data),
        ]
    }

    /// The EIP-155 signing pre-image: `[..., chain, "", ""]`.
    fn signing_items(&self) -> RlpItem<'_> {
        let mut items = self.payload_items();
        items.push(RlpItem::Uint(self.chain));
        items.push(RlpItem::String(&[]));
        items.push(RlpItem::String(&[]));
        RlpItem::List(items)
    }

    /// The transaction as currently held.
    fn full_items(&self) -> RlpItem<'_> {
        let Some(sig) = &self.signature else {
            return self.signing_items();
        };
        let mut items = self.payload_items();
        items.push(RlpItem::Uint(sig.v));
        // r and s are integers on the wire
        items.push(RlpItem::String(rlp::strip_leading_zeros(&sig.r)));
        items.push(RlpItem::String(rlp::strip_leading_zeros(&sig.s)));
        RlpItem::List(items)
    }

    /// RLP encoding of the transaction.
    ///
    /// Before `sign` this is the unsigned EIP-155 form, which is valid RLP
    /// but cannot be broadcast.
    pub fn to_rlp(&self) -> Vec<u8> {
        rlp::encode(&self.full_items())
    }

    /// RLP encoding as `0x`-prefixed hex.
    pub fn to_rlp_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_rlp()))
    }

    /// Keccak256 of the transaction.
    ///
    /// With `full`, hashes the transaction as held (the transaction hash once
    /// signed). Without, hashes the EIP-155 signing pre-image.
    pub fn hash(&self, full: bool) -> TxHash {
        let encoded = if full {
            self.to_rlp()
        } else {
            rlp::encode(&self.signing_items())
        };
        TxHash(keccak256(&encoded))
    }

    /// Hash signed by `sign`.
    pub fn signing_hash(&self) -> TxHash {
        self.hash(false)
    }

    // =========================================================================
    // Signing
    // =========================================================================

    /// Signs the transaction according to EIP-155.
    ///
    /// Any previous signature is replaced. On error the transaction is left
    /// exactly as it was.
    pub fn sign(&mut self, key: &PrivateKey) -> Result<(), EthTxError> {
        let digest = self.signing_hash().digest();

        let sig = normalize_low_s(sign_digest(key, &digest)?)?;
        let v = compute_v(sig.recovery_id, self.chain)?;

        log::debug!(
            "signed transaction nonce={} chain={} v={}",
            self.nonce,
            self.chain,
            v
        );

        self.signature = Some(Signature { v, r: sig.r, s: sig.s });
        Ok(())
    }

    /// Signs with a hex private key, with or without `0x`.
    pub fn sign_hex(&mut self, key: &str) -> Result<(), EthTxError> {
        self.sign(&PrivateKey::from_hex(key)?)
    }
}

/// Scales `value` by `unit` and returns minimal big-endian bytes.
fn scaled_bytes<V: ToBigNum>(value: V, unit: Unit) -> Result<Vec<u8>, EthTxError> {
    Ok(value.to_bignum()?.scale(unit).to_be_bytes())
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, s) = match &self.signature {
            Some(sig) => (hex::encode(sig.r), hex::encode(sig.s)),
            None => (String::new(), String::new()),
        };
        writeln!(f, "Nonce:     {}", self.nonce)?;
        writeln!(f, "Gas Price: {}", hex::encode(&self.gas_price))?;
        writeln!(f, "Gas Limit: {}", hex::encode(&self.gas_limit))?;
        writeln!(f, "Address:   {}", hex::encode(&self.to))?;
        writeln!(f, "Value:     {}", hex::encode(&self.value))?;
        writeln!(f, "Data:      {}", hex::encode(&self.data))?;
        writeln!(f, "V:         {:#x}", self.v())?;
        writeln!(f, "R:         {}", r)?;
        write!(f, "S:         {}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bignum::BigNum;
    use crate::crypto::SECP256K1_N;
    use hex_literal::hex;

    const KEY: &str = "0xa5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5";

    fn sample() -> Transaction {
        let mut tx = Transaction::new(chain::ROPSTEN);
        tx.set_value(1u64, Unit::Finney).unwrap();
        tx.set_gas_price("0x430e23411", Unit::Wei).unwrap();
        tx.set_gas_limit("0x33450", Unit::Wei).unwrap();
        tx.set_nonce(0);
        tx.set_receiver("0xde9F276DDff83727fB627D2C0728b5bAeA469373").unwrap();
        tx
    }

    #[test]
    fn test_setters_normalize() {
        let tx = sample();
        assert_eq!(tx.value(), &hex!("038d7ea4c68000")[..]);
        assert_eq!(tx.gas_price(), &hex!("0430e23411")[..]);
        assert_eq!(tx.gas_limit(), &hex!("033450")[..]);
        assert_eq!(tx.to(), &hex!("de9f276ddff83727fb627d2c0728b5baea469373")[..]);
    }

    #[test]
    fn test_zero_value_is_empty() {
        let mut tx = Transaction::default();
        tx.set_value(0u64, Unit::Ether).unwrap();
        assert!(tx.value().is_empty());
        tx.set_value("0x00", Unit::Wei).unwrap();
        assert!(tx.value().is_empty());
    }

    #[test]
    fn test_setter_errors_leave_fields() {
        let mut tx = sample();
        let before = tx.clone();
        assert_eq!(tx.set_receiver("0x1234"), Err(EthTxError::InvalidAddress));
        assert_eq!(
            tx.set_receiver("0xzz9F276DDff83727fB627D2C0728b5bAeA469373"),
            Err(EthTxError::InvalidAddress)
        );
        assert_eq!(tx.set_value("1.5", Unit::Ether), Err(EthTxError::InvalidNumber));
        assert_eq!(tx.set_data_hex("0xgg"), Err(EthTxError::InvalidHex));
        assert_eq!(tx, before);
    }

    #[test]
    fn test_set_data_hex() {
        let mut tx = Transaction::default();
        tx.set_data_hex("0xa9059cbb").unwrap();
        assert_eq!(tx.data(), &hex!("a9059cbb")[..]);

        tx.set_data_hex("0x123").unwrap();
        assert_eq!(tx.data(), &hex!("0123")[..]);

        tx.set_data_hex("").unwrap();
        assert!(tx.data().is_empty());
    }

    #[test]
    fn test_unsigned_rlp_is_signing_preimage() {
        let tx = sample();
        assert!(!tx.is_signed());
        assert_eq!(tx.v(), chain::ROPSTEN);
        assert_eq!(tx.hash(true), tx.hash(false));

        let encoded = tx.to_rlp();
        // ... chain id, empty r, empty s
        assert_eq!(&encoded[encoded.len() - 3..], &[0x03, 0x80, 0x80]);
        assert!(tx.to_rlp_hex().starts_with("0x"));
    }

    #[test]
    fn test_hash_is_idempotent() {
        let mut tx = sample();
        tx.sign_hex(KEY).unwrap();
        let sig = *tx.signature().unwrap();

        let first = tx.hash(false);
        let second = tx.hash(false);
        assert_eq!(first, second);
        assert_eq!(tx.signature(), Some(&sig));
        assert_ne!(tx.hash(true), first);
        assert_eq!(first.hex_digest().len(), 64);
    }

    #[test]
    fn test_sign_sets_eip155_v_and_low_s() {
        let mut tx = sample();
        tx.sign_hex(KEY).unwrap();

        let sig = tx.signature().unwrap();
        assert!(sig.v == 41 || sig.v == 42);
        assert!(sig.recovery_id(chain::ROPSTEN).is_some());

        let two_s = BigNum::from_be_bytes(&sig.s).mul(&BigNum::from_u64(2));
        assert!(!two_s.gte(&BigNum::from_be_bytes(&SECP256K1_N)));
    }

    #[test]
    fn test_sign_is_deterministic_and_resignable() {
        let mut tx = sample();
        tx.sign_hex(KEY).unwrap();
        let first = tx.to_rlp();

        // Signing again replaces, rather than builds on, the old signature.
        tx.sign_hex(KEY).unwrap();
        assert_eq!(tx.to_rlp(), first);
    }

    #[test]
    fn test_sign_failure_keeps_state() {
        let mut tx = sample();
        tx.sign_hex(KEY).unwrap();
        let before = tx.clone();

        assert_eq!(tx.sign_hex("0x1234"), Err(EthTxError::InvalidPrivateKey));
        assert_eq!(
            tx.sign(&PrivateKey::from_bytes(&[0u8; 32])),
            Err(EthTxError::InvalidPrivateKey)
        );
        assert_eq!(tx, before);
    }

    #[test]
    fn test_display_report() {
        let mut tx = sample();
        let report = tx.to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Nonce:     0");
        assert_eq!(lines[1], "Gas Price: 0430e23411");
        assert_eq!(lines[6], "V:         0x3");
        assert_eq!(lines[7], "R:         ");

        tx.sign_hex(KEY).unwrap();
        let report = tx.to_string();
        assert_eq!(report.lines().count(), 9);
        assert!(report.lines().nth(7).unwrap().len() == "R:         ".len() + 64);
    }
}
