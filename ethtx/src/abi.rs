//! Contract call data encoding.
//!
//! Only the fixed-width scalar subset of the Ethereum ABI is supported:
//! `address`, `uint<N>`, `int<N>` and `bytes<N>`. Every argument occupies
//! one 32-byte word, left-padded with zeros. Negative `int<N>` values are
//! written as `2^N + value`.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use ethtx_common::{parse_address, strip_hex_prefix, EthAddress, EthTxError, Selector};
use num_bigint::BigInt;
use num_traits::{Num, Signed};

use crate::bignum::BigNum;
use crate::crypto::keccak256;

/// Size of one encoded argument.
pub const WORD_SIZE: usize = 32;

// =============================================================================
// Types
// =============================================================================

/// A supported ABI argument type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// 20-byte account address.
    Address,
    /// Unsigned integer of the given bit width.
    Uint(u16),
    /// Two's complement integer of the given bit width.
    Int(u16),
    /// Fixed-size byte array of the given length.
    FixedBytes(u8),
}

impl AbiType {
    /// Parses a type name such as `uint256` or `bytes4`.
    ///
    /// Bare `uint` and `int` mean 256 bits. Dynamic types, arrays and
    /// tuples are rejected.
    pub fn parse(name: &str) -> Result<Self, EthTxError> {
        if name == "address" {
            return Ok(AbiType::Address);
        }
        if let Some(bits) = name.strip_prefix("uint") {
            return parse_int_width(bits).map(AbiType::Uint);
        }
        if let Some(bits) = name.strip_prefix("int") {
            return parse_int_width(bits).map(AbiType::Int);
        }
        if let Some(len) = name.strip_prefix("bytes") {
            return match parse_decimal(len) {
                Some(n @ 1..=32) => Ok(AbiType::FixedBytes(n as u8)),
                _ => Err(EthTxError::UnsupportedType),
            };
        }
        Err(EthTxError::UnsupportedType)
    }

    /// Fails with `UnsupportedType` unless the width is one `parse` accepts.
    pub fn validate(self) -> Result<Self, EthTxError> {
        let supported = match self {
            AbiType::Address => true,
            AbiType::Uint(bits) | AbiType::Int(bits) => bits > 0 && bits <= 256 && bits % 8 == 0,
            AbiType::FixedBytes(len) => (1..=32).contains(&len),
        };
        if supported {
            Ok(self)
        } else {
            Err(EthTxError::UnsupportedType)
        }
    }
}

/// Width suffix of `uint<N>` / `int<N>`; empty means 256.
fn parse_int_width(suffix: &str) -> Result<u16, EthTxError> {
    if suffix.is_empty() {
        return Ok(256);
    }
    match parse_decimal(suffix) {
        Some(bits) if bits > 0 && bits <= 256 && bits % 8 == 0 => Ok(bits as u16),
        _ => Err(EthTxError::UnsupportedType),
    }
}

/// Plain ASCII digits only; rejects signs and leading zeros.
fn parse_decimal(s: &str) -> Option<u32> {
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for AbiType {
    type Err = EthTxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Address => write!(f, "address"),
            AbiType::Uint(bits) => write!(f, "uint{}", bits),
            AbiType::Int(bits) => write!(f, "int{}", bits),
            AbiType::FixedBytes(len) => write!(f, "bytes{}", len),
        }
    }
}

// =============================================================================
// Arguments
// =============================================================================

/// A call argument before encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiArg {
    /// Already-encoded word as `0x`-prefixed hex; only padded.
    Hex(String),
    /// Text: decimal for integers, UTF-8 for byte arrays, hex for addresses.
    Text(String),
    /// Non-negative integer.
    Uint(BigNum),
    /// Signed integer.
    Int(BigInt),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Account address.
    Address(EthAddress),
}

impl From<&str> for AbiArg {
    fn from(s: &str) -> Self {
        if s.starts_with("0x") {
            AbiArg::Hex(s.to_string())
        } else {
            AbiArg::Text(s.to_string())
        }
    }
}

impl From<String> for AbiArg {
    fn from(s: String) -> Self {
        AbiArg::from(s.as_str())
    }
}

impl From<u64> for AbiArg {
    fn from(value: u64) -> Self {
        AbiArg::Uint(BigNum::from_u64(value))
    }
}

impl From<i64> for AbiArg {
    fn from(value: i64) -> Self {
        AbiArg::Int(BigInt::from(value))
    }
}

impl From<BigNum> for AbiArg {
    fn from(value: BigNum) -> Self {
        AbiArg::Uint(value)
    }
}

impl From<BigInt> for AbiArg {
    fn from(value: BigInt) -> Self {
        AbiArg::Int(value)
    }
}

impl From<EthAddress> for AbiArg {
    fn from(address: EthAddress) -> Self {
        AbiArg::Address(address)
    }
}

impl From<Vec<u8>> for AbiArg {
    fn from(bytes: Vec<u8>) -> Self {
        AbiArg::Bytes(bytes)
    }
}

impl From<&[u8]> for AbiArg {
    fn from(bytes: &[u8]) -> Self {
        AbiArg::Bytes(bytes.to_vec())
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Builds the canonical signature `name(type1,type2,...)`.
pub fn function_signature(name: &str, types: &[AbiType]) -> String {
    let args: Vec<String> = types.iter().map(|t| t.to_string()).collect();
    format!("{}({})", name, args.join(","))
}

/// First four bytes of the Keccak256 of a function signature.
pub fn selector(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

/// Left-pads hex (optional `0x`) with zero nibbles to one word.
pub fn pad32(hex_word: &str) -> Result<[u8; WORD_SIZE], EthTxError> {
    let digits = strip_hex_prefix(hex_word);
    if digits.len() > WORD_SIZE * 2 {
        return Err(EthTxError::ValueOutOfRange);
    }
    let padded = format!("{:0>64}", digits);
    let mut word = [0u8; WORD_SIZE];
    hex::decode_to_slice(padded, &mut word)?;
    Ok(word)
}

/// Left-pads `bytes` with zeros to one word.
fn left_pad(bytes: &[u8]) -> Result<[u8; WORD_SIZE], EthTxError> {
    if bytes.len() > WORD_SIZE {
        return Err(EthTxError::ValueOutOfRange);
    }
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - bytes.len()..].copy_from_slice(bytes);
    Ok(word)
}

/// Encodes one argument as a 32-byte word for the given type.
pub fn encode_arg(ty: AbiType, arg: &AbiArg) -> Result<[u8; WORD_SIZE], EthTxError> {
    match (ty.validate()?, arg) {
        (_, AbiArg::Hex(word)) => pad32(word),

        (AbiType::Address, AbiArg::Address(address)) => left_pad(address),
        (AbiType::Address, AbiArg::Text(text)) => {
            let address = parse_address(text).map_err(|_| EthTxError::InvalidArgument)?;
            left_pad(&address)
        }

        (AbiType::Uint(bits), AbiArg::Uint(value)) => encode_uint(bits, value),
        (AbiType::Uint(bits), AbiArg::Int(value)) => encode_uint(bits, &to_unsigned(value)?),
        (AbiType::Uint(bits), AbiArg::Text(text)) => {
            encode_uint(bits, &to_unsigned(&parse_text_int(text)?)?)
        }

        (AbiType::Int(bits), AbiArg::Int(value)) => encode_int(bits, value),
        (AbiType::Int(bits), AbiArg::Uint(value)) => {
            encode_int(bits, &BigInt::from(value.as_biguint().clone()))
        }
        (AbiType::Int(bits), AbiArg::Text(text)) => encode_int(bits, &parse_text_int(text)?),

        (AbiType::FixedBytes(len), AbiArg::Bytes(bytes)) => encode_fixed_bytes(len, bytes),
        (AbiType::FixedBytes(len), AbiArg::Text(text)) => encode_fixed_bytes(len, text.as_bytes()),

        _ => Err(EthTxError::InvalidArgument),
    }
}

/// Selector followed by one word per argument.
pub fn encode_call(
    selector: &Selector,
    types: &[AbiType],
    args: &[AbiArg],
) -> Result<Vec<u8>, EthTxError> {
    if types.len() != args.len() {
        return Err(EthTxError::ArgumentCountMismatch);
    }
    let mut data = Vec::with_capacity(4 + WORD_SIZE * args.len());
    data.extend_from_slice(selector);
    for (ty, arg) in types.iter().zip(args) {
        data.extend_from_slice(&encode_arg(*ty, arg)?);
    }
    Ok(data)
}

/// Decimal with at most one leading `-`.
fn parse_text_int(text: &str) -> Result<BigInt, EthTxError> {
    let text = text.trim();
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EthTxError::InvalidArgument);
    }
    BigInt::from_str_radix(text, 10).map_err(|_| EthTxError::InvalidArgument)
}

fn to_unsigned(value: &BigInt) -> Result<BigNum, EthTxError> {
    value
        .to_biguint()
        .map(BigNum::from)
        .ok_or(EthTxError::ValueOutOfRange)
}

fn encode_uint(bits: u16, value: &BigNum) -> Result<[u8; WORD_SIZE], EthTxError> {
    if value.bits() > u64::from(bits) {
        return Err(EthTxError::ValueOutOfRange);
    }
    value.to_be_bytes32().ok_or(EthTxError::ValueOutOfRange)
}

fn encode_int(bits: u16, value: &BigInt) -> Result<[u8; WORD_SIZE], EthTxError> {
    let bits = usize::from(bits);
    let max = BigInt::from(1u8) << (bits - 1);
    let min = -&max;
    if value >= &max || value < &min {
        return Err(EthTxError::ValueOutOfRange);
    }
    let encoded = if value.is_negative() {
        (BigInt::from(1u8) << bits) + value
    } else {
        value.clone()
    };
    // encoded is non-negative here
    let (_, magnitude) = encoded.to_bytes_be();
    left_pad(&magnitude)
}

fn encode_fixed_bytes(len: u8, bytes: &[u8]) -> Result<[u8; WORD_SIZE], EthTxError> {
    if bytes.len() > usize::from(len) {
        return Err(EthTxError::ValueOutOfRange);
    }
    left_pad(bytes)
}
