//! RLP (Recursive Length Prefix) encoder.
//!
//! RLP is the canonical serialization of Ethereum transactions.
//!
//! # Encoding Rules
//!
//! Prefixes by payload:
//! - Single byte [0x00, 0x7f]: itself
//! - String [0x80, 0xb7]: 0x80 + len, then data
//! - String [0xb8, 0xbf]: 0xb7 + len_of_len, then len, then data
//! - List [0xc0, 0xf7]: 0xc0 + len, then items
//! - List [0xf8, 0xff]: 0xf7 + len_of_len, then len, then items
//!
//! Integers are encoded as their minimal big-endian byte string, so zero
//! is the empty string. Only encoding is implemented.

use alloc::vec;
use alloc::vec::Vec;

/// Offset for string prefixes.
const STRING_OFFSET: u8 = 0x80;

/// Offset for list prefixes.
const LIST_OFFSET: u8 = 0xc0;

/// Longest payload that fits a single-byte prefix.
const SHORT_MAX: usize = 55;

/// An item to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem<'a> {
    /// A non-negative integer.
    Uint(u64),
    /// A byte string (may be empty).
    String(&'a [u8]),
    /// A list of items.
    List(Vec<RlpItem<'a>>),
}

impl<'a> From<&'a [u8]> for RlpItem<'a> {
    fn from(data: &'a [u8]) -> Self {
        RlpItem::String(data)
    }
}

impl From<u64> for RlpItem<'_> {
    fn from(value: u64) -> Self {
        RlpItem::Uint(value)
    }
}

/// Encodes an item.
pub fn encode(item: &RlpItem<'_>) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(item, &mut out);
    out
}

/// Appends the encoding of `item` to `out`.
pub fn encode_into(item: &RlpItem<'_>, out: &mut Vec<u8>) {
    match item {
        RlpItem::Uint(value) => encode_bytes_into(&int_to_bytes(*value), out),
        RlpItem::String(data) => encode_bytes_into(data, out),
        RlpItem::List(items) => {
            let mut payload = Vec::new();
            for item in items {
                encode_into(item, &mut payload);
            }
            encode_header(payload.len(), LIST_OFFSET, out);
            out.extend_from_slice(&payload);
        }
    }
}

/// Returns the minimal big-endian bytes of `value`; zero is empty.
pub fn int_to_bytes(value: u64) -> Vec<u8> {
    strip_leading_zeros(&value.to_be_bytes()).to_vec()
}

/// Returns `data` without leading zero bytes.
pub fn strip_leading_zeros(data: &[u8]) -> &[u8] {
    let start = data.iter().position(|&b| b != 0).unwrap_or(data.len());
    &data[start..]
}

/// Encodes a u64 as RLP bytes.
pub fn encode_u64(value: u64) -> Vec<u8> {
    encode_bytes(&int_to_bytes(value))
}

/// Encodes a byte slice as RLP.
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 9);
    encode_bytes_into(data, &mut out);
    out
}

/// Encodes a list of already-encoded items as RLP.
pub fn encode_list(items: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(items.len() + 9);
    encode_header(items.len(), LIST_OFFSET, &mut out);
    out.extend_from_slice(items);
    out
}

fn encode_bytes_into(data: &[u8], out: &mut Vec<u8>) {
    if data.len() == 1 && data[0] < STRING_OFFSET {
        out.push(data[0]);
        return;
    }
    encode_header(data.len(), STRING_OFFSET, out);
    out.extend_from_slice(data);
}

/// Writes the length prefix for a payload of `len` bytes.
fn encode_header(len: usize, offset: u8, out: &mut Vec<u8>) {
    if len <= SHORT_MAX {
        out.push(offset + len as u8);
    } else {
        let len_bytes = encode_length_bytes(len);
        out.push(offset + SHORT_MAX as u8 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
}

/// Encodes a length as big-endian bytes.
fn encode_length_bytes(len: usize) -> Vec<u8> {
    if len == 0 {
        return vec![];
    }
    strip_leading_zeros(&len.to_be_bytes()).to_vec()
}
