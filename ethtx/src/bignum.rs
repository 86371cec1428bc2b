//! Arbitrary-precision unsigned integers.
//!
//! `BigNum` is a thin wrapper around `num_bigint::BigUint` exposing only
//! what the transaction pipeline needs: parsing decimal or hex input,
//! power-of-ten unit scaling, the comparisons and subtraction used for
//! low-S normalization, and minimal big-endian output.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use ethtx_common::{EthTxError, Unit};
use num_bigint::BigUint;
use num_traits::{Num, Zero};

/// An arbitrary-precision non-negative integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct BigNum(BigUint);

impl BigNum {
    /// Returns zero.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Creates a number from a u64.
    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    /// Creates a number from a u128.
    pub fn from_u128(value: u128) -> Self {
        Self(BigUint::from(value))
    }

    /// Creates a number from big-endian bytes.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// Parses `0x`-prefixed hex or a decimal string.
    pub fn parse(s: &str) -> Result<Self, EthTxError> {
        let s = s.trim();
        let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => (hex, 16),
            None => (s, 10),
        };
        let valid = match radix {
            16 => digits.bytes().all(|b| b.is_ascii_hexdigit()),
            _ => digits.bytes().all(|b| b.is_ascii_digit()),
        };
        if digits.is_empty() || !valid {
            return Err(EthTxError::InvalidNumber);
        }
        BigUint::from_str_radix(digits, radix)
            .map(Self)
            .map_err(|_| EthTxError::InvalidNumber)
    }

    /// Returns `10^exponent`.
    pub fn pow10(exponent: u32) -> Self {
        Self(BigUint::from(10u8).pow(exponent))
    }

    /// Returns this amount expressed in wei.
    pub fn scale(&self, unit: Unit) -> Self {
        match unit {
            Unit::Wei => self.clone(),
            _ => self.mul(&Self::pow10(unit.exponent())),
        }
    }

    /// Returns `self * other`.
    pub fn mul(&self, other: &Self) -> Self {
        Self(&self.0 * &other.0)
    }

    /// Returns `self - other`, or `None` if the result would be negative.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self.0 < other.0 {
            None
        } else {
            Some(Self(&self.0 - &other.0))
        }
    }

    /// Returns true if `self >= other`.
    #[inline]
    pub fn gte(&self, other: &Self) -> bool {
        self.0 >= other.0
    }

    /// Returns true if this number is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Number of significant bits.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Lowercase hex without prefix or leading zero nibbles; zero is "0".
    pub fn to_base16(&self) -> String {
        self.0.to_str_radix(16)
    }

    /// Minimal big-endian bytes; zero is the empty string.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        if self.0.is_zero() {
            return Vec::new();
        }
        self.0.to_bytes_be()
    }

    /// Big-endian bytes left-padded to 32, or `None` if wider than 256 bits.
    pub fn to_be_bytes32(&self) -> Option<[u8; 32]> {
        let bytes = self.to_be_bytes();
        if bytes.len() > 32 {
            return None;
        }
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(&bytes);
        Some(out)
    }

    /// Returns the wrapped `BigUint`.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl From<BigUint> for BigNum {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl fmt::Display for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conversion of caller input into a `BigNum`.
///
/// Implemented for integers, big numbers, and strings holding either
/// `0x`-prefixed hex or decimal digits.
pub trait ToBigNum {
    /// Converts the value.
    fn to_bignum(&self) -> Result<BigNum, EthTxError>;
}

impl ToBigNum for BigNum {
    fn to_bignum(&self) -> Result<BigNum, EthTxError> {
        Ok(self.clone())
    }
}

impl ToBigNum for u64 {
    fn to_bignum(&self) -> Result<BigNum, EthTxError> {
        Ok(BigNum::from_u64(*self))
    }
}

impl ToBigNum for u32 {
    fn to_bignum(&self) -> Result<BigNum, EthTxError> {
        Ok(BigNum::from_u64(*self as u64))
    }
}

impl ToBigNum for u128 {
    fn to_bignum(&self) -> Result<BigNum, EthTxError> {
        Ok(BigNum::from_u128(*self))
    }
}

impl ToBigNum for str {
    fn to_bignum(&self) -> Result<BigNum, EthTxError> {
        BigNum::parse(self)
    }
}

impl ToBigNum for String {
    fn to_bignum(&self) -> Result<BigNum, EthTxError> {
        BigNum::parse(self)
    }
}

impl<T: ToBigNum + ?Sized> ToBigNum for &T {
    fn to_bignum(&self) -> Result<BigNum, EthTxError> {
        (**self).to_bignum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!(BigNum::parse("1000").unwrap(), BigNum::from_u64(1000));
        assert_eq!(BigNum::parse("0x3e8").unwrap(), BigNum::from_u64(1000));
        assert_eq!(BigNum::parse("0x430e23411").unwrap(), BigNum::from_u64(0x430e23411));
        assert_eq!(BigNum::parse("0").unwrap(), BigNum::zero());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(BigNum::parse(""), Err(EthTxError::InvalidNumber));
        assert_eq!(BigNum::parse("0x"), Err(EthTxError::InvalidNumber));
        assert_eq!(BigNum::parse("12ab"), Err(EthTxError::InvalidNumber));
        assert_eq!(BigNum::parse("-5"), Err(EthTxError::InvalidNumber));
        assert_eq!(BigNum::parse("+5"), Err(EthTxError::InvalidNumber));
        assert_eq!(BigNum::parse("0x+ff"), Err(EthTxError::InvalidNumber));
        assert_eq!(BigNum::parse("1_000"), Err(EthTxError::InvalidNumber));
        assert_eq!(BigNum::parse("0xff_ff"), Err(EthTxError::InvalidNumber));
    }

    #[test]
    fn test_scale_units() {
        let one = BigNum::from_u64(1);
        assert_eq!(one.scale(Unit::Wei), one);
        assert_eq!(one.scale(Unit::Gwei), BigNum::from_u64(1_000_000_000));
        assert_eq!(
            one.scale(Unit::Ether),
            BigNum::from_u64(1_000_000_000_000_000_000)
        );
        assert_eq!(
            BigNum::from_u64(1000).scale(Unit::Ether).to_base16(),
            "3635c9adc5dea00000"
        );
    }

    #[test]
    fn test_minimal_bytes() {
        assert!(BigNum::zero().to_be_bytes().is_empty());
        assert_eq!(BigNum::from_u64(0x0400).to_be_bytes(), vec![0x04, 0x00]);
        assert_eq!(BigNum::from_be_bytes(&[0, 0, 1]).to_be_bytes(), vec![1]);
        assert_eq!(BigNum::zero().to_base16(), "0");
    }

    #[test]
    fn test_bytes32() {
        let padded = BigNum::from_u64(1).to_be_bytes32().unwrap();
        assert_eq!(padded[31], 1);
        assert!(padded[..31].iter().all(|&b| b == 0));

        let too_wide = BigNum::pow10(78);
        assert!(too_wide.to_be_bytes32().is_none());
    }

    #[test]
    fn test_checked_sub_and_gte() {
        let a = BigNum::from_u64(10);
        let b = BigNum::from_u64(3);
        assert_eq!(a.checked_sub(&b), Some(BigNum::from_u64(7)));
        assert_eq!(b.checked_sub(&a), None);
        assert!(a.gte(&b));
        assert!(a.gte(&a));
        assert!(!b.gte(&a));
    }

    #[test]
    fn test_to_bignum_inputs() {
        assert_eq!(42u64.to_bignum().unwrap(), BigNum::from_u64(42));
        assert_eq!("0x2a".to_bignum().unwrap(), BigNum::from_u64(42));
        assert_eq!(String::from("42").to_bignum().unwrap(), BigNum::from_u64(42));
    }
}
