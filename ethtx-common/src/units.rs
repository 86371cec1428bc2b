//! Ether denominations.
//!
//! Each unit is the power-of-ten exponent that converts a human-facing
//! amount into wei, the smallest transactable unit.

use core::fmt;
use core::str::FromStr;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

use crate::error::EthTxError;

/// Subunit exponent of an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum Unit {
    /// Minimum transactable unit.
    #[default]
    Wei = 0,
    /// 1000 wei.
    Kwei = 3,
    /// One million wei.
    Mwei = 6,
    /// One billion wei.
    Gwei = 9,
    /// 1000 gwei.
    Szabo = 12,
    /// One million gwei.
    Finney = 15,
    /// One billion gwei.
    Ether = 18,
}

impl Unit {
    /// All units, smallest first.
    pub const ALL: [Unit; 7] = [
        Unit::Wei,
        Unit::Kwei,
        Unit::Mwei,
        Unit::Gwei,
        Unit::Szabo,
        Unit::Finney,
        Unit::Ether,
    ];

    /// Returns the power-of-ten exponent of this unit.
    #[inline]
    pub fn exponent(self) -> u32 {
        self as u32
    }

    /// Looks up a unit by exponent.
    pub fn from_exponent(exponent: u32) -> Result<Self, EthTxError> {
        Unit::from_u32(exponent).ok_or(EthTxError::InvalidUnit)
    }

    /// Lowercase unit name.
    pub fn name(self) -> &'static str {
        match self {
            Unit::Wei => "wei",
            Unit::Kwei => "kwei",
            Unit::Mwei => "mwei",
            Unit::Gwei => "gwei",
            Unit::Szabo => "szabo",
            Unit::Finney => "finney",
            Unit::Ether => "ether",
        }
    }
}

impl FromStr for Unit {
    type Err = EthTxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .iter()
            .copied()
            .find(|unit| unit.name().eq_ignore_ascii_case(s))
            .ok_or(EthTxError::InvalidUnit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_exponents() {
        assert_eq!(Unit::Wei.exponent(), 0);
        assert_eq!(Unit::Gwei.exponent(), 9);
        assert_eq!(Unit::Ether.exponent(), 18);
    }

    #[test]
    fn test_from_exponent() {
        assert_eq!(Unit::from_exponent(15).unwrap(), Unit::Finney);
        assert_eq!(Unit::from_exponent(4), Err(EthTxError::InvalidUnit));
        assert_eq!(Unit::from_exponent(21), Err(EthTxError::InvalidUnit));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("gwei".parse::<Unit>().unwrap(), Unit::Gwei);
        assert_eq!("Ether".parse::<Unit>().unwrap(), Unit::Ether);
        assert!("satoshi".parse::<Unit>().is_err());
    }
}
