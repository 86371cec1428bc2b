//! Error types for the ethtx toolkit.
//!
//! Every failure in the encoding and signing pipeline maps to one code.
//! The codes fall into four groups: malformed input, unsupported types,
//! signing failures and transport failures.

use core::fmt;

/// Error codes for the ethtx toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EthTxError {
    // === Format errors (0x01-0x0F) ===

    /// Malformed hexadecimal string.
    InvalidHex = 0x01,

    /// Address is not exactly 20 bytes of hex.
    InvalidAddress = 0x02,

    /// Numeric string could not be parsed.
    InvalidNumber = 0x03,

    /// Unknown unit exponent or unit name.
    InvalidUnit = 0x04,

    /// Value does not fit the target width.
    ValueOutOfRange = 0x05,

    /// Number of call arguments differs from the registered types.
    ArgumentCountMismatch = 0x06,

    /// Argument cannot be converted to its registered type.
    InvalidArgument = 0x07,

    // === Unsupported types (0x10-0x1F) ===

    /// ABI type outside the supported scalar subset.
    UnsupportedType = 0x10,

    /// Requested return value kind is not supported.
    UnsupportedResultKind = 0x11,

    /// Function was never registered on the contract.
    UnknownFunction = 0x12,

    // === Signing errors (0x20-0x2F) ===

    /// Private key is malformed or outside the curve order.
    InvalidPrivateKey = 0x20,

    /// ECDSA signing or v computation failed.
    SigningFailed = 0x21,

    /// A paid transaction was requested without a signing key.
    MissingKey = 0x22,

    // === Transport errors (0x30-0x3F) ===

    /// The transport collaborator reported a failure.
    TransportFailed = 0x30,
}

impl EthTxError {
    /// Returns the error code as a u8.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns true for malformed input (hex, address, number, unit, range).
    #[inline]
    pub fn is_format_error(self) -> bool {
        matches!(
            self,
            EthTxError::InvalidHex
                | EthTxError::InvalidAddress
                | EthTxError::InvalidNumber
                | EthTxError::InvalidUnit
                | EthTxError::ValueOutOfRange
                | EthTxError::ArgumentCountMismatch
                | EthTxError::InvalidArgument
        )
    }

    /// Returns true for unregistered or unsupported types.
    #[inline]
    pub fn is_unsupported(self) -> bool {
        matches!(
            self,
            EthTxError::UnsupportedType
                | EthTxError::UnsupportedResultKind
                | EthTxError::UnknownFunction
        )
    }

    /// Returns true if the signer rejected the key or input.
    #[inline]
    pub fn is_signing_error(self) -> bool {
        matches!(
            self,
            EthTxError::InvalidPrivateKey | EthTxError::SigningFailed | EthTxError::MissingKey
        )
    }

    /// Returns true if the failure came from the transport collaborator.
    #[inline]
    pub fn is_transport_error(self) -> bool {
        matches!(self, EthTxError::TransportFailed)
    }
}

impl fmt::Display for EthTxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EthTxError::InvalidHex => write!(f, "Invalid hex"),
            EthTxError::InvalidAddress => write!(f, "Invalid address"),
            EthTxError::InvalidNumber => write!(f, "Invalid number"),
            EthTxError::InvalidUnit => write!(f, "Invalid unit"),
            EthTxError::ValueOutOfRange => write!(f, "Value out of range"),
            EthTxError::ArgumentCountMismatch => write!(f, "Argument count mismatch"),
            EthTxError::InvalidArgument => write!(f, "Invalid argument"),
            EthTxError::UnsupportedType => write!(f, "Unsupported type"),
            EthTxError::UnsupportedResultKind => write!(f, "Unsupported result kind"),
            EthTxError::UnknownFunction => write!(f, "Unknown function"),
            EthTxError::InvalidPrivateKey => write!(f, "Invalid private key"),
            EthTxError::SigningFailed => write!(f, "Signing failed"),
            EthTxError::MissingKey => write!(f, "Missing key"),
            EthTxError::TransportFailed => write!(f, "Transport failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EthTxError {}

impl From<hex::FromHexError> for EthTxError {
    fn from(_: hex::FromHexError) -> Self {
        EthTxError::InvalidHex
    }
}
