//! Common types for the ethtx transaction toolkit.
//!
//! This crate provides the types shared by the core library and its
//! front ends: error codes, fixed-size aliases, value units, network
//! identifiers, private keys and the read-only call request.
//!
//! # Security Note
//!
//! `PrivateKey` is zeroized on drop. Everything else here is public data.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod types;
pub mod units;

pub use error::EthTxError;
pub use types::*;
pub use units::Unit;

/// Network identifiers used for EIP-155 replay protection.
pub mod chain {
    /// Ethereum main network.
    pub const MAINNET: u64 = 1;
    /// Ropsten test network.
    pub const ROPSTEN: u64 = 3;
    /// Rinkeby test network.
    pub const RINKEBY: u64 = 4;
    /// Kovan test network.
    pub const KOVAN: u64 = 42;
}
