//! Ethereum legacy transaction toolkit.
//!
//! Builds, serializes and signs legacy Ethereum transactions and encodes
//! smart contract call data.
//!
//! # Architecture
//!
//! ```text
//! Contract ── abi ──> call data ──> Transaction ── rlp ──> signing pre-image
//!                                        │                      │
//!                                        │<── crypto (ECDSA, keccak)
//!                                        └── rlp ──> signed hex ──> Transport
//! ```
//!
//! - [`rlp`]: canonical byte encoding
//! - [`bignum`]: arbitrary-precision amounts and unit scaling
//! - [`crypto`]: keccak, recoverable signing, low-S, addresses
//! - [`transaction`]: the 9-field transaction and EIP-155 signing
//! - [`abi`]: selectors and 32-byte argument words
//! - [`contract`]: registered functions, signed transactions and calls
//! - [`transport`]: the boundary to an Ethereum node
//!
//! # Example
//!
//! ```
//! use ethtx::{Transaction, Unit};
//!
//! let mut tx = Transaction::new(ethtx::chain::MAINNET);
//! tx.set_nonce(9);
//! tx.set_gas_price(20u64, Unit::Gwei).unwrap();
//! tx.set_gas_limit(21_000u64, Unit::Wei).unwrap();
//! tx.set_receiver("0x3535353535353535353535353535353535353535").unwrap();
//! tx.set_value(1u64, Unit::Ether).unwrap();
//! tx.sign_hex("0x4646464646464646464646464646464646464646464646464646464646464646").unwrap();
//!
//! assert_eq!(tx.signature().unwrap().v, 37);
//! assert!(tx.to_rlp_hex().starts_with("0xf86c"));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod abi;
pub mod bignum;
pub mod contract;
pub mod crypto;
pub mod rlp;
pub mod transaction;
pub mod transport;

pub use abi::{AbiArg, AbiType};
pub use bignum::{BigNum, ToBigNum};
pub use contract::{
    decode_return_value, Amount, Contract, ContractCall, ContractFunction, ReturnHint, ReturnKind,
    ReturnValue, SignedTransaction,
};
pub use crypto::{address_from_private_key, checksum_address, keccak256, Keccak256Hasher};
pub use ethtx_common::{chain, CallRequest, EthAddress, EthTxError, Hash256, PrivateKey, Signature, Unit};
pub use transaction::{Transaction, TxHash};
pub use transport::Transport;
