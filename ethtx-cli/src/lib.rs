//! ethtx command-line library.
//!
//! The commands run entirely offline: deriving addresses, computing
//! selectors and call data, and signing value transfers.
//!
//! # Example
//!
//! ```
//! use ethtx_cli::function_selector;
//!
//! let (canonical, selector) = function_selector("balanceOf(address)").unwrap();
//! assert_eq!(canonical, "balanceOf(address)");
//! assert_eq!(selector, [0x70, 0xa0, 0x82, 0x31]);
//! ```

mod commands;

pub use commands::{
    call_data, derive_address, function_selector, parse_signature, sign_transfer, AddressInfo,
    CliError, TransferRequest,
};
