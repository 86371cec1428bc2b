//! Network transport boundary.
//!
//! The library never frames JSON-RPC itself. A [`Transport`] carries signed
//! transactions and call requests to a node and hands back the node's
//! answers. Every method returns `None` on failure; the transport keeps the
//! reason, available through [`Transport::last_error`].

use alloc::string::String;

use ethtx_common::{CallRequest, EthTxError};

use crate::bignum::BigNum;

/// Generic trait to abstract the communication layer between the library and
/// an Ethereum node.
pub trait Transport {
    /// Balance of `address` in wei.
    fn get_balance(&mut self, address: &str) -> Option<BigNum>;

    /// Current gas price in wei.
    fn get_gas_price(&mut self) -> Option<BigNum>;

    /// Number of transactions sent from `address`, i.e. its next nonce.
    fn get_transaction_count(&mut self, address: &str) -> Option<u64>;

    /// Network id the node is serving.
    fn get_chain_id(&mut self) -> Option<u64>;

    /// Broadcasts a `0x`-prefixed signed transaction; returns its hash.
    fn send_raw_transaction(&mut self, signed: &str) -> Option<String>;

    /// Executes a read-only call; returns the raw `0x`-prefixed result.
    fn call(&mut self, request: &CallRequest) -> Option<String>;

    /// Reason of the most recent failure, if the transport keeps one.
    fn last_error(&self) -> Option<&str> {
        None
    }
}

/// Turns a transport answer into a result, logging the failure reason.
pub(crate) fn require<T, R: Transport + ?Sized>(
    transport: &R,
    answer: Option<T>,
    method: &str,
) -> Result<T, EthTxError> {
    answer.ok_or_else(|| {
        log::warn!(
            "{} failed: {}",
            method,
            transport.last_error().unwrap_or("no error reported")
        );
        EthTxError::TransportFailed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    impl Transport for Offline {
        fn get_balance(&mut self, _address: &str) -> Option<BigNum> {
            None
        }
        fn get_gas_price(&mut self) -> Option<BigNum> {
            Some(BigNum::from_u64(20_000_000_000))
        }
        fn get_transaction_count(&mut self, _address: &str) -> Option<u64> {
            None
        }
        fn get_chain_id(&mut self) -> Option<u64> {
            Some(1)
        }
        fn send_raw_transaction(&mut self, _signed: &str) -> Option<String> {
            None
        }
        fn call(&mut self, _request: &CallRequest) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_default_last_error() {
        assert_eq!(Offline.last_error(), None);
    }

    #[test]
    fn test_require() {
        let mut transport = Offline;
        let price = transport.get_gas_price();
        assert_eq!(
            require(&transport, price, "eth_gasPrice"),
            Ok(BigNum::from_u64(20_000_000_000))
        );

        let count = transport.get_transaction_count("0x00");
        assert_eq!(
            require(&transport, count, "eth_getTransactionCount"),
            Err(EthTxError::TransportFailed)
        );
    }
}
