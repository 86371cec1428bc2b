//! Offline commands behind the CLI.
//!
//! Each command takes parsed arguments and returns plain values; printing
//! is left to the binary.

use ethtx::abi::{self, AbiArg, AbiType};
use ethtx::{
    address_from_private_key, checksum_address, Amount, EthAddress, EthTxError, PrivateKey,
    Transaction,
};

/// Errors that can occur when running a command.
#[derive(Debug)]
pub enum CliError {
    /// The library rejected the input or failed to sign.
    Tx(EthTxError),
    /// Command-line input that could not be interpreted.
    InvalidInput(String),
}

impl From<EthTxError> for CliError {
    fn from(e: EthTxError) -> Self {
        Self::Tx(e)
    }
}

impl From<&'static str> for CliError {
    fn from(e: &'static str) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<String> for CliError {
    fn from(e: String) -> Self {
        Self::InvalidInput(e)
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Tx(e) => write!(f, "{} (code 0x{:02x})", e, e.code()),
            CliError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Tx(e) => Some(e),
            _ => None,
        }
    }
}

/// An address in raw and EIP-55 form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressInfo {
    pub address: EthAddress,
    pub checksummed: String,
}

/// Derives the account controlled by `key`.
pub fn derive_address(key: &PrivateKey) -> Result<AddressInfo, CliError> {
    let address = address_from_private_key(key)?;
    Ok(AddressInfo {
        address,
        checksummed: checksum_address(&address),
    })
}

/// Splits `name(type1,type2)` into its name and parsed types.
pub fn parse_signature(signature: &str) -> Result<(String, Vec<AbiType>), CliError> {
    let signature = signature.trim();
    let (name, rest) = signature
        .split_once('(')
        .ok_or("Signature must look like name(type1,type2)")?;
    let list = rest
        .strip_suffix(')')
        .ok_or("Signature must end with ')'")?;
    if name.is_empty() {
        return Err("Function name is empty".into());
    }

    let types = if list.trim().is_empty() {
        Vec::new()
    } else {
        list.split(',')
            .map(|t| AbiType::parse(t.trim()))
            .collect::<Result<Vec<_>, _>>()?
    };
    Ok((name.to_string(), types))
}

/// Canonical signature and selector of a function.
pub fn function_selector(signature: &str) -> Result<(String, [u8; 4]), CliError> {
    let (name, types) = parse_signature(signature)?;
    let canonical = abi::function_signature(&name, &types);
    let selector = abi::selector(&canonical);
    Ok((canonical, selector))
}

/// Call data for `signature` applied to textual arguments.
///
/// Arguments starting with `0x` are taken as already-encoded words.
pub fn call_data(signature: &str, args: &[String]) -> Result<Vec<u8>, CliError> {
    let (name, types) = parse_signature(signature)?;
    let selector = abi::selector(&abi::function_signature(&name, &types));
    let args: Vec<AbiArg> = args.iter().map(|a| AbiArg::from(a.as_str())).collect();
    Ok(abi::encode_call(&selector, &types, &args)?)
}

/// Parameters of a plain value transfer.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub chain: u64,
    pub nonce: u64,
    pub gas_price: Amount,
    pub gas_limit: Amount,
    pub to: String,
    pub value: Amount,
    pub data: Option<String>,
}

/// Builds and signs a transfer.
pub fn sign_transfer(request: &TransferRequest, key: &PrivateKey) -> Result<Transaction, CliError> {
    let mut tx = Transaction::new(request.chain);
    tx.set_nonce(request.nonce);
    tx.set_gas_price(&request.gas_price.value, request.gas_price.unit)?;
    tx.set_gas_limit(&request.gas_limit.value, request.gas_limit.unit)?;
    tx.set_receiver(&request.to)?;
    tx.set_value(&request.value.value, request.value.unit)?;
    if let Some(data) = &request.data {
        tx.set_data_hex(data)?;
    }
    tx.sign(key)?;
    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethtx::Unit;

    #[test]
    fn test_parse_signature() {
        let (name, types) = parse_signature("transfer(address, uint)").unwrap();
        assert_eq!(name, "transfer");
        assert_eq!(types, vec![AbiType::Address, AbiType::Uint(256)]);

        let (name, types) = parse_signature("totalSupply()").unwrap();
        assert_eq!(name, "totalSupply");
        assert!(types.is_empty());
    }

    #[test]
    fn test_parse_signature_errors() {
        assert!(matches!(
            parse_signature("transfer"),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_signature("transfer(address"),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_signature("(address)"),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_signature("set(string)"),
            Err(CliError::Tx(EthTxError::UnsupportedType))
        ));
    }

    #[test]
    fn test_function_selector() {
        let (canonical, selector) = function_selector("transfer(address,uint)").unwrap();
        assert_eq!(canonical, "transfer(address,uint256)");
        assert_eq!(selector, [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_error_display() {
        let err = CliError::from(EthTxError::InvalidAddress);
        assert_eq!(err.to_string(), "Invalid address (code 0x02)");
        let err = CliError::from("bad");
        assert_eq!(err.to_string(), "Invalid input: bad");
    }

    #[test]
    fn test_sign_transfer_rejects_bad_receiver() {
        let request = TransferRequest {
            chain: 1,
            nonce: 0,
            gas_price: Amount::wei(1),
            gas_limit: Amount::wei(21_000),
            to: "0x1234".to_string(),
            value: Amount::new(1u64, Unit::Ether).unwrap(),
            data: None,
        };
        let key = PrivateKey::from_bytes(&[0x46; 32]);
        assert!(matches!(
            sign_transfer(&request, &key),
            Err(CliError::Tx(EthTxError::InvalidAddress))
        ));
    }
}
