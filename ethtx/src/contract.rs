//! Smart contract binding.
//!
//! A [`Contract`] holds the functions registered on a deployed contract and
//! turns a function name plus arguments into either a signed transaction
//! (state-changing calls, which need a nonce) or a read-only call request.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use ethtx_common::{
    parse_address, strip_hex_prefix, CallRequest, EthAddress, EthTxError, PrivateKey, Selector,
    Unit,
};

use crate::abi::{self, AbiArg, AbiType};
use crate::bignum::{BigNum, ToBigNum};
use crate::transaction::{Transaction, TxHash};
use crate::transport::{require, Transport};

/// Largest return value that can be decoded, in bits.
pub const MAX_RETURN_BITS: u16 = 256;

// =============================================================================
// Amounts and Functions
// =============================================================================

/// A quantity together with the unit it is expressed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    /// Quantity in `unit`.
    pub value: BigNum,
    /// Unit the quantity is expressed in.
    pub unit: Unit,
}

impl Amount {
    /// Creates an amount from any numeric input.
    pub fn new<V: ToBigNum>(value: V, unit: Unit) -> Result<Self, EthTxError> {
        Ok(Self {
            value: value.to_bignum()?,
            unit,
        })
    }

    /// An amount in wei.
    pub fn wei(value: u64) -> Self {
        Self {
            value: BigNum::from_u64(value),
            unit: Unit::Wei,
        }
    }

    /// The amount converted to wei.
    pub fn to_wei(&self) -> BigNum {
        self.value.scale(self.unit)
    }
}

/// A function registered on a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractFunction {
    signature: String,
    selector: Selector,
    gas_price: Option<Amount>,
    gas_limit: Option<Amount>,
    types: Vec<AbiType>,
}

impl ContractFunction {
    /// Canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// First four bytes of the signature's Keccak256.
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Default gas price, if one was registered.
    pub fn gas_price(&self) -> Option<&Amount> {
        self.gas_price.as_ref()
    }

    /// Default gas limit, if one was registered.
    pub fn gas_limit(&self) -> Option<&Amount> {
        self.gas_limit.as_ref()
    }

    /// Argument types in call order.
    pub fn argument_types(&self) -> &[AbiType] {
        &self.types
    }
}

// =============================================================================
// Call Results
// =============================================================================

/// A signed, broadcastable transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    raw: String,
    hash: TxHash,
}

impl SignedTransaction {
    fn from_transaction(tx: &Transaction) -> Self {
        Self {
            raw: tx.to_rlp_hex(),
            hash: tx.hash(true),
        }
    }

    /// `0x`-prefixed RLP encoding.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Transaction hash.
    pub fn hash(&self) -> TxHash {
        self.hash
    }
}

impl fmt::Display for SignedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// What a contract invocation builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    /// A paid, state-changing transaction.
    Signed(SignedTransaction),
    /// A free, read-only call.
    Call(CallRequest),
}

/// How to present a call's return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// `0x`-prefixed hex string.
    Hex,
    /// Unsigned integer.
    Int,
}

impl FromStr for ReturnKind {
    type Err = EthTxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "str" | "hex" => Ok(ReturnKind::Hex),
            "int" => Ok(ReturnKind::Int),
            _ => Err(EthTxError::UnsupportedResultKind),
        }
    }
}

/// Width and kind of an expected return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnHint {
    bits: u16,
    kind: ReturnKind,
}

impl ReturnHint {
    /// `bits` must be a positive multiple of 8, at most 256.
    pub fn new(bits: u16, kind: ReturnKind) -> Result<Self, EthTxError> {
        if bits == 0 || bits % 8 != 0 || bits > MAX_RETURN_BITS {
            return Err(EthTxError::ValueOutOfRange);
        }
        Ok(Self { bits, kind })
    }

    /// Width of the value in bits.
    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// How the value is presented.
    pub fn kind(&self) -> ReturnKind {
        self.kind
    }
}

/// A decoded call result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnValue {
    /// The node's answer, untouched.
    Raw(String),
    /// Trailing bytes as `0x`-prefixed hex.
    Hex(String),
    /// Trailing bytes as an integer.
    Int(BigNum),
}

/// Decodes the trailing `bits / 4` hex characters of a raw call result.
///
/// Without a hint the raw value is returned unchanged.
pub fn decode_return_value(raw: &str, hint: Option<ReturnHint>) -> Result<ReturnValue, EthTxError> {
    let Some(hint) = hint else {
        return Ok(ReturnValue::Raw(raw.to_string()));
    };

    let digits = strip_hex_prefix(raw);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EthTxError::InvalidHex);
    }
    let width = usize::from(hint.bits / 4);
    let tail = &digits[digits.len().saturating_sub(width)..];

    match hint.kind {
        ReturnKind::Hex => Ok(ReturnValue::Hex(format!("0x{}", tail))),
        ReturnKind::Int => BigNum::parse(&format!("0x{}", tail)).map(ReturnValue::Int),
    }
}

// =============================================================================
// Contract
// =============================================================================

/// A deployed contract and the functions registered on it.
#[derive(Debug, Clone)]
pub struct Contract {
    address: EthAddress,
    from: Option<EthAddress>,
    key: Option<PrivateKey>,
    chain: u64,
    functions: BTreeMap<String, ContractFunction>,
}

impl Contract {
    /// Binds the contract deployed at `address` on network `chain`.
    pub fn new(address: &str, chain: u64) -> Result<Self, EthTxError> {
        Ok(Self {
            address: parse_address(address)?,
            from: None,
            key: None,
            chain,
            functions: BTreeMap::new(),
        })
    }

    /// Sets the key used to sign paid transactions.
    pub fn with_key(mut self, key: PrivateKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Sets the caller address reported in read-only calls.
    pub fn with_from(mut self, from: &str) -> Result<Self, EthTxError> {
        self.from = Some(parse_address(from)?);
        Ok(self)
    }

    /// Contract address.
    pub fn address(&self) -> &EthAddress {
        &self.address
    }

    /// Network id.
    pub fn chain(&self) -> u64 {
        self.chain
    }

    /// Looks up a registered function.
    pub fn function(&self, name: &str) -> Option<&ContractFunction> {
        self.functions.get(name)
    }

    /// Registers `name` with its argument types and default gas.
    ///
    /// Registering a name again replaces the previous entry.
    pub fn register_function(
        &mut self,
        name: &str,
        gas_price: Option<Amount>,
        gas_limit: Option<Amount>,
        argument_types: &[&str],
    ) -> Result<&ContractFunction, EthTxError> {
        let types = argument_types
            .iter()
            .map(|t| AbiType::parse(t))
            .collect::<Result<Vec<_>, _>>()?;

        let signature = abi::function_signature(name, &types);
        let selector = abi::selector(&signature);
        log::debug!("registered {} selector=0x{}", signature, hex::encode(selector));

        let function = ContractFunction {
            signature,
            selector,
            gas_price,
            gas_limit,
            types,
        };
        self.functions.insert(name.to_string(), function);
        self.functions.get(name).ok_or(EthTxError::UnknownFunction)
    }

    /// Selector followed by the encoded arguments.
    pub fn build_call_data(&self, name: &str, args: &[AbiArg]) -> Result<Vec<u8>, EthTxError> {
        self.prepare(name, args).map(|(_, data)| data)
    }

    /// Builds a signed transaction when `nonce` is given, a read-only call
    /// request otherwise.
    ///
    /// `value` only applies to signed transactions.
    pub fn build_transaction(
        &self,
        name: &str,
        nonce: Option<u64>,
        value: Option<&Amount>,
        args: &[AbiArg],
    ) -> Result<ContractCall, EthTxError> {
        let (function, data) = self.prepare(name, args)?;
        match nonce {
            Some(nonce) => self
                .sign_call(function, nonce, value, &data)
                .map(ContractCall::Signed),
            None => Ok(ContractCall::Call(self.call_request(&data))),
        }
    }

    /// Signs a call to `name` and broadcasts it; returns the node's
    /// transaction hash.
    pub fn send<T: Transport + ?Sized>(
        &self,
        transport: &mut T,
        name: &str,
        nonce: u64,
        value: Option<&Amount>,
        args: &[AbiArg],
    ) -> Result<String, EthTxError> {
        let (function, data) = self.prepare(name, args)?;
        let signed = self.sign_call(function, nonce, value, &data)?;
        log::debug!("sending {} nonce={} hash={}", name, nonce, signed.hash());

        let answer = transport.send_raw_transaction(signed.as_str());
        require(&*transport, answer, "eth_sendRawTransaction")
    }

    /// Executes a read-only call to `name` and decodes its result.
    pub fn call<T: Transport + ?Sized>(
        &self,
        transport: &mut T,
        name: &str,
        args: &[AbiArg],
        hint: Option<ReturnHint>,
    ) -> Result<ReturnValue, EthTxError> {
        let (_, data) = self.prepare(name, args)?;
        let request = self.call_request(&data);
        log::debug!("calling {} data={}", name, request.data);

        let answer = transport.call(&request);
        let raw = require(&*transport, answer, "eth_call")?;
        decode_return_value(&raw, hint)
    }

    fn prepare(&self, name: &str, args: &[AbiArg]) -> Result<(&ContractFunction, Vec<u8>), EthTxError> {
        let function = self.functions.get(name).ok_or(EthTxError::UnknownFunction)?;
        let data = abi::encode_call(&function.selector, &function.types, args)?;
        Ok((function, data))
    }

    fn call_request(&self, data: &[u8]) -> CallRequest {
        CallRequest {
            to: format!("0x{}", hex::encode(self.address)),
            from: self.from.map(|from| format!("0x{}", hex::encode(from))),
            data: format!("0x{}", hex::encode(data)),
        }
    }

    fn sign_call(
        &self,
        function: &ContractFunction,
        nonce: u64,
        value: Option<&Amount>,
        data: &[u8],
    ) -> Result<SignedTransaction, EthTxError> {
        let key = self.key.as_ref().ok_or(EthTxError::MissingKey)?;

        let mut tx = Transaction::new(self.chain);
        tx.set_nonce(nonce);
        tx.set_receiver(&hex::encode(self.address))?;
        if let Some(price) = &function.gas_price {
            tx.set_gas_price(&price.value, price.unit)?;
        }
        if let Some(limit) = &function.gas_limit {
            tx.set_gas_limit(&limit.value, limit.unit)?;
        }
        if let Some(value) = value {
            tx.set_value(&value.value, value.unit)?;
        }
        tx.set_data(data);
        tx.sign(key)?;

        Ok(SignedTransaction::from_transaction(&tx))
    }
}
