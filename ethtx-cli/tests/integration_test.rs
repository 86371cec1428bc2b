//! Integration tests for the CLI commands.
//!
//! These run the same code paths as the binary, without spawning it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ethtx-cli
//! ```

use ethtx::{Amount, EthTxError, PrivateKey, Unit};
use ethtx_cli::{call_data, derive_address, sign_transfer, CliError, TransferRequest};
use hex_literal::hex;

const KEY: [u8; 32] = [0x46; 32];

fn eip155_transfer() -> TransferRequest {
    TransferRequest {
        chain: 1,
        nonce: 9,
        gas_price: Amount::new(20u64, Unit::Gwei).unwrap(),
        gas_limit: Amount::new("21000", Unit::Wei).unwrap(),
        to: "0x3535353535353535353535353535353535353535".to_string(),
        value: Amount::new("1", Unit::Ether).unwrap(),
        data: None,
    }
}

// ============================================================================
// Address Tests
// ============================================================================

#[test]
fn test_derive_address() {
    let info = derive_address(&PrivateKey::from_bytes(&KEY)).unwrap();
    assert_eq!(info.address, hex!("9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"));
    assert_eq!(info.checksummed, "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F");
}

#[test]
fn test_derive_address_invalid_key() {
    let result = derive_address(&PrivateKey::from_bytes(&[0u8; 32]));
    assert!(matches!(result, Err(CliError::Tx(EthTxError::InvalidPrivateKey))));
}

// ============================================================================
// Call Data Tests
// ============================================================================

#[test]
fn test_call_data_transfer() {
    let args = vec![
        "0x3535353535353535353535353535353535353535".to_string(),
        "1000".to_string(),
    ];
    let data = call_data("transfer(address,uint256)", &args).unwrap();
    assert_eq!(
        data,
        hex!(
            "a9059cbb"
            "0000000000000000000000003535353535353535353535353535353535353535"
            "00000000000000000000000000000000000000000000000000000000000003e8"
        )
    );
}

#[test]
fn test_call_data_negative_int() {
    let data = call_data("set(int8)", &["-1".to_string()]).unwrap();
    assert_eq!(data.len(), 4 + 32);
    assert_eq!(data[35], 0xff);
    assert!(data[4..35].iter().all(|&b| b == 0));
}

#[test]
fn test_call_data_argument_count() {
    let result = call_data("transfer(address,uint256)", &["1".to_string()]);
    assert!(matches!(
        result,
        Err(CliError::Tx(EthTxError::ArgumentCountMismatch))
    ));
}

// ============================================================================
// Transfer Tests
// ============================================================================

#[test]
fn test_sign_transfer_eip155_vector() {
    let tx = sign_transfer(&eip155_transfer(), &PrivateKey::from_bytes(&KEY)).unwrap();
    assert_eq!(
        tx.to_rlp_hex(),
        "0xf86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
    );
    assert_eq!(
        tx.signing_hash().hex_digest(),
        "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
    );
}

#[test]
fn test_sign_transfer_other_chain() {
    let mut request = eip155_transfer();
    request.chain = ethtx::chain::KOVAN;
    request.data = Some("0xdeadbeef".to_string());

    let tx = sign_transfer(&request, &PrivateKey::from_bytes(&KEY)).unwrap();
    let v = tx.signature().unwrap().v;
    assert!(v == 119 || v == 120);
    assert_eq!(tx.data(), &hex!("deadbeef")[..]);
}

#[test]
fn test_sign_transfer_report() {
    let tx = sign_transfer(&eip155_transfer(), &PrivateKey::from_bytes(&KEY)).unwrap();
    let report = tx.to_string();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "Nonce:     9");
    assert_eq!(lines[1], "Gas Price: 04a817c800");
    assert_eq!(lines[2], "Gas Limit: 5208");
    assert_eq!(lines[4], "Value:     0de0b6b3a7640000");
    assert_eq!(lines[6], "V:         0x25");
}
