//! ethtx CLI.
//!
//! Builds and signs Ethereum transactions without talking to a node.
//!
//! # Usage
//!
//! ```bash
//! # Address of a key
//! ethtx address --key 0x4646...46
//!
//! # Selector and call data
//! ethtx selector "transfer(address,uint256)"
//! ethtx call-data "transfer(address,uint256)" 0x3535...35 1000
//!
//! # Signed transfer (key may come from ETHTX_PRIVATE_KEY)
//! ethtx --chain 3 sign-transfer --nonce 0 --gas-price 20 --to 0x3535...35 --value 1
//! ```

use clap::{Parser, Subcommand};

use ethtx::{chain, Amount, PrivateKey, Unit};
use ethtx_cli::{
    call_data, derive_address, function_selector, sign_transfer, CliError, TransferRequest,
};

#[derive(Parser, Debug)]
#[command(name = "ethtx", about = "Build and sign Ethereum transactions offline")]
struct Cli {
    /// Network id used for replay protection
    #[arg(long, global = true, default_value_t = chain::MAINNET)]
    chain: u64,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Derive the address controlled by a private key
    Address {
        #[arg(long, env = "ETHTX_PRIVATE_KEY", hide_env_values = true)]
        key: PrivateKey,
    },
    /// Compute the selector of a function signature
    Selector {
        /// e.g. "transfer(address,uint256)"
        signature: String,
    },
    /// Encode call data for a function
    CallData {
        signature: String,
        /// One value per argument; 0x-prefixed values are used as-is
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
    },
    /// Sign a value transfer
    SignTransfer {
        #[arg(long, env = "ETHTX_PRIVATE_KEY", hide_env_values = true)]
        key: PrivateKey,
        #[arg(long)]
        nonce: u64,
        #[arg(long)]
        gas_price: String,
        #[arg(long, default_value = "gwei")]
        gas_price_unit: Unit,
        #[arg(long, default_value = "21000")]
        gas_limit: String,
        #[arg(long)]
        to: String,
        #[arg(long, default_value = "0")]
        value: String,
        #[arg(long, default_value = "ether")]
        value_unit: Unit,
        /// Call data as hex
        #[arg(long)]
        data: Option<String>,
    },
}

fn handle_cli_command(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        CliCommand::Address { key } => {
            let info = derive_address(key)?;
            println!("Address: {}", info.checksummed);
        }
        CliCommand::Selector { signature } => {
            let (canonical, selector) = function_selector(signature)?;
            println!("Signature: {}", canonical);
            println!("Selector: 0x{}", hex::encode(selector));
        }
        CliCommand::CallData { signature, args } => {
            let data = call_data(signature, args)?;
            println!("0x{}", hex::encode(data));
        }
        CliCommand::SignTransfer {
            key,
            nonce,
            gas_price,
            gas_price_unit,
            gas_limit,
            to,
            value,
            value_unit,
            data,
        } => {
            let request = TransferRequest {
                chain: cli.chain,
                nonce: *nonce,
                gas_price: Amount::new(gas_price.as_str(), *gas_price_unit)?,
                gas_limit: Amount::new(gas_limit.as_str(), Unit::Wei)?,
                to: to.clone(),
                value: Amount::new(value.as_str(), *value_unit)?,
                data: data.clone(),
            };
            log::debug!("signing transfer {:?}", request);

            let tx = sign_transfer(&request, key)?;
            println!("{}", tx);
            println!();
            println!("Signing hash: {}", tx.signing_hash());
            println!("Transaction hash: {}", tx.hash(true));
            println!("Raw: {}", tx.to_rlp_hex());
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "debug")]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    }

    let cli = Cli::parse();

    if let Err(e) = handle_cli_command(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
