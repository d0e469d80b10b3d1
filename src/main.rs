//! Command-line front end
//!
//! Encodes a JSON transaction description into the device wire format
//! and shows the frames a signing session would exchange. The physical
//! device link is not part of this tool; the printed frames are the
//! exact bytes a transport implementation would send.

use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use eos_ledger_kit::transport::chunker::DEFAULT_CHUNK_SIZE;
use eos_ledger_kit::utils::logging;
use eos_ledger_kit::{
    chunk_signing_payload, derive_address, encode_transaction, log_error, log_info,
    DerivationPath, EosResult, SignRequest,
};

#[derive(Parser)]
#[command(name = "eosledger", about = "EOS transaction encoder for hardware signing")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serialize a transaction and print its bytes and signing digest
    Encode {
        /// Path to the JSON transaction description
        #[arg(long)]
        file: String,
    },
    /// Print the APDU frames of a signing session
    Frames {
        /// Path to the JSON transaction description
        #[arg(long)]
        file: String,
        /// BIP32 derivation path
        #[arg(long, default_value = "44'/194'/0'/0/0")]
        path: String,
        /// Maximum payload chunk size per frame
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
    /// Derive the EOS address of an uncompressed public key
    Address {
        /// 65-byte public key as hex
        #[arg(long)]
        public_key: String,
    },
}

fn load_request(file: &str) -> EosResult<SignRequest> {
    let contents = fs::read_to_string(file)?;
    Ok(serde_json::from_str(&contents)?)
}

fn run(cli: Cli) -> EosResult<()> {
    match cli.command {
        Command::Encode { file } => {
            let request = load_request(&file)?;
            let (digest, bytes) = encode_transaction(&request)?;
            log_info!("cli", "transaction encoded", size = bytes.len());
            println!("bytes:  {}", hex::encode(&bytes));
            println!("digest: {}", hex::encode(digest));
        }
        Command::Frames {
            file,
            path,
            chunk_size,
        } => {
            let request = load_request(&file)?;
            let path = DerivationPath::parse(&path)?;
            let (digest, bytes) = encode_transaction(&request)?;
            let frames = chunk_signing_payload(&path, &bytes, chunk_size)?;
            log_info!("cli", "signing session prepared", frames = frames.len());
            for frame in &frames {
                println!("{}", hex::encode(frame.serialize()));
            }
            println!("digest: {}", hex::encode(digest));
        }
        Command::Address { public_key } => {
            let bytes = hex::decode(&public_key)?;
            let key: [u8; 65] = bytes.as_slice().try_into().map_err(|_| {
                eos_ledger_kit::EosError::invalid_input(format!(
                    "expected 65-byte public key, got {} bytes",
                    bytes.len()
                ))
            })?;
            println!("{}", derive_address(&key));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.debug {
        logging::enable_debug();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("cli", e.to_string());
            ExitCode::FAILURE
        }
    }
}
