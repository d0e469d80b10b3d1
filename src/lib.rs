//! EOS Ledger Toolkit
//!
//! Deterministic binary codec and APDU framing for preparing EOS
//! transactions for signing on a Ledger-style hardware device, and for
//! verifying the signatures the device returns.
//!
//! # Architecture
//!
//! This crate provides:
//! - **encode**: name/asset/varint packing, per-action parameter
//!   payloads, and full transaction serialization with its SHA-256
//!   signing digest
//! - **transport**: APDU headers and status words, multi-frame chunking
//!   of signing payloads, and the device command layer over a pluggable
//!   [`Transport`](transport::Transport)
//! - **verify**: canonical-form checks, public-key recovery, EOS address
//!   derivation, and full signature verification
//! - **path**: BIP32 derivation path parsing
//!
//! The physical USB/HID link is out of scope: implement
//! [`transport::Transport`] over your transport of choice.
//!
//! # Example
//!
//! ```rust,ignore
//! use eos_ledger_kit::{encode_transaction, SignRequest};
//!
//! let request: SignRequest = serde_json::from_str(&json)?;
//! let (digest, bytes) = encode_transaction(&request)?;
//! ```

pub mod encode;
pub mod error;
pub mod path;
pub mod transport;
pub mod types;
pub mod utils;
pub mod verify;

// Re-export key types for convenience
pub use error::{EosError, EosResult, ErrorCode};
pub use types::{ActionDescription, Authority, PermissionLevel, SignRequest, TransactionBody};

pub use encode::{encode_asset, encode_name, encode_transaction, encode_varint, ActionData};
pub use path::DerivationPath;
pub use transport::{
    chunk_signing_payload, Apdu, AppConfiguration, EosDevice, Instruction, PublicKeyEntry, Reply,
    StatusWord, Transport,
};
pub use verify::{check_canonical, derive_address, recover_public_key, verify};
