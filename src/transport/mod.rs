//! Device transport: APDU framing, chunking, and the command layer
//!
//! The physical link (USB/HID) stays behind the [`Transport`] trait;
//! this module owns everything byte-shaped on top of it: the command
//! headers, the status-word table, the multi-frame chunking of signing
//! payloads, and the response parsing.

pub mod apdu;
pub mod chunker;
pub mod device;

pub use apdu::{Apdu, Instruction, Reply, StatusWord};
pub use chunker::chunk_signing_payload;
pub use device::{AppConfiguration, EosDevice, PublicKeyEntry, Transport};
