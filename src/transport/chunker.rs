//! Multi-frame chunking of signing payloads
//!
//! A signing command carries the derivation path plus the serialized
//! transaction (or message) bytes. The message is split into chunks of
//! at most `max_chunk` bytes; the first frame additionally carries the
//! path element count and the raw path ahead of its chunk, and declares
//! total size path_len + 1 + chunk_len. Continuations use P1_MORE and
//! carry only their own chunk. Concatenating the chunks reproduces the
//! message exactly.

use crate::error::{EosError, EosResult};
use crate::path::DerivationPath;
use crate::transport::apdu::{Apdu, Instruction, P1_FIRST, P1_MORE};

/// Default chunk size used by the reference tooling
pub const DEFAULT_CHUNK_SIZE: usize = 200;

/// Split `message` into sign-message frames
pub fn chunk_signing_payload(
    path: &DerivationPath,
    message: &[u8],
    max_chunk: usize,
) -> EosResult<Vec<Apdu>> {
    if max_chunk == 0 {
        return Err(EosError::framing_error("chunk size must be positive"));
    }

    let path_bytes = path.to_bytes();
    let first_chunk = message.len().min(max_chunk);
    // The length byte must hold path + count byte + first chunk
    if path_bytes.len() + 1 + first_chunk > 255 {
        return Err(EosError::framing_error(format!(
            "first frame would exceed 255 bytes (path {} + chunk {})",
            path_bytes.len(),
            first_chunk
        )));
    }

    let mut frames = Vec::with_capacity(1 + message.len() / max_chunk);
    let mut sent = 0;

    let mut data = Vec::with_capacity(1 + path_bytes.len() + first_chunk);
    data.push(path.element_count() as u8);
    data.extend_from_slice(&path_bytes);
    data.extend_from_slice(&message[..first_chunk]);
    frames.push(Apdu::new(Instruction::SignMessage, P1_FIRST, 0, data));
    sent += first_chunk;

    while sent < message.len() {
        let chunk = (message.len() - sent).min(max_chunk);
        frames.push(Apdu::new(
            Instruction::SignMessage,
            P1_MORE,
            0,
            message[sent..sent + chunk].to_vec(),
        ));
        sent += chunk;
    }

    // Structurally impossible to miss bytes above; treat as fatal if it happens
    if sent != message.len() {
        return Err(EosError::framing_error(format!(
            "chunk accounting mismatch: sent {} of {}",
            sent,
            message.len()
        )));
    }

    Ok(frames)
}
