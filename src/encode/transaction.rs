//! Full transaction serialization
//!
//! Produces the exact byte stream the signing device hashes, together
//! with its SHA-256 digest. Field order is fixed by the chain format;
//! the digest is the hash of the serialized stream, nothing else, so
//! both are accumulated through one `TxWriter`.

use chrono::NaiveDateTime;

use crate::encode::action::encode_action;
use crate::encode::writer::TxWriter;
use crate::error::{EosError, EosResult};
use crate::types::SignRequest;

/// Trailing context-free-data digest placeholder: always 32 zero bytes,
/// non-empty context-free data is not supported
const CFD_PLACEHOLDER: [u8; 32] = [0u8; 32];

fn parse_expiration(text: &str) -> EosResult<u32> {
    let timestamp = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| EosError::encoding_error(format!("bad expiration {:?}: {}", text, e)))?
        .and_utc()
        .timestamp();
    timestamp
        .try_into()
        .map_err(|_| EosError::encoding_error(format!("expiration out of range: {:?}", text)))
}

/// Serialize a transaction and compute its signing digest
///
/// Returns `(digest, serialized bytes)`. Fails before anything is sent
/// to a device: every field is validated here.
pub fn encode_transaction(request: &SignRequest) -> EosResult<([u8; 32], Vec<u8>)> {
    let body = &request.transaction;

    let chain_id = hex::decode(&request.chain_id)?;
    if chain_id.len() != 32 {
        return Err(EosError::encoding_error(format!(
            "chain id must be 32 bytes, got {}",
            chain_id.len()
        )));
    }

    if !body.context_free_actions.is_empty() {
        return Err(EosError::encoding_error(
            "context-free actions are not supported",
        ));
    }
    if !body.transaction_extensions.is_empty() {
        return Err(EosError::encoding_error(
            "transaction extensions are not supported",
        ));
    }
    let action_count: u8 = body.actions.len().try_into().map_err(|_| {
        EosError::encoding_error(format!("too many actions: {}", body.actions.len()))
    })?;

    let mut writer = TxWriter::new();

    writer.push(&chain_id);
    writer.push(&parse_expiration(&body.expiration)?.to_le_bytes());
    writer.push(&body.ref_block_num.to_le_bytes());
    writer.push(&body.ref_block_prefix.to_le_bytes());
    writer.push(&[body.net_usage_words]);
    writer.push(&[body.max_cpu_usage_ms]);
    writer.push(&[body.delay_sec]);

    writer.push(&[0x00]); // context-free action count
    writer.push(&[action_count]);
    for action in &body.actions {
        encode_action(action, &mut writer)?;
    }

    writer.push(&[0x00]); // transaction extension count
    writer.push(&CFD_PLACEHOLDER);

    Ok(writer.finish())
}
