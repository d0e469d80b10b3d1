//! EOS asset quantity packing
//!
//! A quantity string like `"1.0000 EOS"` becomes 16 bytes on the wire:
//! a signed 64-bit amount scaled by the precision, then the symbol word
//! (low byte = precision, remaining bytes = ticker ASCII), both
//! little-endian. Precision is inferred from the decimal point position.

use crate::error::{EosError, EosResult};

/// Build the symbol word: precision in byte 0, ticker ASCII above it
fn symbol_from_string(precision: u8, ticker: &str) -> EosResult<u64> {
    if ticker.len() > 7 {
        return Err(EosError::invalid_quantity(format!(
            "symbol too long: {}",
            ticker
        )));
    }

    let mut result = precision as u64;
    for (i, c) in ticker.bytes().enumerate() {
        result |= (c as u64) << (8 * (i + 1));
    }
    Ok(result)
}

/// Encode a textual quantity `"amount SYMBOL"` into its 16-byte wire form
///
/// If the integer part is negative the fractional part is negated too,
/// mirroring textual negative-decimal semantics ("-1.50" means -1 and -50
/// hundredths). This matches the chain tooling; note that "-0.50" keeps a
/// positive fraction because the integer part parses to plain zero.
pub fn encode_asset(quantity: &str) -> EosResult<[u8; 16]> {
    let (amount_str, ticker) = quantity
        .split_once(' ')
        .ok_or_else(|| EosError::invalid_quantity(format!("missing symbol: {:?}", quantity)))?;

    let (precision, int_str, fract_str) = match amount_str.split_once('.') {
        Some((int_part, fract_part)) => (fract_part.len(), int_part, Some(fract_part)),
        None => (0, amount_str, None),
    };

    let precision: u8 = precision
        .try_into()
        .map_err(|_| EosError::invalid_quantity("precision out of range"))?;
    let sym = symbol_from_string(precision, ticker)?;

    let int_part: i64 = int_str
        .parse()
        .map_err(|_| EosError::invalid_quantity(format!("bad amount: {:?}", amount_str)))?;

    let mut fract_part: i64 = match fract_str {
        Some(digits) => digits
            .parse()
            .map_err(|_| EosError::invalid_quantity(format!("bad fraction: {:?}", amount_str)))?,
        None => 0,
    };
    if int_part < 0 {
        fract_part = -fract_part;
    }

    let scale = 10i64
        .checked_pow(precision as u32)
        .ok_or_else(|| EosError::invalid_quantity("precision out of range"))?;
    let amount = int_part
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fract_part))
        .ok_or_else(|| EosError::invalid_quantity(format!("amount overflow: {:?}", quantity)))?;

    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&amount.to_le_bytes());
    out[8..].copy_from_slice(&sym.to_le_bytes());
    Ok(out)
}
