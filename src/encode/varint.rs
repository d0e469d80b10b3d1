//! Unsigned varint encoding (fc::unsigned_int)
//!
//! LEB128-style: 7 payload bits per byte, continuation bit 0x80 while
//! more bits remain. Zero still emits one byte.

/// Encode an unsigned integer as a varint byte sequence
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(2);
    let mut val = value;

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);

        if val == 0 {
            break;
        }
    }

    out
}
