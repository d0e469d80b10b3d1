//! EOS account/action name packing
//!
//! Names are at most 13 characters from `{1-5, a-z, .}` packed into a
//! 64-bit word: 5 bits per character for the first 12 positions, 4 bits
//! for the 13th. Anything outside the alphabet maps to 0 (the empty
//! symbol), and characters past position 13 are ignored, so this is a
//! lossy one-way encoding by design of the chain format.

/// Map one name character to its 5-bit symbol
fn char_to_symbol(c: u8) -> u64 {
    match c {
        b'a'..=b'z' => (c - b'a') as u64 + 6,
        b'1'..=b'5' => (c - b'1') as u64 + 1,
        _ => 0,
    }
}

/// Pack a name string into its little-endian 8-byte wire form
pub fn encode_name(name: &str) -> [u8; 8] {
    let bytes = name.as_bytes();
    let mut value: u64 = 0;

    for i in 0..13 {
        let c = if i < bytes.len() {
            char_to_symbol(bytes[i])
        } else {
            0
        };

        if i < 12 {
            value |= (c & 0x1f) << (64 - 5 * (i + 1));
        } else {
            value |= c & 0x0f;
        }
    }

    value.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_names() {
        assert_eq!(hex::encode(encode_name("eosio")), "0000000000ea3055");
        assert_eq!(hex::encode(encode_name("eosio.token")), "00a6823403ea3055");
        assert_eq!(hex::encode(encode_name("transfer")), "000000572d3ccdcd");
        assert_eq!(hex::encode(encode_name("active")), "00000000a8ed3232");
        assert_eq!(hex::encode(encode_name("alice")), "0000000000855c34");
        assert_eq!(hex::encode(encode_name("bob")), "0000000000000e3d");
    }

    #[test]
    fn test_empty_name_is_zero() {
        assert_eq!(encode_name(""), [0u8; 8]);
    }

    #[test]
    fn test_invalid_chars_map_to_empty_symbol() {
        // '.' and digits outside 1-5 carry no symbol value
        assert_eq!(encode_name("a.b"), encode_name("a\0b"));
        assert_eq!(encode_name("0"), encode_name(""));
    }

    #[test]
    fn test_characters_beyond_13_ignored() {
        let long = "abcdefghijklmzzzz";
        let trimmed = &long[..13];
        assert_eq!(encode_name(long), encode_name(trimmed));
    }

    #[test]
    fn test_thirteenth_char_reduced_width() {
        // position 13 keeps only 4 bits, so 'p' (21 = 0b10101) collides with '5' (5 = 0b0101)
        assert_eq!(encode_name("aaaaaaaaaaaap"), encode_name("aaaaaaaaaaaa5"));
    }
}
