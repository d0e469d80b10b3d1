use eos_ledger_kit::{chunk_signing_payload, encode_name, encode_varint, DerivationPath};
use proptest::prelude::*;

fn any_name() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            proptest::char::range('a', 'z'),
            proptest::char::range('1', '5'),
        ],
        0..=12,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn name_encoding_is_deterministic(name in any_name()) {
        let first = encode_name(&name);
        let second = encode_name(&name);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.len(), 8);
    }

    #[test]
    fn distinct_short_names_encode_distinctly(a in any_name(), b in any_name()) {
        // up to 12 significant characters the packing is injective
        prop_assume!(a != b);
        prop_assert_ne!(encode_name(&a), encode_name(&b));
    }

    #[test]
    fn varint_always_terminates_cleanly(value in any::<u64>()) {
        let bytes = encode_varint(value);
        prop_assert!(!bytes.is_empty());
        prop_assert!(bytes.len() <= 10);
        // only the last byte lacks the continuation bit
        for byte in &bytes[..bytes.len() - 1] {
            prop_assert!(byte & 0x80 != 0);
        }
        prop_assert!(bytes.last().unwrap() & 0x80 == 0);
    }

    #[test]
    fn chunker_roundtrips_any_payload(
        payload in proptest::collection::vec(any::<u8>(), 0..2000),
        chunk_size in 1usize..=200,
    ) {
        let path = DerivationPath::parse("44'/194'/0'/0/0").unwrap();
        let path_len = path.to_bytes().len();
        let frames = chunk_signing_payload(&path, &payload, chunk_size).unwrap();

        // first frame: count byte, path, first chunk; declared total size holds
        prop_assert_eq!(frames[0].data[0] as usize, 5);
        let first_chunk_len = frames[0].data.len() - 1 - path_len;
        let wire = frames[0].serialize();
        prop_assert_eq!(wire[4] as usize, path_len + 1 + first_chunk_len);

        let mut reassembled = frames[0].data[1 + path_len..].to_vec();
        for frame in &frames[1..] {
            prop_assert!(frame.data.len() <= chunk_size);
            reassembled.extend_from_slice(&frame.data);
        }
        prop_assert_eq!(reassembled, payload);
    }
}
