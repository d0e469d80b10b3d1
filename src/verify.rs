//! Signature verification and address derivation
//!
//! The device returns a 65-byte signature `[v, r(32), s(32)]`. Checks
//! are explicit and independently testable: canonical form, public-key
//! recovery, comparison against the device-reported key, and finally
//! standard ECDSA verification of (r, s) against the digest.

use ripemd::Ripemd160;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId, Signature};
use secp256k1::{Message, PublicKey, Secp256k1};
use sha2::Digest;

use crate::error::{EosError, EosResult};
use crate::path::DerivationPath;
use crate::transport::device::{EosDevice, Transport};

/// Reject signatures whose r or s is not in canonical (malleation-proof)
/// form: top bit clear, and no superfluous leading zero byte
pub fn check_canonical(signature: &[u8; 65]) -> EosResult<()> {
    let component = |name: &str, bytes: &[u8]| -> EosResult<()> {
        if bytes[0] & 0x80 != 0 {
            return Err(EosError::non_canonical(format!("{} has high bit set", name)));
        }
        if bytes[0] == 0 && bytes[1] & 0x80 == 0 {
            return Err(EosError::non_canonical(format!(
                "{} has superfluous leading zero byte",
                name
            )));
        }
        Ok(())
    };

    component("r", &signature[1..33])?;
    component("s", &signature[33..65])
}

/// Recover the unique public key consistent with (digest, r, s, parity)
pub fn recover_public_key(digest: &[u8; 32], signature: &[u8; 65]) -> EosResult<PublicKey> {
    let v = signature[0];
    if !(27..=35).contains(&v) {
        return Err(EosError::recovery_failed(format!(
            "recovery byte out of range: {}",
            v
        )));
    }
    let parity = (v - 27 - 4) as i32;
    let recovery_id = RecoveryId::from_i32(parity)
        .map_err(|e| EosError::recovery_failed(format!("bad recovery id {}: {}", parity, e)))?;

    let compact: [u8; 64] = signature[1..65]
        .try_into()
        .map_err(|_| EosError::recovery_failed("signature truncated"))?;
    let recoverable = RecoverableSignature::from_compact(&compact, recovery_id)
        .map_err(|e| EosError::recovery_failed(format!("malformed signature: {}", e)))?;

    let message = Message::from_digest_slice(digest)
        .map_err(|e| EosError::recovery_failed(format!("bad digest: {}", e)))?;

    Secp256k1::new()
        .recover_ecdsa(&message, &recoverable)
        .map_err(|e| EosError::recovery_failed(format!("recovery failed: {}", e)))
}

/// Derive the checksummed "EOS..." address from an uncompressed public key
pub fn derive_address(public_key: &[u8; 65]) -> String {
    // Compress: prefix selected by y parity, then the x coordinate
    let mut compressed = [0u8; 33];
    compressed[0] = if public_key[64] & 0x01 == 0x01 { 0x03 } else { 0x02 };
    compressed[1..].copy_from_slice(&public_key[1..33]);

    let mut hasher = Ripemd160::new();
    hasher.update(compressed);
    let checksum = hasher.finalize();

    let mut buffer = compressed.to_vec();
    buffer.extend_from_slice(&checksum[..4]);

    format!("EOS{}", bs58::encode(buffer).into_string())
}

/// Full verification of a device signature against a signing digest
///
/// Recovers the key from the signature, cross-checks it against the key
/// the device reports for the same derivation path, then verifies the
/// (r, s) pair against the digest with the recovered key. Every failure
/// mode carries its own error code.
pub fn verify<T: Transport>(
    device: &mut EosDevice<T>,
    path: &DerivationPath,
    digest: &[u8; 32],
    signature: &[u8; 65],
) -> EosResult<()> {
    check_canonical(signature)?;
    let recovered = recover_public_key(digest, signature)?;

    let reported = device.get_public_key(path, false, false)?;
    if recovered.serialize_uncompressed() != reported.public_key {
        return Err(EosError::key_mismatch(
            "recovered key differs from device-reported key",
        ));
    }

    let compact: [u8; 64] = signature[1..65]
        .try_into()
        .map_err(|_| EosError::verification_failed("signature truncated"))?;
    let sig = Signature::from_compact(&compact)
        .map_err(|e| EosError::verification_failed(format!("malformed signature: {}", e)))?;
    let message = Message::from_digest_slice(digest)
        .map_err(|e| EosError::verification_failed(format!("bad digest: {}", e)))?;

    Secp256k1::new()
        .verify_ecdsa(&message, &sig, &recovered)
        .map_err(|e| EosError::verification_failed(format!("signature invalid: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::transport::apdu::{Apdu, Reply, StatusWord};

    // Reference vector: signature over the reference transaction digest
    const DIGEST_HEX: &str = "6a4b9f80d395c7f1d6f393c7779498e46d5afb6d9bcb8b392c9297ed1074a05a";
    const SIG_HEX: &str = "202d20e27338eb006035f047b9ef7270ccfeb5e1ed641ea5d4838ba43cb7268a6e\
                           79c1e51bbf6eb01d3672a7830e2845952f20bb1294e0676ea39cc7ed0d46ba87";
    const PUBKEY_HEX: &str = "047b7a44ecade10fcf1d7fcbeaf72d65c9b8096d0846c68f4ea09d78305c3f66e6\
                              03e6890d3cc884abe7f76245b97fe37419f9fef6e85824698d66363e27d3b9f6";
    const ADDRESS: &str = "EOS5psRX9KXojGXGcz74HM3ZKVVYZCE2hdGnupvVL4n4qUCpBB6Fz";

    fn digest() -> [u8; 32] {
        hex::decode(DIGEST_HEX).unwrap().try_into().unwrap()
    }

    fn signature() -> [u8; 65] {
        hex::decode(SIG_HEX).unwrap().try_into().unwrap()
    }

    fn public_key() -> [u8; 65] {
        hex::decode(PUBKEY_HEX).unwrap().try_into().unwrap()
    }

    struct FixedKeyTransport;

    impl Transport for FixedKeyTransport {
        fn exchange(&mut self, _apdu: &Apdu) -> EosResult<Reply> {
            let mut data = vec![65u8];
            data.extend_from_slice(&public_key());
            data.push(ADDRESS.len() as u8);
            data.extend_from_slice(ADDRESS.as_bytes());
            Ok(Reply {
                data,
                status: StatusWord::Ok,
            })
        }
    }

    #[test]
    fn test_reference_signature_verifies() {
        let mut device = EosDevice::new(FixedKeyTransport);
        let path = DerivationPath::parse("44'/194'/0'/0/0").unwrap();
        verify(&mut device, &path, &digest(), &signature()).unwrap();
    }

    #[test]
    fn test_recovered_key_matches_vector() {
        let recovered = recover_public_key(&digest(), &signature()).unwrap();
        assert_eq!(recovered.serialize_uncompressed(), public_key());
    }

    #[test]
    fn test_address_derivation() {
        assert_eq!(derive_address(&public_key()), ADDRESS);
    }

    #[test]
    fn test_bit_flips_break_verification() {
        let mut device = EosDevice::new(FixedKeyTransport);
        let path = DerivationPath::parse("44'/194'/0'/0/0").unwrap();

        // flip one bit in r and one in s
        for index in [10usize, 50] {
            let mut sig = signature();
            sig[index] ^= 0x01;
            let result = verify(&mut device, &path, &digest(), &sig);
            assert!(result.is_err(), "bit flip at byte {} must fail", index);
        }
    }

    #[test]
    fn test_non_canonical_r_rejected() {
        let mut sig = signature();
        sig[1] = 0x80;
        let err = check_canonical(&sig).unwrap_err();
        assert_eq!(err.code, ErrorCode::NonCanonicalSignature);

        let mut sig = signature();
        sig[1] = 0x00;
        sig[2] = 0x00;
        assert!(check_canonical(&sig).is_err());
    }

    #[test]
    fn test_non_canonical_s_rejected() {
        let mut sig = signature();
        sig[33] = 0x80;
        assert!(check_canonical(&sig).is_err());
    }

    #[test]
    fn test_recovery_byte_range() {
        let mut sig = signature();
        sig[0] = 26;
        assert!(recover_public_key(&digest(), &sig).is_err());
        sig[0] = 36;
        assert!(recover_public_key(&digest(), &sig).is_err());
    }
}
