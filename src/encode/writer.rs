//! Append-only byte buffer with a running SHA-256
//!
//! The signing digest is the hash of the exact serialized stream, so the
//! buffer and the hasher are updated together in a single `push`. The
//! pair is passed by reference into each sub-encoder instead of living
//! in any shared state.

use sha2::{Digest, Sha256};

/// Serialized transaction stream plus its running digest
pub struct TxWriter {
    bytes: Vec<u8>,
    sha: Sha256,
}

impl TxWriter {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            sha: Sha256::new(),
        }
    }

    /// Append bytes to the stream and the digest in lockstep
    pub fn push(&mut self, data: &[u8]) {
        self.sha.update(data);
        self.bytes.extend_from_slice(data);
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the writer, returning (digest, serialized bytes)
    pub fn finish(self) -> ([u8; 32], Vec<u8>) {
        let digest: [u8; 32] = self.sha.finalize().into();
        (digest, self.bytes)
    }
}

impl Default for TxWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_matches_stream() {
        let mut writer = TxWriter::new();
        writer.push(b"hello ");
        writer.push(b"world");

        let (digest, bytes) = writer.finish();
        assert_eq!(bytes, b"hello world");

        let expected: [u8; 32] = Sha256::digest(b"hello world").into();
        assert_eq!(digest, expected);
    }

    #[test]
    fn test_empty_writer() {
        let writer = TxWriter::new();
        assert!(writer.is_empty());
        let (digest, bytes) = writer.finish();
        assert!(bytes.is_empty());
        let expected: [u8; 32] = Sha256::digest(b"").into();
        assert_eq!(digest, expected);
    }
}
