//! BIP32 derivation path parsing
//!
//! Parses textual paths like `44'/194'/0'/0/0` into the big-endian
//! 32-bit element sequence the device expects. An apostrophe marks a
//! hardened element (high bit set).

use crate::error::{EosError, EosResult};

const HARDENED: u32 = 0x8000_0000;

/// A parsed derivation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    elements: Vec<u32>,
}

impl DerivationPath {
    /// Parse a textual path, e.g. `44'/194'/0'/0/0`
    pub fn parse(path: &str) -> EosResult<Self> {
        if path.is_empty() {
            return Ok(Self { elements: Vec::new() });
        }

        let mut elements = Vec::new();
        for part in path.trim_start_matches("m/").split('/') {
            let (digits, hardened) = match part.strip_suffix('\'') {
                Some(d) => (d, true),
                None => (part, false),
            };
            let value: u32 = digits.parse().map_err(|_| {
                EosError::invalid_input(format!("invalid path element: {}", part))
            })?;
            if value & HARDENED != 0 {
                return Err(EosError::invalid_input(format!(
                    "path element out of range: {}",
                    part
                )));
            }
            elements.push(if hardened { HARDENED | value } else { value });
        }

        Ok(Self { elements })
    }

    /// Number of 32-bit path elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Serialize as big-endian 32-bit words
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.elements.len() * 4);
        for element in &self.elements {
            out.extend_from_slice(&element.to_be_bytes());
        }
        out
    }
}

impl std::fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            if element & HARDENED != 0 {
                write!(f, "{}'", element & !HARDENED)?;
            } else {
                write!(f, "{}", element)?;
            }
        }
        Ok(())
    }
}
