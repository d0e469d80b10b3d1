//! Device command layer
//!
//! Drives the request/response exchanges with the signing device. The
//! physical link is abstracted behind [`Transport`]; every exchange is
//! strictly sequential — a frame is only sent once the previous reply
//! has arrived, because the device accumulates partial transaction
//! state between frames.

use crate::error::{EosError, EosResult};
use crate::log_debug;
use crate::path::DerivationPath;
use crate::transport::apdu::{
    Apdu, Instruction, Reply, P1_CONFIRM, P1_NON_CONFIRM, P2_CHAINCODE, P2_NO_CHAINCODE,
};
use crate::transport::chunker::chunk_signing_payload;
use crate::verify::derive_address;

/// Blocking frame exchange with the device
///
/// Implementations wrap the physical transport (USB/HID). `exchange`
/// must not return until the device has replied to this frame.
pub trait Transport {
    fn exchange(&mut self, apdu: &Apdu) -> EosResult<Reply>;
}

/// Parsed get-public-key response
#[derive(Debug, Clone)]
pub struct PublicKeyEntry {
    /// Uncompressed SEC1 public key (0x04 || x || y)
    pub public_key: [u8; 65],
    /// "EOS..." address as reported by the device
    pub address: String,
    pub chain_code: Option<[u8; 32]>,
}

/// Get-app-configuration response
#[derive(Debug, Clone, Copy)]
pub struct AppConfiguration {
    /// Whether arbitrary (unknown) contract data is allowed on device
    pub data_allowed: bool,
    pub version: (u8, u8, u8),
}

/// High-level command interface over a [`Transport`]
pub struct EosDevice<T: Transport> {
    transport: T,
}

impl<T: Transport> EosDevice<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Consume the device, returning the underlying transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    fn exchange_ok(&mut self, apdu: &Apdu) -> EosResult<Vec<u8>> {
        log_debug!(
            "device",
            "exchanging frame",
            ins = format!("0x{:02x}", apdu.ins as u8),
            p1 = format!("0x{:02x}", apdu.p1),
            len = apdu.data.len(),
        );
        let reply = self.transport.exchange(apdu)?;
        if !reply.status.is_ok() {
            return Err(EosError::device_error(reply.status.description())
                .with_details(format!("status=0x{:04x}", reply.status.code())));
        }
        Ok(reply.data)
    }

    /// Fetch the public key (and address) for a derivation path
    pub fn get_public_key(
        &mut self,
        path: &DerivationPath,
        confirm: bool,
        want_chain_code: bool,
    ) -> EosResult<PublicKeyEntry> {
        let mut data = Vec::with_capacity(1 + path.element_count() * 4);
        data.push(path.element_count() as u8);
        data.extend_from_slice(&path.to_bytes());

        let p1 = if confirm { P1_CONFIRM } else { P1_NON_CONFIRM };
        let p2 = if want_chain_code { P2_CHAINCODE } else { P2_NO_CHAINCODE };
        let response = self.exchange_ok(&Apdu::new(Instruction::GetPublicKey, p1, p2, data))?;

        parse_public_key_response(&response, want_chain_code)
    }

    /// Stream a serialized transaction (or message) for signing
    ///
    /// Returns the 65-byte signature `[v, r, s]` from the final reply.
    pub fn sign(
        &mut self,
        path: &DerivationPath,
        payload: &[u8],
        max_chunk: usize,
    ) -> EosResult<[u8; 65]> {
        let frames = chunk_signing_payload(path, payload, max_chunk)?;
        let total = frames.len();

        let mut last = Vec::new();
        for (i, frame) in frames.iter().enumerate() {
            log_debug!("device", "sign frame", frame = i + 1, total = total);
            last = self.exchange_ok(frame)?;
        }

        last.as_slice().try_into().map_err(|_| {
            EosError::malformed_response(format!(
                "expected 65-byte signature, got {} bytes",
                last.len()
            ))
        })
    }

    /// Query app configuration (data-allowed flag and version triple)
    pub fn get_app_configuration(&mut self) -> EosResult<AppConfiguration> {
        let response = self.exchange_ok(&Apdu::new(
            Instruction::GetAppConfiguration,
            0,
            0,
            Vec::new(),
        ))?;
        if response.len() < 4 {
            return Err(EosError::malformed_response(format!(
                "configuration response too short: {} bytes",
                response.len()
            )));
        }
        Ok(AppConfiguration {
            data_allowed: response[0] == 0x01,
            version: (response[1], response[2], response[3]),
        })
    }
}

/// Parse `pubkey_len || pubkey || address_len || address [|| chain_code]`
fn parse_public_key_response(
    response: &[u8],
    want_chain_code: bool,
) -> EosResult<PublicKeyEntry> {
    let short = || EosError::malformed_response("truncated get-public-key response");

    let mut offset = 0;
    let key_len = *response.first().ok_or_else(short)? as usize;
    offset += 1;
    let key_bytes = response.get(offset..offset + key_len).ok_or_else(short)?;
    offset += key_len;

    let public_key: [u8; 65] = key_bytes.try_into().map_err(|_| {
        EosError::malformed_response(format!("expected 65-byte public key, got {}", key_len))
    })?;

    let addr_len = *response.get(offset).ok_or_else(short)? as usize;
    offset += 1;
    let addr_bytes = response.get(offset..offset + addr_len).ok_or_else(short)?;
    offset += addr_len;

    let address = std::str::from_utf8(addr_bytes)
        .map_err(|_| EosError::malformed_response("address is not ASCII"))?
        .to_owned();

    let chain_code = if want_chain_code {
        let bytes = response.get(offset..offset + 32).ok_or_else(short)?;
        offset += 32;
        let code: [u8; 32] = bytes.try_into().map_err(|_| short())?;
        Some(code)
    } else {
        None
    };

    if offset != response.len() {
        return Err(EosError::malformed_response(format!(
            "{} trailing bytes in get-public-key response",
            response.len() - offset
        )));
    }

    // The device-reported address must match the one the key derives to
    let derived = derive_address(&public_key);
    if derived != address {
        return Err(EosError::key_mismatch(format!(
            "device reported {} but key derives to {}",
            address, derived
        )));
    }

    Ok(PublicKeyEntry {
        public_key,
        address,
        chain_code,
    })
}
