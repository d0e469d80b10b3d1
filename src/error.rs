//! Unified error types for the EOS Ledger toolkit
//!
//! All errors flow through this module so callers can distinguish
//! encoding problems (caught before anything is sent to the device),
//! framing invariant violations, device status words, and signature
//! verification failures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all toolkit operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EosError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl EosError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(ErrorCode::MissingField, format!("missing field: {}", field))
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidQuantity, msg)
    }

    pub fn encoding_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::EncodingFailed, msg)
    }

    pub fn framing_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::FramingInvariant, msg)
    }

    pub fn non_canonical(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::NonCanonicalSignature, msg)
    }

    pub fn recovery_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RecoveryFailed, msg)
    }

    pub fn key_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::PublicKeyMismatch, msg)
    }

    pub fn verification_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::VerificationFailed, msg)
    }

    pub fn device_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeviceStatus, msg)
    }

    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedResponse, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for EosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for EosError {}

/// Error codes for categorization
///
/// Encoding problems are `InvalidInput`/`MissingField`/`InvalidQuantity`/
/// `EncodingFailed`, framing invariants `FramingInvariant`, device status
/// words `DeviceStatus`/`MalformedResponse`, and the signature checks each
/// have their own code so a failed verification is never ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input / encoding errors
    InvalidInput,
    MissingField,
    InvalidQuantity,
    EncodingFailed,

    // Transport framing
    FramingInvariant,

    // Device errors
    DeviceStatus,
    MalformedResponse,

    // Signature verification
    NonCanonicalSignature,
    RecoveryFailed,
    PublicKeyMismatch,
    VerificationFailed,

    // Parse errors
    JsonError,
    HexError,

    // Internal
    Internal,
}

/// Result type alias for toolkit operations
pub type EosResult<T> = Result<T, EosError>;

// Conversions from common error types

impl From<serde_json::Error> for EosError {
    fn from(e: serde_json::Error) -> Self {
        EosError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for EosError {
    fn from(e: hex::FromHexError) -> Self {
        EosError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<std::io::Error> for EosError {
    fn from(e: std::io::Error) -> Self {
        EosError::new(ErrorCode::Internal, e.to_string())
    }
}

impl From<secp256k1::Error> for EosError {
    fn from(e: secp256k1::Error) -> Self {
        EosError::new(ErrorCode::VerificationFailed, format!("secp256k1 error: {}", e))
    }
}
