//! APDU command headers and device status words

use std::fmt;

/// Application class byte for every command
pub const CLA: u8 = 0xD4;

/// P1 for single-shot / first frame of a multi-frame send
pub const P1_FIRST: u8 = 0x00;
/// P1 for continuation frames
pub const P1_MORE: u8 = 0x80;
/// P1 asking the device to display and confirm
pub const P1_CONFIRM: u8 = 0x01;
/// P1 for silent retrieval
pub const P1_NON_CONFIRM: u8 = 0x00;

/// P2 requesting the chain code alongside the public key
pub const P2_CHAINCODE: u8 = 0x01;
pub const P2_NO_CHAINCODE: u8 = 0x00;

/// Instruction bytes understood by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Instruction {
    GetPublicKey = 0x02,
    SignMessage = 0x04,
    GetAppConfiguration = 0x06,
}

/// One command frame: 4-byte header, 1-byte length, payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apdu {
    pub cla: u8,
    pub ins: Instruction,
    pub p1: u8,
    pub p2: u8,
    pub data: Vec<u8>,
}

impl Apdu {
    pub fn new(ins: Instruction, p1: u8, p2: u8, data: Vec<u8>) -> Self {
        Self {
            cla: CLA,
            ins,
            p1,
            p2,
            data,
        }
    }

    /// Wire form: header, declared length, payload
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(5 + self.data.len());
        out.push(self.cla);
        out.push(self.ins as u8);
        out.push(self.p1);
        out.push(self.p2);
        out.push(self.data.len() as u8);
        out.extend_from_slice(&self.data);
        out
    }
}

/// A reply from the device: payload plus status word
#[derive(Debug, Clone)]
pub struct Reply {
    pub data: Vec<u8>,
    pub status: StatusWord,
}

/// Device status words, returned as the outcome of every exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusWord {
    Ok,
    NoAppResponse,
    SdkException,
    SdkInvalidParameter,
    SdkExceptionOverflow,
    SdkExceptionSecurity,
    SdkInvalidCrc,
    SdkInvalidChecksum,
    SdkInvalidCounter,
    SdkNotSupported,
    SdkInvalidState,
    SdkTimeout,
    SdkExceptionPic,
    SdkExceptionAppExit,
    SdkExceptionIoOverflow,
    SdkExceptionIoHeader,
    SdkExceptionIoState,
    SdkExceptionIoReset,
    SdkExceptionCxPort,
    SdkExceptionSystem,
    SdkNotEnoughSpace,
    NoApduReceived,
    UserCancel,
    UnimplementedInstruction,
    InvalidCla,
    Unknown(u16),
}

impl StatusWord {
    pub fn from_code(code: u16) -> Self {
        match code {
            0x9000 => Self::Ok,
            0x6700 => Self::NoAppResponse,
            0x6801 => Self::SdkException,
            0x6802 => Self::SdkInvalidParameter,
            0x6803 => Self::SdkExceptionOverflow,
            0x6804 => Self::SdkExceptionSecurity,
            0x6805 => Self::SdkInvalidCrc,
            0x6806 => Self::SdkInvalidChecksum,
            0x6807 => Self::SdkInvalidCounter,
            0x6808 => Self::SdkNotSupported,
            0x6809 => Self::SdkInvalidState,
            0x6810 => Self::SdkTimeout,
            0x6811 => Self::SdkExceptionPic,
            0x6812 => Self::SdkExceptionAppExit,
            0x6813 => Self::SdkExceptionIoOverflow,
            0x6814 => Self::SdkExceptionIoHeader,
            0x6815 => Self::SdkExceptionIoState,
            0x6816 => Self::SdkExceptionIoReset,
            0x6817 => Self::SdkExceptionCxPort,
            0x6818 => Self::SdkExceptionSystem,
            0x6819 => Self::SdkNotEnoughSpace,
            0x6982 => Self::NoApduReceived,
            0x6985 => Self::UserCancel,
            0x6d00 => Self::UnimplementedInstruction,
            0x6e00 => Self::InvalidCla,
            other => Self::Unknown(other),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::Ok => 0x9000,
            Self::NoAppResponse => 0x6700,
            Self::SdkException => 0x6801,
            Self::SdkInvalidParameter => 0x6802,
            Self::SdkExceptionOverflow => 0x6803,
            Self::SdkExceptionSecurity => 0x6804,
            Self::SdkInvalidCrc => 0x6805,
            Self::SdkInvalidChecksum => 0x6806,
            Self::SdkInvalidCounter => 0x6807,
            Self::SdkNotSupported => 0x6808,
            Self::SdkInvalidState => 0x6809,
            Self::SdkTimeout => 0x6810,
            Self::SdkExceptionPic => 0x6811,
            Self::SdkExceptionAppExit => 0x6812,
            Self::SdkExceptionIoOverflow => 0x6813,
            Self::SdkExceptionIoHeader => 0x6814,
            Self::SdkExceptionIoState => 0x6815,
            Self::SdkExceptionIoReset => 0x6816,
            Self::SdkExceptionCxPort => 0x6817,
            Self::SdkExceptionSystem => 0x6818,
            Self::SdkNotEnoughSpace => 0x6819,
            Self::NoApduReceived => 0x6982,
            Self::UserCancel => 0x6985,
            Self::UnimplementedInstruction => 0x6d00,
            Self::InvalidCla => 0x6e00,
            Self::Unknown(code) => *code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::NoAppResponse => "no app response",
            Self::SdkException
            | Self::SdkInvalidParameter
            | Self::SdkExceptionOverflow
            | Self::SdkExceptionSecurity
            | Self::SdkInvalidCrc
            | Self::SdkInvalidChecksum
            | Self::SdkInvalidCounter
            | Self::SdkNotSupported
            | Self::SdkInvalidState
            | Self::SdkTimeout
            | Self::SdkExceptionPic
            | Self::SdkExceptionAppExit
            | Self::SdkExceptionIoOverflow
            | Self::SdkExceptionIoHeader
            | Self::SdkExceptionIoState
            | Self::SdkExceptionIoReset
            | Self::SdkExceptionCxPort
            | Self::SdkExceptionSystem
            | Self::SdkNotEnoughSpace => "internal SDK fault",
            Self::NoApduReceived => "no APDU received",
            Self::UserCancel => "cancelled by user",
            Self::UnimplementedInstruction => "unimplemented instruction",
            Self::InvalidCla => "invalid class byte",
            Self::Unknown(_) => "unknown status word",
        }
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04x})", self.description(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_layout() {
        let apdu = Apdu::new(Instruction::SignMessage, P1_FIRST, 0, vec![0xaa, 0xbb]);
        assert_eq!(apdu.serialize(), vec![0xd4, 0x04, 0x00, 0x00, 0x02, 0xaa, 0xbb]);
    }

    #[test]
    fn test_status_word_roundtrip() {
        for code in [0x9000u16, 0x6700, 0x6810, 0x6985, 0x6d00, 0x6e00, 0x1234] {
            assert_eq!(StatusWord::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_status_categories() {
        assert!(StatusWord::from_code(0x9000).is_ok());
        assert_eq!(StatusWord::from_code(0x6985), StatusWord::UserCancel);
        assert_eq!(
            StatusWord::from_code(0x6803).description(),
            "internal SDK fault"
        );
        assert!(matches!(StatusWord::from_code(0x0042), StatusWord::Unknown(0x0042)));
    }
}
