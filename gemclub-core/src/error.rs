//! Error types for gemclub-core

use crate::status::StatusWord;

/// Result type alias for gemclub protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
///
/// Card-reported failures carry the variant matching their status word;
/// anything outside the documented table ends up in
/// [`Error::UnexpectedStatus`] with the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Address, target or decode failure from the type layer
    #[error(transparent)]
    Types(#[from] gemclub_types::Error),

    /// 69 82: required secret code not presented
    #[error("Security condition not satisfied (CSC verification required)")]
    SecurityNotSatisfied,

    /// 6B 00: P2 rejected by the card
    #[error("Invalid P2 parameter")]
    InvalidParameter,

    /// 65 81: unknown flag or mode, or a transaction counter at its maximum
    #[error("Memory error: unknown flag, unknown mode or CTC reached maximum allowed value")]
    MemoryState,

    /// 67 00
    #[error("Invalid length of expected data")]
    WrongLength,

    /// 6D 00: points at a codec bug, the driver only sends known instructions
    #[error("Invalid instruction byte (INS)")]
    InvalidInstruction,

    /// 63 00: wrong or forbidden secret code
    #[error("Invalid secret code or forbidden value")]
    VerificationFailed,

    /// Status word outside the documented table
    #[error("Unexpected status word: {sw1:02X} {sw2:02X}")]
    UnexpectedStatus {
        sw1: u8,
        sw2: u8,
    },

    /// WRITE or VERIFY without data
    #[error("Payload must not be empty")]
    EmptyPayload,

    /// Payload does not fit the one-byte length field
    #[error("Payload too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge {
        size: usize,
        max: usize,
    },

    /// Response or frame shorter or longer than the protocol allows
    #[error("Malformed response: expected {expected} bytes, got {actual} bytes")]
    MalformedResponse {
        expected: usize,
        actual: usize,
    },

    /// Unknown INS byte in a frame being decoded
    #[error("Unknown instruction byte: 0x{0:02X}")]
    UnknownInstruction(u8),

    /// Invalid session state
    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),
}

impl Error {
    /// Status word the card answered with, for card-reported errors
    pub fn status_word(&self) -> Option<StatusWord> {
        let sw = match self {
            Self::SecurityNotSatisfied => StatusWord::SECURITY_NOT_SATISFIED,
            Self::InvalidParameter => StatusWord::INVALID_PARAMETER,
            Self::MemoryState => StatusWord::MEMORY_STATE,
            Self::WrongLength => StatusWord::WRONG_LENGTH,
            Self::InvalidInstruction => StatusWord::INVALID_INSTRUCTION,
            Self::VerificationFailed => StatusWord::VERIFICATION_FAILED,
            Self::UnexpectedStatus { sw1, sw2 } => StatusWord::new(*sw1, *sw2),
            _ => return None,
        };
        Some(sw)
    }

    /// Check if the error was reported by the card rather than detected locally
    pub fn is_card_error(&self) -> bool {
        self.status_word().is_some()
    }
}
